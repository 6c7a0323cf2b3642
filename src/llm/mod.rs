//! Client for the note generation (chat completion) API.
//!
//! Talks to any OpenAI-compatible `chat/completions` endpoint with
//! `stream: true` and exposes the response as a stream of plain content
//! deltas. SSE framing (`data:` lines, the `[DONE]` marker) is handled
//! here; callers see only text fragments in arrival order.

mod lines;
mod prompt;

pub use lines::LineBuffer;
pub use prompt::RELEASE_NOTES_PROMPT;

use anyhow::{anyhow, Result};
use async_stream::try_stream;
use futures::{Stream, StreamExt};
use reqwest::{header, Client};
use serde_json::{json, Value};

use crate::config::NotesConfig;

#[derive(Debug, Clone)]
pub struct NotesClient {
    client: Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl NotesClient {
    pub fn new(config: NotesConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key,
            api_base: config.api_base,
            model: config.model,
        }
    }

    /// Start a streaming completion and expose its content deltas.
    ///
    /// Fails up front on a non-success status (with the response body for
    /// context); after that, transport and decode failures surface as error
    /// items on the returned stream. There is no retry policy at this layer.
    pub async fn stream_completion(
        &self,
        system_prompt: &str,
        user_content: &str,
    ) -> Result<impl Stream<Item = Result<String>> + Send> {
        let body = json!({
            "model": self.model,
            "stream": true,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_content },
            ],
        });

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(header::ACCEPT, "text/event-stream")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_else(|_| "<no body>".into());
            return Err(anyhow!("completion API error ({status}): {body}"));
        }

        let mut bytes = Box::pin(resp.bytes_stream());
        Ok(try_stream! {
            // SSE frames can split anywhere across chunks; buffer by line.
            let mut buf = String::new();
            while let Some(chunk) = bytes.next().await {
                let chunk = chunk?;
                buf.push_str(&String::from_utf8_lossy(&chunk));
                while let Some(pos) = buf.find('\n') {
                    let frame: String = buf.drain(..=pos).collect();
                    if let Some(delta) = delta_from_frame(frame.trim()) {
                        yield delta;
                    }
                }
            }
            if let Some(delta) = delta_from_frame(buf.trim()) {
                yield delta;
            }
        })
    }
}

/// Pull the content delta out of one SSE frame, if it carries any.
fn delta_from_frame(frame: &str) -> Option<String> {
    let data = frame.strip_prefix("data:")?.trim();
    if data.is_empty() || data == "[DONE]" {
        return None;
    }
    let value: Value = serde_json::from_str(data).ok()?;
    value
        .pointer("/choices/0/delta/content")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_content_delta() {
        let frame = r#"data: {"choices":[{"delta":{"content":"hello"}}]}"#;
        assert_eq!(delta_from_frame(frame), Some("hello".to_string()));
    }

    #[test]
    fn ignores_done_marker_and_non_data_lines() {
        assert_eq!(delta_from_frame("data: [DONE]"), None);
        assert_eq!(delta_from_frame("event: ping"), None);
        assert_eq!(delta_from_frame(""), None);
    }

    #[test]
    fn ignores_frames_without_content() {
        let frame = r#"data: {"choices":[{"delta":{"role":"assistant"}}]}"#;
        assert_eq!(delta_from_frame(frame), None);
    }
}
