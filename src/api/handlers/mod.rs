use std::convert::Infallible;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
    Json,
};
use futures::{Stream, StreamExt};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::AppState;
use crate::diff::{truncate_hunks, MAX_DIFF_HUNKS};
use crate::github::GitHubError;
use crate::llm::{LineBuffer, RELEASE_NOTES_PROMPT};
use crate::models::*;

// ============================================================
// Error Handling
// ============================================================

/// Log an internal error and return a sanitized response to the client.
/// The full error is logged server-side for debugging, but clients only
/// see a generic message to avoid leaking internal details.
fn internal_error(e: impl std::fmt::Display) -> (StatusCode, String) {
    tracing::error!("Internal error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

/// Map a gateway failure onto a response: a missing pull request is the
/// caller's 404, everything else is a bad gateway.
fn gateway_error(e: GitHubError) -> (StatusCode, String) {
    match e {
        GitHubError::NotFound(_) => {
            (StatusCode::NOT_FOUND, "Pull request not found".to_string())
        }
        other => {
            tracing::error!("GitHub request failed: {}", other);
            (
                StatusCode::BAD_GATEWAY,
                "Failed to fetch from GitHub".to_string(),
            )
        }
    }
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Pull Requests
// ============================================================

/// Query parameters for the merged-pull listing.
#[derive(Debug, Deserialize)]
pub struct ListPrsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

pub async fn list_merged_prs(
    State(state): State<AppState>,
    Query(query): Query<ListPrsQuery>,
) -> Result<Json<PullRequestPage>, (StatusCode, String)> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(10).clamp(1, 100);

    let (diffs, full_page) = state
        .github
        .merged_pulls(page, per_page)
        .await
        .map_err(gateway_error)?;

    Ok(Json(PullRequestPage {
        diffs,
        current_page: page,
        per_page,
        next_page: full_page.then(|| page + 1),
    }))
}

pub async fn get_pr(
    State(state): State<AppState>,
    Path(number): Path<u64>,
) -> Result<Json<PullRequestDiffs>, (StatusCode, String)> {
    let pull = state
        .github
        .pull_with_diff(number)
        .await
        .map_err(gateway_error)?;

    Ok(Json(PullRequestDiffs { diffs: vec![pull] }))
}

// ============================================================
// Note Streaming
// ============================================================

/// One terminal SSE error frame, the only error signal on this route.
fn error_event(message: impl std::fmt::Display) -> Event {
    Event::default().data(serde_json::json!({ "error": message.to_string() }).to_string())
}

/// Stream AI-generated release notes for one pull request.
///
/// Fetches the diff, bounds it to the hunk budget, forwards it to the
/// completion API, and re-frames the token stream so every SSE event
/// carries one whole line. Each request owns its own buffer; concurrent
/// generations are fully independent. Any failure, before or during the
/// stream, ends it with a single error event and no retry.
pub async fn stream_notes(
    State(state): State<AppState>,
    Path(number): Path<u64>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = async_stream::stream! {
        let pull = match state.github.pull_with_diff(number).await {
            Ok(pull) => pull,
            Err(e) => {
                tracing::warn!("Fetching pull request {} failed: {}", number, e);
                yield Ok(error_event(format!("Fetch single PR failed: {e}")));
                return;
            }
        };
        if pull.diff.trim().is_empty() {
            yield Ok(error_event(format!("PR {number} has no diff")));
            return;
        }

        let context = truncate_hunks(&pull.diff, MAX_DIFF_HUNKS);
        let deltas = match state
            .notes
            .stream_completion(RELEASE_NOTES_PROMPT, &context)
            .await
        {
            Ok(deltas) => deltas,
            Err(e) => {
                tracing::warn!("Starting note generation for PR {} failed: {}", number, e);
                yield Ok(error_event(e));
                return;
            }
        };
        futures::pin_mut!(deltas);

        let mut lines = LineBuffer::new();
        while let Some(fragment) = deltas.next().await {
            match fragment {
                Ok(fragment) => {
                    for line in lines.push(&fragment) {
                        yield Ok(Event::default().data(line));
                    }
                }
                Err(e) => {
                    tracing::warn!("Note stream for PR {} broke: {}", number, e);
                    yield Ok(error_event(e));
                    return;
                }
            }
        }
        if let Some(rest) = lines.finish() {
            yield Ok(Event::default().data(rest));
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

// ============================================================
// History
// ============================================================

pub async fn list_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<HistoryRecord>>, (StatusCode, String)> {
    state.db.list_history().map(Json).map_err(internal_error)
}

pub async fn create_history(
    State(state): State<AppState>,
    Json(input): Json<CreateHistoryInput>,
) -> Result<(StatusCode, Json<HistoryRecord>), (StatusCode, String)> {
    let record = input
        .validated()
        .ok_or((StatusCode::BAD_REQUEST, "Missing fields".to_string()))?;

    state
        .db
        .insert_history(record)
        .map(|r| (StatusCode::CREATED, Json(r)))
        .map_err(internal_error)
}

pub async fn delete_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    if state.db.delete_history(id).map_err(internal_error)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((
            StatusCode::NOT_FOUND,
            "History record not found".to_string(),
        ))
    }
}
