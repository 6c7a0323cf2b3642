//! Client for the GitHub REST API.
//!
//! Configuration is via environment variables (see [`crate::config`]):
//! `GITHUB_OWNER` / `GITHUB_REPO` select the repository, `GITHUB_TOKEN`
//! raises the rate limit, and `GITHUB_API_URL` points the client at a
//! different API host.

use reqwest::{header, Client, Method, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::config::GitHubConfig;
use crate::models::{PullRequestDiff, PullRequestSummary};

/// GitHub rejects requests without a user agent.
const USER_AGENT: &str = concat!("changecast/", env!("CARGO_PKG_VERSION"));

/// Gateway errors.
#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: bad or missing GitHub token")]
    Unauthorized,

    #[error("GitHub API error ({status}): {body}")]
    Api { status: StatusCode, body: String },
}

/// Raw pull request payload, trimmed to the fields we read.
#[derive(Debug, Deserialize)]
struct GhPull {
    number: u64,
    title: String,
    html_url: String,
    merged_at: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    api_url: String,
    owner: String,
    repo: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(config: GitHubConfig) -> Self {
        Self {
            client: Client::new(),
            api_url: config.api_url,
            owner: config.owner,
            repo: config.repo,
            token: config.token,
        }
    }

    /// Build a request with the mandatory user agent and optional auth.
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.api_url, path);
        let mut req = self
            .client
            .request(method, &url)
            .header(header::USER_AGENT, USER_AGENT);
        if let Some(ref token) = self.token {
            req = req.bearer_auth(token);
        }
        req
    }

    /// Map non-success statuses to [`GitHubError`].
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, GitHubError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::NOT_FOUND => Err(GitHubError::NotFound(body)),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(GitHubError::Unauthorized),
            _ => Err(GitHubError::Api { status, body }),
        }
    }

    /// List merged pull requests, most recently updated first.
    ///
    /// The API has no direct merged filter, so this pages through closed
    /// pulls and keeps the merged ones. The returned bool is true when
    /// GitHub served a full page, meaning another page may exist.
    pub async fn merged_pulls(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<(Vec<PullRequestSummary>, bool), GitHubError> {
        let path = format!("/repos/{}/{}/pulls", self.owner, self.repo);
        let response = self
            .request(Method::GET, &path)
            .header(header::ACCEPT, "application/vnd.github+json")
            .query(&[("state", "closed"), ("sort", "updated"), ("direction", "desc")])
            .query(&[("page", page), ("per_page", per_page)])
            .send()
            .await?;

        let pulls: Vec<GhPull> = Self::check(response).await?.json().await?;
        let full_page = pulls.len() as u32 == per_page;
        let merged = pulls
            .into_iter()
            .filter(|pull| pull.merged_at.is_some())
            .map(|pull| PullRequestSummary {
                id: pull.number.to_string(),
                description: pull.title,
                url: pull.html_url,
            })
            .collect();
        Ok((merged, full_page))
    }

    /// Fetch one pull request's metadata.
    async fn pull_request(&self, number: u64) -> Result<GhPull, GitHubError> {
        let path = format!("/repos/{}/{}/pulls/{}", self.owner, self.repo, number);
        let response = self
            .request(Method::GET, &path)
            .header(header::ACCEPT, "application/vnd.github+json")
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Fetch the unified diff text for a pull request.
    pub async fn pull_diff(&self, number: u64) -> Result<String, GitHubError> {
        let path = format!("/repos/{}/{}/pulls/{}", self.owner, self.repo, number);
        let response = self
            .request(Method::GET, &path)
            .header(header::ACCEPT, "application/vnd.github.diff")
            .send()
            .await?;
        Ok(Self::check(response).await?.text().await?)
    }

    /// Fetch metadata and diff together for one pull request.
    pub async fn pull_with_diff(&self, number: u64) -> Result<PullRequestDiff, GitHubError> {
        let pull = self.pull_request(number).await?;
        let diff = self.pull_diff(number).await?;
        Ok(PullRequestDiff {
            id: pull.number.to_string(),
            description: pull.title,
            url: pull.html_url,
            diff,
        })
    }
}
