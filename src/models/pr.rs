use serde::{Deserialize, Serialize};

/// One merged pull request in the browse listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestSummary {
    /// Pull request number, stringified for the client.
    pub id: String,
    /// Pull request title.
    pub description: String,
    /// Link to the pull request on GitHub.
    pub url: String,
}

/// A pull request together with its raw unified diff.
///
/// Fetched on demand, immutable, and never persisted; it lives for one
/// request/response cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestDiff {
    pub id: String,
    pub description: String,
    pub url: String,
    pub diff: String,
}

/// Response body of the single-pull route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestDiffs {
    pub diffs: Vec<PullRequestDiff>,
}

/// One page of the merged-pull listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestPage {
    pub diffs: Vec<PullRequestSummary>,
    pub current_page: u32,
    pub per_page: u32,
    /// Next page number, or None when this page came back short.
    pub next_page: Option<u32>,
}
