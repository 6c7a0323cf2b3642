//! Domain models for changecast.
//!
//! Two families:
//!
//! - Pull request views ([`PullRequestSummary`], [`PullRequestDiff`]):
//!   fetched from GitHub per request, never persisted.
//! - History ([`HistoryRecord`]): the persisted pair of release notes for
//!   one pull request, append-then-delete only.
//!
//! JSON field names are camelCase throughout; that is the wire contract the
//! browsing client speaks.

mod history;
mod pr;

pub use history::*;
pub use pr::*;
