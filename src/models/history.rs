use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted pair of release notes for one pull request.
///
/// Created once per completed generation cycle and never mutated afterwards.
/// A record always carries both the developer and the marketing note; a
/// partial result is never written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub id: Uuid,
    pub pr_id: String,
    pub pr_description: String,
    pub dev_note: String,
    pub mkt_note: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for persisting a generated note pair.
///
/// All four fields are required; [`CreateHistoryInput::validated`] rejects
/// absent and blank values so the handler can answer with a missing-fields
/// error before anything touches the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHistoryInput {
    #[serde(default)]
    pub pr_id: Option<String>,
    #[serde(default)]
    pub pr_description: Option<String>,
    #[serde(default)]
    pub dev_note: Option<String>,
    #[serde(default)]
    pub mkt_note: Option<String>,
}

/// A fully validated history insert.
#[derive(Debug, Clone)]
pub struct NewHistoryRecord {
    pub pr_id: String,
    pub pr_description: String,
    pub dev_note: String,
    pub mkt_note: String,
}

impl CreateHistoryInput {
    /// Check that every field is present and non-blank.
    pub fn validated(self) -> Option<NewHistoryRecord> {
        fn required(value: Option<String>) -> Option<String> {
            value
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        }

        Some(NewHistoryRecord {
            pr_id: required(self.pr_id)?,
            pr_description: required(self.pr_description)?,
            dev_note: required(self.dev_note)?,
            mkt_note: required(self.mkt_note)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_input() -> CreateHistoryInput {
        CreateHistoryInput {
            pr_id: Some("42".to_string()),
            pr_description: Some("Add retry logic".to_string()),
            dev_note: Some("Added exponential backoff to the client".to_string()),
            mkt_note: Some("Improved reliability when the network flakes".to_string()),
        }
    }

    #[test]
    fn accepts_complete_input() {
        let record = full_input().validated().expect("should validate");
        assert_eq!(record.pr_id, "42");
        assert_eq!(record.mkt_note, "Improved reliability when the network flakes");
    }

    #[test]
    fn rejects_missing_field() {
        let mut input = full_input();
        input.mkt_note = None;
        assert!(input.validated().is_none());
    }

    #[test]
    fn rejects_blank_field() {
        let mut input = full_input();
        input.dev_note = Some("   ".to_string());
        assert!(input.validated().is_none());
    }
}
