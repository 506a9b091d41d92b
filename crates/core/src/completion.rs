//! Session completion status and the certificate trigger rule.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Progress state of a trainee working through a session's courses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    InProgress,
    Completed,
    Failed,
}

impl CompletionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CompletionStatus::InProgress => "in_progress",
            CompletionStatus::Completed => "completed",
            CompletionStatus::Failed => "failed",
        }
    }
}

impl FromStr for CompletionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_progress" => Ok(CompletionStatus::InProgress),
            "completed" => Ok(CompletionStatus::Completed),
            "failed" => Ok(CompletionStatus::Failed),
            other => Err(format!("Unknown completion status '{other}'")),
        }
    }
}

impl fmt::Display for CompletionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A completion counts as finished once `completed_at` is set.
pub fn is_completed(completed_at: Option<Timestamp>) -> bool {
    completed_at.is_some()
}

/// The certificate pipeline runs exactly when a completion is finished and no
/// certificate has been issued yet.
pub fn certificate_due(completed_at: Option<Timestamp>, certificate_issued: bool) -> bool {
    is_completed(completed_at) && !certificate_issued
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_completed_requires_timestamp() {
        assert!(!is_completed(None));
        assert!(is_completed(Some(Utc::now())));
    }

    #[test]
    fn test_certificate_due_once() {
        let done = Some(Utc::now());
        assert!(certificate_due(done, false));
        assert!(!certificate_due(done, true));
        assert!(!certificate_due(None, false));
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            CompletionStatus::InProgress,
            CompletionStatus::Completed,
            CompletionStatus::Failed,
        ] {
            assert_eq!(status.as_str().parse::<CompletionStatus>().unwrap(), status);
        }
    }
}
