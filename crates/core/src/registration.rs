//! Registration lifecycle state machine.
//!
//! A registration starts `pending` and may move to `confirmed` (approve) or
//! `cancelled` (reject). Both transitions are decided by the coordinator who
//! owns the session; that ownership check happens in the API layer with the
//! authenticated caller, while the pure transition rules live here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::schedule::SessionPhase;

/// Lifecycle state of a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl RegistrationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "pending",
            RegistrationStatus::Confirmed => "confirmed",
            RegistrationStatus::Cancelled => "cancelled",
        }
    }

    /// Transition for a coordinator approval. Only `pending` registrations
    /// can be approved; approving a decided registration is a validation
    /// error, not a no-op.
    pub fn approve(self) -> Result<RegistrationStatus, CoreError> {
        match self {
            RegistrationStatus::Pending => Ok(RegistrationStatus::Confirmed),
            other => Err(CoreError::Validation(format!(
                "Cannot approve a registration with status '{other}'"
            ))),
        }
    }

    /// Transition for a coordinator rejection. Same precondition as
    /// [`approve`](Self::approve).
    pub fn reject(self) -> Result<RegistrationStatus, CoreError> {
        match self {
            RegistrationStatus::Pending => Ok(RegistrationStatus::Cancelled),
            other => Err(CoreError::Validation(format!(
                "Cannot reject a registration with status '{other}'"
            ))),
        }
    }

    /// Whether a trainee may still cancel: the registration must not already
    /// be cancelled, and the session must not have started yet.
    pub fn can_be_cancelled(self, phase: SessionPhase) -> bool {
        let status_allows = matches!(
            self,
            RegistrationStatus::Pending | RegistrationStatus::Confirmed
        );
        status_allows && phase == SessionPhase::Scheduled
    }
}

impl FromStr for RegistrationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RegistrationStatus::Pending),
            "confirmed" => Ok(RegistrationStatus::Confirmed),
            "cancelled" => Ok(RegistrationStatus::Cancelled),
            other => Err(format!("Unknown registration status '{other}'")),
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
