//! Derived session phase.
//!
//! A training session's phase (scheduled/ongoing/completed) is a pure
//! function of wall-clock time against the stored date and time range. It is
//! never persisted; every read recomputes it, so it cannot drift from real
//! time. The persisted `status` column (`active`/`archived`) is a separate
//! concept and is not handled here.

use std::fmt;

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Where a session sits relative to the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Scheduled,
    Ongoing,
    Completed,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionPhase::Scheduled => "scheduled",
            SessionPhase::Ongoing => "ongoing",
            SessionPhase::Completed => "completed",
        };
        f.write_str(s)
    }
}

/// Compute the phase of a session at instant `now`.
///
/// - `now < start`          → [`SessionPhase::Scheduled`]
/// - `start <= now <= end`  → [`SessionPhase::Ongoing`] (both ends inclusive)
/// - `now > end`            → [`SessionPhase::Completed`]
///
/// Session times are stored as a local-free date plus start/end times and
/// interpreted as UTC.
pub fn phase_at(
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    now: Timestamp,
) -> SessionPhase {
    let start = Utc.from_utc_datetime(&date.and_time(start_time));
    let end = Utc.from_utc_datetime(&date.and_time(end_time));

    if now < start {
        SessionPhase::Scheduled
    } else if now <= end {
        SessionPhase::Ongoing
    } else {
        SessionPhase::Completed
    }
}

/// Validate a session's time range: the end must be strictly after the start.
///
/// Enforced at session creation and update; violations surface as 422.
pub fn validate_time_range(start_time: NaiveTime, end_time: NaiveTime) -> Result<(), CoreError> {
    if end_time <= start_time {
        return Err(CoreError::Validation(
            "Session end time must be after start time".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session() -> (NaiveDate, NaiveTime, NaiveTime) {
        (
            NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        )
    }

    fn start_instant() -> Timestamp {
        let (date, start, _) = session();
        Utc.from_utc_datetime(&date.and_time(start))
    }

    fn end_instant() -> Timestamp {
        let (date, _, end) = session();
        Utc.from_utc_datetime(&date.and_time(end))
    }

    #[test]
    fn test_before_start_is_scheduled() {
        let (date, start, end) = session();
        let now = start_instant() - Duration::seconds(1);
        assert_eq!(phase_at(date, start, end, now), SessionPhase::Scheduled);
    }

    #[test]
    fn test_exactly_at_start_is_ongoing() {
        let (date, start, end) = session();
        assert_eq!(
            phase_at(date, start, end, start_instant()),
            SessionPhase::Ongoing
        );
    }

    #[test]
    fn test_exactly_at_end_is_ongoing() {
        let (date, start, end) = session();
        assert_eq!(
            phase_at(date, start, end, end_instant()),
            SessionPhase::Ongoing
        );
    }

    #[test]
    fn test_after_end_is_completed() {
        let (date, start, end) = session();
        let now = end_instant() + Duration::seconds(1);
        assert_eq!(phase_at(date, start, end, now), SessionPhase::Completed);
    }

    #[test]
    fn test_end_before_start_rejected() {
        let start = NaiveTime::from_hms_opt(14, 0, 0).unwrap();
        let end = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        assert!(validate_time_range(start, end).is_err());
    }

    #[test]
    fn test_end_equal_to_start_rejected() {
        let t = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        assert!(validate_time_range(t, t).is_err());
    }

    #[test]
    fn test_valid_range_accepted() {
        let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let end = NaiveTime::from_hms_opt(9, 0, 1).unwrap();
        assert!(validate_time_range(start, end).is_ok());
    }
}
