//! Deadline policy: classifies a submission instant against the assignment cutoff.

use crate::domain::submission::Status;
use chrono::{DateTime, Utc};

/// Classifies a submission as on-time or late.
///
/// Late iff `submitted_at` is strictly after `deadline`; a submission landing
/// exactly on the deadline is on time. The deadline is injected by the caller
/// rather than read from ambient state so the policy stays a pure function.
pub fn classify(submitted_at: DateTime<Utc>, deadline: DateTime<Utc>) -> Status {
    if submitted_at > deadline {
        Status::Late
    } else {
        Status::Submitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn deadline() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn before_deadline_is_submitted() {
        let at = deadline() - Duration::minutes(1);
        assert_eq!(classify(at, deadline()), Status::Submitted);
    }

    #[test]
    fn after_deadline_is_late() {
        let at = deadline() + Duration::minutes(1);
        assert_eq!(classify(at, deadline()), Status::Late);
    }

    #[test]
    fn exactly_on_deadline_is_submitted() {
        // Strict > comparison: the boundary instant counts as on time.
        assert_eq!(classify(deadline(), deadline()), Status::Submitted);
    }

    #[test]
    fn one_nanosecond_late_is_late() {
        let at = deadline() + Duration::nanoseconds(1);
        assert_eq!(classify(at, deadline()), Status::Late);
    }
}
