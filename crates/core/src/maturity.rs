//! Ticket maturity classification.
//!
//! Maps a ticket's status, age, and due date to an urgency badge. The result
//! is a pure function of `(status, created_at, due_date, now)` and is never
//! stored on the ticket.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::ticket::{Ticket, TicketStatus};
use crate::types::{RecordTime, Timestamp};

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// In-progress tickets younger than this (inclusive) are "Fresh".
pub const DEFAULT_FRESH_HOURS: i64 = 72;

/// In-progress tickets younger than this (inclusive) are "Aging".
pub const DEFAULT_AGING_HOURS: i64 = 144;

/// Pending tickets due within this many hours are "Due Soon".
pub const DEFAULT_DUE_SOON_HOURS: i64 = 24;

/// Pending tickets due within this many hours get the warning badge.
pub const DEFAULT_DUE_WARNING_HOURS: i64 = 72;

const HOURS_PER_DAY: f64 = 24.0;
const MILLIS_PER_HOUR: f64 = 3_600_000.0;

pub const LABEL_FRESH: &str = "Fresh";
pub const LABEL_AGING: &str = "Aging";
pub const LABEL_STALE: &str = "Stale";
pub const LABEL_DUE_SOON: &str = "Due Soon";

/// Hour boundaries used by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaturityThresholds {
    pub fresh_hours: i64,
    pub aging_hours: i64,
    pub due_soon_hours: i64,
    pub due_warning_hours: i64,
}

impl Default for MaturityThresholds {
    fn default() -> Self {
        Self {
            fresh_hours: DEFAULT_FRESH_HOURS,
            aging_hours: DEFAULT_AGING_HOURS,
            due_soon_hours: DEFAULT_DUE_SOON_HOURS,
            due_warning_hours: DEFAULT_DUE_WARNING_HOURS,
        }
    }
}

impl MaturityThresholds {
    /// All bounds must be positive and each pair strictly increasing.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (name, value) in [
            ("fresh_hours", self.fresh_hours),
            ("aging_hours", self.aging_hours),
            ("due_soon_hours", self.due_soon_hours),
            ("due_warning_hours", self.due_warning_hours),
        ] {
            if value <= 0 {
                return Err(CoreError::Validation(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        if self.fresh_hours >= self.aging_hours {
            return Err(CoreError::Validation(format!(
                "fresh_hours ({}) must be less than aging_hours ({})",
                self.fresh_hours, self.aging_hours
            )));
        }

        if self.due_soon_hours >= self.due_warning_hours {
            return Err(CoreError::Validation(format!(
                "due_soon_hours ({}) must be less than due_warning_hours ({})",
                self.due_soon_hours, self.due_warning_hours
            )));
        }

        Ok(())
    }

    /// Label for the pending-with-upcoming-due-date warning, e.g. `"Due in 3 days"`.
    /// Partial days round up.
    pub fn due_warning_label(&self) -> String {
        let days = (self.due_warning_hours + 23) / 24;
        if days == 1 {
            "Due in 1 day".to_string()
        } else {
            format!("Due in {days} days")
        }
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// An urgency badge: a severity color and its display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maturity {
    pub color: Severity,
    pub text: String,
}

impl Maturity {
    fn new(color: Severity, text: impl Into<String>) -> Self {
        Self {
            color,
            text: text.into(),
        }
    }

    fn overdue(days: i64) -> Self {
        Self::new(Severity::Error, overdue_label(days))
    }
}

/// `"Overdue by 1 day"`, `"Overdue by 3 days"`.
pub fn overdue_label(days: i64) -> String {
    if days == 1 {
        "Overdue by 1 day".to_string()
    } else {
        format!("Overdue by {days} days")
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classify a ticket with the default thresholds.
pub fn classify(ticket: &Ticket, now: Timestamp) -> Option<Maturity> {
    classify_with(ticket, now, &MaturityThresholds::default())
}

/// Classify a ticket. Rules are evaluated in order and the first match wins:
///
/// 1. Completed or declined: no badge.
/// 2. Due date in the past: "Overdue by N day(s)".
/// 3. In progress: "Fresh", "Aging" or "Stale" by hours since creation.
/// 4. Pending with a due date: "Due Soon" or the warning badge by hours
///    until due.
/// 5. Anything else: no badge.
///
/// A malformed `created_at` or `due_date` yields no badge.
pub fn classify_with(
    ticket: &Ticket,
    now: Timestamp,
    thresholds: &MaturityThresholds,
) -> Option<Maturity> {
    if ticket.status.is_terminal() {
        return None;
    }

    let created_at = ticket.created_at.valid()?;
    let due_date = match &ticket.due_date {
        None => None,
        Some(RecordTime::Valid(ts)) => Some(*ts),
        Some(RecordTime::Malformed(_)) => return None,
    };

    if let Some(due) = due_date {
        if due < now {
            return Some(Maturity::overdue((now - due).num_days()));
        }
    }

    match (ticket.status, due_date) {
        (TicketStatus::InProgress, _) => {
            let age = hours_between(created_at, now);
            if age <= thresholds.fresh_hours as f64 {
                Some(Maturity::new(Severity::Success, LABEL_FRESH))
            } else if age <= thresholds.aging_hours as f64 {
                Some(Maturity::new(Severity::Warning, LABEL_AGING))
            } else {
                Some(Maturity::new(Severity::Error, LABEL_STALE))
            }
        }
        (TicketStatus::Pending, Some(due)) => {
            let lead = hours_between(now, due);
            if lead < 0.0 {
                // Unreachable while the overdue check above runs first.
                Some(Maturity::overdue((lead.abs() / HOURS_PER_DAY).floor() as i64))
            } else if lead <= thresholds.due_soon_hours as f64 {
                Some(Maturity::new(Severity::Error, LABEL_DUE_SOON))
            } else if lead <= thresholds.due_warning_hours as f64 {
                Some(Maturity::new(
                    Severity::Warning,
                    thresholds.due_warning_label(),
                ))
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Fractional hours from `from` to `to` (negative if `to` is earlier).
fn hours_between(from: Timestamp, to: Timestamp) -> f64 {
    (to - from).num_milliseconds() as f64 / MILLIS_PER_HOUR
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{Duration, TimeZone, Utc};

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn ticket(status: TicketStatus, age: Duration, due_in: Option<Duration>) -> Ticket {
        let mut t = Ticket::new(1, "Broken laptop", status, now() - age, 10);
        t.due_date = due_in.map(|d| RecordTime::Valid(now() + d));
        t
    }

    fn badge(color: Severity, text: &str) -> Option<Maturity> {
        Some(Maturity::new(color, text))
    }

    // -- terminal statuses ---------------------------------------------------

    #[test]
    fn completed_and_declined_have_no_badge_regardless_of_dates() {
        for status in [TicketStatus::Completed, TicketStatus::Declined] {
            let overdue = ticket(status, Duration::days(30), Some(-Duration::days(10)));
            assert_eq!(classify(&overdue, now()), None);
            let stale = ticket(status, Duration::hours(500), None);
            assert_eq!(classify(&stale, now()), None);
        }
    }

    #[test]
    fn terminal_status_wins_over_malformed_dates() {
        let mut t = ticket(TicketStatus::Completed, Duration::hours(1), None);
        t.created_at = RecordTime::parse("garbage");
        assert_eq!(classify(&t, now()), None);
    }

    // -- in progress ---------------------------------------------------------

    #[test]
    fn in_progress_50h_is_fresh() {
        let t = ticket(TicketStatus::InProgress, Duration::hours(50), None);
        assert_eq!(classify(&t, now()), badge(Severity::Success, "Fresh"));
    }

    #[test]
    fn in_progress_exactly_72h_is_still_fresh() {
        let t = ticket(TicketStatus::InProgress, Duration::hours(72), None);
        assert_eq!(classify(&t, now()), badge(Severity::Success, "Fresh"));
    }

    #[test]
    fn in_progress_100h_is_aging() {
        let t = ticket(TicketStatus::InProgress, Duration::hours(100), None);
        assert_eq!(classify(&t, now()), badge(Severity::Warning, "Aging"));
    }

    #[test]
    fn in_progress_just_over_72h_is_aging() {
        let t = ticket(
            TicketStatus::InProgress,
            Duration::hours(72) + Duration::minutes(1),
            None,
        );
        assert_eq!(classify(&t, now()), badge(Severity::Warning, "Aging"));
    }

    #[test]
    fn in_progress_exactly_144h_is_aging() {
        let t = ticket(TicketStatus::InProgress, Duration::hours(144), None);
        assert_eq!(classify(&t, now()), badge(Severity::Warning, "Aging"));
    }

    #[test]
    fn in_progress_200h_is_stale() {
        let t = ticket(TicketStatus::InProgress, Duration::hours(200), None);
        assert_eq!(classify(&t, now()), badge(Severity::Error, "Stale"));
    }

    #[test]
    fn in_progress_with_future_due_date_uses_age() {
        let t = ticket(
            TicketStatus::InProgress,
            Duration::hours(10),
            Some(Duration::hours(5)),
        );
        assert_eq!(classify(&t, now()), badge(Severity::Success, "Fresh"));
    }

    // -- overdue -------------------------------------------------------------

    #[test]
    fn pending_two_days_past_due_is_overdue_by_2_days() {
        let t = ticket(
            TicketStatus::Pending,
            Duration::days(5),
            Some(-Duration::days(2)),
        );
        assert_eq!(
            classify(&t, now()),
            badge(Severity::Error, "Overdue by 2 days")
        );
    }

    #[test]
    fn overdue_days_are_floored() {
        let t = ticket(
            TicketStatus::InProgress,
            Duration::days(5),
            Some(-(Duration::days(1) + Duration::hours(23))),
        );
        assert_eq!(
            classify(&t, now()),
            badge(Severity::Error, "Overdue by 1 day")
        );
    }

    #[test]
    fn overdue_by_less_than_a_day_reports_zero_days() {
        let t = ticket(
            TicketStatus::Pending,
            Duration::days(1),
            Some(-Duration::hours(3)),
        );
        assert_eq!(
            classify(&t, now()),
            badge(Severity::Error, "Overdue by 0 days")
        );
    }

    #[test]
    fn overdue_beats_in_progress_age() {
        let t = ticket(
            TicketStatus::InProgress,
            Duration::hours(1),
            Some(-Duration::days(4)),
        );
        assert_eq!(
            classify(&t, now()),
            badge(Severity::Error, "Overdue by 4 days")
        );
    }

    // -- pending with due date -----------------------------------------------

    #[test]
    fn pending_due_within_a_day_is_due_soon() {
        let t = ticket(TicketStatus::Pending, Duration::hours(1), Some(Duration::hours(5)));
        assert_eq!(classify(&t, now()), badge(Severity::Error, "Due Soon"));
    }

    #[test]
    fn pending_due_exactly_now_is_due_soon() {
        let t = ticket(TicketStatus::Pending, Duration::hours(1), Some(Duration::zero()));
        assert_eq!(classify(&t, now()), badge(Severity::Error, "Due Soon"));
    }

    #[test]
    fn pending_due_in_two_days_gets_warning() {
        let t = ticket(TicketStatus::Pending, Duration::hours(1), Some(Duration::hours(48)));
        assert_eq!(
            classify(&t, now()),
            badge(Severity::Warning, "Due in 3 days")
        );
    }

    #[test]
    fn pending_due_in_exactly_72h_gets_warning() {
        let t = ticket(TicketStatus::Pending, Duration::hours(1), Some(Duration::hours(72)));
        assert_eq!(
            classify(&t, now()),
            badge(Severity::Warning, "Due in 3 days")
        );
    }

    #[test]
    fn pending_due_far_in_future_has_no_badge() {
        let t = ticket(TicketStatus::Pending, Duration::hours(1), Some(Duration::hours(73)));
        assert_eq!(classify(&t, now()), None);
    }

    #[test]
    fn pending_without_due_date_has_no_badge() {
        let t = ticket(TicketStatus::Pending, Duration::days(40), None);
        assert_eq!(classify(&t, now()), None);
    }

    // -- malformed timestamps ------------------------------------------------

    #[test]
    fn malformed_created_at_has_no_badge() {
        let mut t = ticket(TicketStatus::InProgress, Duration::hours(1), None);
        t.created_at = RecordTime::parse("not-a-date");
        assert_eq!(classify(&t, now()), None);
    }

    #[test]
    fn malformed_due_date_has_no_badge() {
        let mut t = ticket(TicketStatus::InProgress, Duration::hours(1), None);
        t.due_date = Some(RecordTime::parse("31/31/2024"));
        assert_eq!(classify(&t, now()), None);
    }

    // -- thresholds ----------------------------------------------------------

    #[test]
    fn custom_thresholds_shift_boundaries() {
        let thresholds = MaturityThresholds {
            fresh_hours: 24,
            aging_hours: 48,
            due_soon_hours: 12,
            due_warning_hours: 120,
        };
        let t = ticket(TicketStatus::InProgress, Duration::hours(30), None);
        assert_eq!(
            classify_with(&t, now(), &thresholds),
            badge(Severity::Warning, "Aging")
        );

        let p = ticket(TicketStatus::Pending, Duration::hours(1), Some(Duration::hours(100)));
        assert_eq!(
            classify_with(&p, now(), &thresholds),
            badge(Severity::Warning, "Due in 5 days")
        );
    }

    #[test]
    fn warning_label_rounds_partial_days_up() {
        let label = |due_warning_hours| {
            MaturityThresholds {
                fresh_hours: 1,
                aging_hours: 2,
                due_soon_hours: 1,
                due_warning_hours,
            }
            .due_warning_label()
        };
        assert_eq!(label(72), "Due in 3 days");
        assert_eq!(label(30), "Due in 2 days");
        assert_eq!(label(24), "Due in 1 day");
        assert_eq!(label(12), "Due in 1 day");
    }

    #[test]
    fn default_thresholds_are_valid() {
        assert!(MaturityThresholds::default().validate().is_ok());
    }

    #[test]
    fn thresholds_reject_non_positive_values() {
        let thresholds = MaturityThresholds {
            fresh_hours: 0,
            ..MaturityThresholds::default()
        };
        assert_matches!(thresholds.validate(), Err(CoreError::Validation(msg)) if msg.contains("fresh_hours"));
    }

    #[test]
    fn thresholds_reject_inverted_pairs() {
        let aging = MaturityThresholds {
            fresh_hours: 200,
            ..MaturityThresholds::default()
        };
        assert!(aging.validate().is_err());

        let due = MaturityThresholds {
            due_soon_hours: 72,
            ..MaturityThresholds::default()
        };
        assert!(due.validate().is_err());
    }

    // -- serialization -------------------------------------------------------

    #[test]
    fn maturity_serializes_as_color_and_text() {
        let json = serde_json::to_value(Maturity::new(Severity::Warning, "Aging")).unwrap();
        assert_eq!(json, serde_json::json!({"color": "warning", "text": "Aging"}));
    }
}
