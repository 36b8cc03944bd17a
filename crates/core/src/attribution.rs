//! Department attribution.
//!
//! Upstream records reference their department inconsistently: by id, by
//! name, only through the assigned user or the creator, and with ids that
//! are sometimes numbers and sometimes strings. Attribution tries each path
//! in a fixed order and reports which one matched.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::directory::{Department, User};
use crate::error::CoreError;
use crate::task::Task;
use crate::ticket::Ticket;
use crate::types::{RecordId, RecordTime, Timestamp};

// ---------------------------------------------------------------------------
// Attributable records
// ---------------------------------------------------------------------------

/// A record that can be attributed to a department.
pub trait Attributable {
    /// Entity name used in diagnostics (`"task"`, `"ticket"`).
    fn entity(&self) -> &'static str;
    fn record_id(&self) -> &RecordId;
    fn created_at(&self) -> &RecordTime;
    fn department_id(&self) -> Option<&RecordId>;
    fn department_name(&self) -> Option<&str>;
    fn assignee(&self) -> Option<&User>;
    fn creator(&self) -> Option<&User>;
}

impl Attributable for Task {
    fn entity(&self) -> &'static str {
        "task"
    }

    fn record_id(&self) -> &RecordId {
        &self.id
    }

    fn created_at(&self) -> &RecordTime {
        &self.created_at
    }

    fn department_id(&self) -> Option<&RecordId> {
        self.department_id.as_ref()
    }

    fn department_name(&self) -> Option<&str> {
        self.department_name.as_deref()
    }

    fn assignee(&self) -> Option<&User> {
        self.assigned_to.as_ref()
    }

    fn creator(&self) -> Option<&User> {
        self.created_by.as_ref()
    }
}

impl Attributable for Ticket {
    fn entity(&self) -> &'static str {
        "ticket"
    }

    fn record_id(&self) -> &RecordId {
        &self.id
    }

    fn created_at(&self) -> &RecordTime {
        &self.created_at
    }

    fn department_id(&self) -> Option<&RecordId> {
        self.department_id.as_ref()
    }

    fn department_name(&self) -> Option<&str> {
        self.department_name.as_deref()
    }

    fn assignee(&self) -> Option<&User> {
        self.assignee.as_ref()
    }

    fn creator(&self) -> Option<&User> {
        self.creator.as_ref()
    }
}

// ---------------------------------------------------------------------------
// Match paths
// ---------------------------------------------------------------------------

/// Which strategy attributed a record to a department, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPath {
    DirectId,
    DirectName,
    AssigneeId,
    AssigneeName,
    CreatorId,
    CreatorName,
    /// String-coerced id on the record, its assignee, or its creator.
    CoercedId,
}

/// Determine how, if at all, `record` belongs to `department`.
///
/// Strict id and exact name comparisons are tried first (record, then
/// assignee, then creator); the string-coerced id comparison is the last
/// resort.
pub fn attribution_path<R: Attributable + ?Sized>(
    record: &R,
    department: &Department,
) -> Option<MatchPath> {
    let name_matches = |name: Option<&str>| name.is_some_and(|n| n == department.name);
    let strict = |id: Option<&RecordId>| id.is_some_and(|i| *i == department.id);
    let loose = |id: Option<&RecordId>| id.is_some_and(|i| i.loose_eq(&department.id));

    let assignee_id = record.assignee().and_then(|u| u.department_id.as_ref());
    let assignee_name = record.assignee().and_then(|u| u.department_name.as_deref());
    let creator_id = record.creator().and_then(|u| u.department_id.as_ref());
    let creator_name = record.creator().and_then(|u| u.department_name.as_deref());

    if strict(record.department_id()) {
        Some(MatchPath::DirectId)
    } else if name_matches(record.department_name()) {
        Some(MatchPath::DirectName)
    } else if strict(assignee_id) {
        Some(MatchPath::AssigneeId)
    } else if name_matches(assignee_name) {
        Some(MatchPath::AssigneeName)
    } else if strict(creator_id) {
        Some(MatchPath::CreatorId)
    } else if name_matches(creator_name) {
        Some(MatchPath::CreatorName)
    } else if loose(record.department_id()) || loose(assignee_id) || loose(creator_id) {
        Some(MatchPath::CoercedId)
    } else {
        None
    }
}

/// Whether `record` belongs to `department` by any strategy.
pub fn attribute<R: Attributable + ?Sized>(record: &R, department: &Department) -> bool {
    attribution_path(record, department).is_some()
}

/// The first department in `departments` that `record` belongs to.
pub fn attribute_first<'d, R: Attributable + ?Sized>(
    record: &R,
    departments: &'d [Department],
) -> Option<&'d Department> {
    departments.iter().find(|d| attribute(record, *d))
}

// ---------------------------------------------------------------------------
// Date window
// ---------------------------------------------------------------------------

/// Inclusive `[start, end]` creation-time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl DateWindow {
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, CoreError> {
        if start > end {
            return Err(CoreError::Validation(format!(
                "Date window start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Whole calendar days, from midnight on `first` through the last
    /// instant of `last` (UTC).
    pub fn from_dates(first: NaiveDate, last: NaiveDate) -> Result<Self, CoreError> {
        let start = first
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| CoreError::Validation(format!("Invalid start date {first}")))?;
        let end = last
            .and_hms_nano_opt(23, 59, 59, 999_999_999)
            .ok_or_else(|| CoreError::Validation(format!("Invalid end date {last}")))?;
        Self::new(Utc.from_utc_datetime(&start), Utc.from_utc_datetime(&end))
    }

    /// The `days` days leading up to and including `now`. The start is
    /// clamped to the earliest representable instant.
    pub fn last_days(now: Timestamp, days: u32) -> Self {
        let start = now
            .checked_sub_signed(Duration::days(i64::from(days)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self { start, end: now }
    }

    pub fn contains(&self, ts: Timestamp) -> bool {
        self.start <= ts && ts <= self.end
    }

    /// Whether a record's creation time falls inside the window. Records
    /// with a malformed `created_at` are never admitted.
    pub fn admits<R: Attributable + ?Sized>(&self, record: &R) -> bool {
        record.created_at().valid().is_some_and(|ts| self.contains(ts))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
