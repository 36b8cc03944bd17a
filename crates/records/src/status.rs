//! Status and priority spellings seen upstream, mapped onto the canonical
//! vocabularies.

use ticketdesk_core::task::TaskStatus;
use ticketdesk_core::ticket::{Priority, TicketStatus};

use crate::error::{RecordError, RecordResult};

/// Lowercase, trim, and turn spaces and hyphens into underscores, then fold
/// known synonyms.
fn canonical(raw: &str) -> String {
    let folded = raw.trim().to_lowercase().replace([' ', '-'], "_");
    match folded.as_str() {
        "inprogress" => "in_progress".to_string(),
        "resolved" => "completed".to_string(),
        _ => folded,
    }
}

pub fn ticket_status(raw: &str) -> RecordResult<TicketStatus> {
    TicketStatus::parse(&canonical(raw)).ok_or_else(|| RecordError::UnknownStatus {
        entity: "ticket",
        value: raw.to_string(),
    })
}

pub fn task_status(raw: &str) -> RecordResult<TaskStatus> {
    TaskStatus::parse(&canonical(raw)).ok_or_else(|| RecordError::UnknownStatus {
        entity: "task",
        value: raw.to_string(),
    })
}

/// Unknown or missing priorities default to medium.
pub fn priority(raw: Option<&str>) -> Priority {
    match raw.map(|r| r.trim().to_lowercase()) {
        Some(p) => Priority::parse(&p).unwrap_or_else(|| {
            tracing::debug!(priority = %p, "Unknown priority, defaulting to medium");
            Priority::default()
        }),
        None => Priority::default(),
    }
}
