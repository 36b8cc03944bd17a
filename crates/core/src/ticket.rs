//! Ticket record and its status/priority vocabularies.

use serde::{Deserialize, Serialize};

use crate::directory::User;
use crate::types::{RecordId, RecordTime};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Pending,
    InProgress,
    Completed,
    Declined,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 4] = [
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::Declined,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Declined => "declined",
        }
    }

    /// Parse the canonical snake_case form.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }

    /// Completed and declined tickets carry no urgency.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Declined)
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        [Self::High, Self::Medium, Self::Low]
            .into_iter()
            .find(|p| p.as_str() == s)
    }
}

// ---------------------------------------------------------------------------
// Ticket
// ---------------------------------------------------------------------------

/// A support ticket in canonical form.
///
/// Field aliases and loosely typed upstream payloads are resolved before a
/// `Ticket` is built; nothing in this crate inspects raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: Priority,
    pub created_at: RecordTime,
    pub due_date: Option<RecordTime>,
    pub creator_id: RecordId,
    /// Embedded creator, when the listing expands it.
    pub creator: Option<User>,
    pub assignee_id: Option<RecordId>,
    /// Embedded assignee, when the listing expands it.
    pub assignee: Option<User>,
    pub department_id: Option<RecordId>,
    pub department_name: Option<String>,
    /// Head of the department the ticket is assigned to.
    pub department_head_id: Option<RecordId>,
    pub forwarded_to_id: Option<RecordId>,
    pub forwarded_from_id: Option<RecordId>,
    pub is_forwarded: bool,
    pub current_handler_id: Option<RecordId>,
}

impl Ticket {
    /// A ticket with the required fields set and everything else empty.
    pub fn new(
        id: impl Into<RecordId>,
        title: impl Into<String>,
        status: TicketStatus,
        created_at: impl Into<RecordTime>,
        creator_id: impl Into<RecordId>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            status,
            priority: Priority::default(),
            created_at: created_at.into(),
            due_date: None,
            creator_id: creator_id.into(),
            creator: None,
            assignee_id: None,
            assignee: None,
            department_id: None,
            department_name: None,
            department_head_id: None,
            forwarded_to_id: None,
            forwarded_from_id: None,
            is_forwarded: false,
            current_handler_id: None,
        }
    }

    /// Display name of the embedded creator, empty when not expanded.
    pub fn creator_name(&self) -> String {
        self.creator
            .as_ref()
            .map(User::display_name)
            .unwrap_or_default()
    }
}
