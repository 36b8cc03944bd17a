//! Ticket views: partitioning by the current user's relationship to a ticket,
//! then free-text search and status filtering.
//!
//! The user is always passed in explicitly; nothing here reads session state.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::ticket::Ticket;
use crate::types::{id_matches, RecordId};

// ---------------------------------------------------------------------------
// View tabs
// ---------------------------------------------------------------------------

/// Sentinel status filter value that matches every ticket.
pub const STATUS_FILTER_ALL: &str = "all";

/// The three ticket list tabs, indexed 0..=2 in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewTab {
    /// Tickets the user created.
    Sent,
    /// Tickets assigned, forwarded, or handed to the user or their department.
    Received,
    /// Tickets the user forwarded to someone else.
    Forwarded,
}

impl ViewTab {
    pub const ALL: [ViewTab; 3] = [Self::Sent, Self::Received, Self::Forwarded];

    pub fn index(self) -> u8 {
        match self {
            Self::Sent => 0,
            Self::Received => 1,
            Self::Forwarded => 2,
        }
    }
}

impl TryFrom<u8> for ViewTab {
    type Error = CoreError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.index() == index)
            .ok_or_else(|| {
                CoreError::Validation(format!("Invalid view tab {index}. Must be 0, 1 or 2"))
            })
    }
}

/// Whether `ticket` belongs to `tab` for `user_id`.
///
/// Identifier comparisons are loose so that numeric and string forms of the
/// same user id match.
pub fn in_view(ticket: &Ticket, tab: ViewTab, user_id: &RecordId) -> bool {
    match tab {
        ViewTab::Sent => ticket.creator_id.loose_eq(user_id),
        ViewTab::Received => {
            id_matches(ticket.assignee_id.as_ref(), user_id)
                || id_matches(ticket.department_head_id.as_ref(), user_id)
                || id_matches(ticket.forwarded_to_id.as_ref(), user_id)
                || id_matches(ticket.current_handler_id.as_ref(), user_id)
        }
        ViewTab::Forwarded => {
            id_matches(ticket.forwarded_from_id.as_ref(), user_id)
                || (ticket.creator_id.loose_eq(user_id) && ticket.is_forwarded)
        }
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Status filter as selected in the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(String),
}

impl StatusFilter {
    /// `"all"` (any case) and the empty string select everything.
    ///
    /// Surrounding whitespace is trimmed first, so `" pending "` selects
    /// pending tickets and `"  "` selects everything. The status name itself
    /// must still match exactly, ignoring case.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(STATUS_FILTER_ALL) {
            Self::All
        } else {
            Self::Only(trimmed.to_string())
        }
    }

    pub fn matches(&self, ticket: &Ticket) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => ticket.status.as_str().eq_ignore_ascii_case(status),
        }
    }
}

/// Case-insensitive substring match against title, description, and the
/// creator's display name. An empty query matches everything.
pub fn matches_search(ticket: &Ticket, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    ticket.title.to_lowercase().contains(&needle)
        || ticket.description.to_lowercase().contains(&needle)
        || ticket.creator_name().to_lowercase().contains(&needle)
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

/// Candidate tickets for a tab, before the membership predicate.
///
/// The forwarded tab also considers the separately fetched forwarded
/// listing, skipping ids already present in `tickets`.
fn candidates<'a>(
    tickets: &'a [Ticket],
    forwarded_tickets: &'a [Ticket],
    tab: ViewTab,
) -> Vec<&'a Ticket> {
    let mut out: Vec<&Ticket> = tickets.iter().collect();
    if tab == ViewTab::Forwarded {
        let mut seen: HashSet<String> = tickets.iter().map(|t| t.id.to_string()).collect();
        for ticket in forwarded_tickets {
            if seen.insert(ticket.id.to_string()) {
                out.push(ticket);
            }
        }
    }
    out
}

/// Select the tickets shown in `tab` for `user_id`, filtered by search text
/// and status. Input order is preserved.
pub fn route<'a>(
    tickets: &'a [Ticket],
    forwarded_tickets: &'a [Ticket],
    search_text: &str,
    status_filter: &str,
    tab: ViewTab,
    user_id: &RecordId,
) -> Vec<&'a Ticket> {
    let status = StatusFilter::parse(status_filter);
    candidates(tickets, forwarded_tickets, tab)
        .into_iter()
        .filter(|t| in_view(t, tab, user_id))
        .filter(|t| matches_search(t, search_text))
        .filter(|t| status.matches(t))
        .collect()
}

/// Unfiltered ticket counts per tab, for tab badges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewCounts {
    pub sent: usize,
    pub received: usize,
    pub forwarded: usize,
}

pub fn view_counts(
    tickets: &[Ticket],
    forwarded_tickets: &[Ticket],
    user_id: &RecordId,
) -> ViewCounts {
    let count = |tab| {
        candidates(tickets, forwarded_tickets, tab)
            .into_iter()
            .filter(|t| in_view(t, tab, user_id))
            .count()
    };
    ViewCounts {
        sent: count(ViewTab::Sent),
        received: count(ViewTab::Received),
        forwarded: count(ViewTab::Forwarded),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
