//! Where the desk gets its listings.

use std::path::Path;

use ticketdesk_core::directory::Department;
use ticketdesk_core::task::Task;
use ticketdesk_core::ticket::Ticket;
use ticketdesk_core::types::RecordId;
use ticketdesk_records::{RawSnapshot, Snapshot};

use crate::error::{DeskError, DeskResult};

/// Supplies the already-fetched listings the desk operates on.
///
/// Implementations return owned data; the desk never holds a borrow into
/// the source across calls.
pub trait DeskSource {
    fn tickets(&self) -> DeskResult<Vec<Ticket>>;
    fn forwarded_tickets(&self) -> DeskResult<Vec<Ticket>>;
    fn tasks(&self) -> DeskResult<Vec<Task>>;
    fn departments(&self) -> DeskResult<Vec<Department>>;
    fn current_user(&self) -> DeskResult<RecordId>;
}

impl DeskSource for Snapshot {
    fn tickets(&self) -> DeskResult<Vec<Ticket>> {
        Ok(self.tickets.clone())
    }

    fn forwarded_tickets(&self) -> DeskResult<Vec<Ticket>> {
        Ok(self.forwarded_tickets.clone())
    }

    fn tasks(&self) -> DeskResult<Vec<Task>> {
        Ok(self.tasks.clone())
    }

    fn departments(&self) -> DeskResult<Vec<Department>> {
        Ok(self.departments.clone())
    }

    fn current_user(&self) -> DeskResult<RecordId> {
        self.current_user_id.clone().ok_or(DeskError::NoCurrentUser)
    }
}

/// Read and normalize a JSON snapshot file.
///
/// Entries that fail normalization are dropped and logged; an unreadable
/// file or a document that is not a snapshot object is an error.
pub async fn load_snapshot(path: &Path) -> DeskResult<Snapshot> {
    let bytes = tokio::fs::read(path).await?;
    let raw: RawSnapshot = serde_json::from_slice(&bytes)?;
    let (snapshot, rejected) = raw.normalize();

    if !rejected.is_empty() {
        tracing::warn!(
            path = %path.display(),
            rejected = rejected.len(),
            "Snapshot entries dropped during normalization",
        );
    }
    tracing::info!(
        path = %path.display(),
        tickets = snapshot.tickets.len(),
        tasks = snapshot.tasks.len(),
        departments = snapshot.departments.len(),
        "Snapshot loaded",
    );

    Ok(snapshot)
}
