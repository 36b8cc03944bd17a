//! A complete data snapshot: every listing the engine consumes plus the
//! current user's identity.

use serde::Deserialize;
use serde_json::Value;
use ticketdesk_core::directory::{Department, User};
use ticketdesk_core::task::Task;
use ticketdesk_core::ticket::Ticket;
use ticketdesk_core::types::RecordId;

use crate::directory::UserDirectory;
use crate::normalize::{self, Rejected};

/// Snapshot as delivered by the data-access layer. Entries stay as JSON
/// values so that a bad entry only costs that entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSnapshot {
    #[serde(default)]
    pub tickets: Vec<Value>,
    #[serde(default, alias = "forwardedTickets")]
    pub forwarded_tickets: Vec<Value>,
    #[serde(default)]
    pub tasks: Vec<Value>,
    #[serde(default)]
    pub departments: Vec<Value>,
    #[serde(default)]
    pub users: Vec<Value>,
    #[serde(default, alias = "currentUserId")]
    pub current_user_id: Option<RecordId>,
}

/// Snapshot in canonical form.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub tickets: Vec<Ticket>,
    pub forwarded_tickets: Vec<Ticket>,
    pub tasks: Vec<Task>,
    pub departments: Vec<Department>,
    pub users: Vec<User>,
    pub current_user_id: Option<RecordId>,
}

impl RawSnapshot {
    /// Normalize every listing. Departments and users are processed first
    /// since tickets and tasks are resolved against them.
    pub fn normalize(self) -> (Snapshot, Vec<Rejected>) {
        let mut rejected = Vec::new();

        let departments = normalize::departments(self.departments);
        rejected.extend(departments.rejected);
        let users = normalize::users(self.users);
        rejected.extend(users.rejected);

        let directory = UserDirectory::new(users.records.iter().cloned());

        let tickets = normalize::tickets(self.tickets, &directory, &departments.records);
        rejected.extend(tickets.rejected);
        let forwarded =
            normalize::tickets(self.forwarded_tickets, &directory, &departments.records);
        rejected.extend(forwarded.rejected);
        let tasks = normalize::tasks(self.tasks, &directory);
        rejected.extend(tasks.rejected);

        tracing::debug!(
            tickets = tickets.records.len(),
            forwarded_tickets = forwarded.records.len(),
            tasks = tasks.records.len(),
            departments = departments.records.len(),
            users = users.records.len(),
            distinct_users = directory.len(),
            rejected = rejected.len(),
            "Snapshot normalized",
        );

        let snapshot = Snapshot {
            tickets: tickets.records,
            forwarded_tickets: forwarded.records,
            tasks: tasks.records,
            departments: departments.records,
            users: users.records,
            current_user_id: self.current_user_id,
        };
        (snapshot, rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn snapshot_normalizes_all_listings() {
        let raw: RawSnapshot = serde_json::from_value(json!({
            "currentUserId": "7",
            "departments": [{"id": 1, "name": "IT", "headId": 7}],
            "users": [{"id": 3, "firstName": "Sam", "departmentId": 1}],
            "tickets": [
                {"id": 1, "status": "pending", "createdAt": "2024-01-01", "creatorId": 3, "departmentId": 1},
                {"id": 2, "status": "??", "createdAt": "2024-01-01", "creatorId": 3}
            ],
            "forwardedTickets": [
                {"id": 5, "status": "in_progress", "createdAt": "2024-01-02", "creatorId": 7, "isForwarded": true}
            ],
            "tasks": [
                {"id": 10, "status": "completed", "createdAt": "2024-01-01", "createdBy": 3}
            ]
        }))
        .unwrap();

        let (snapshot, rejected) = raw.normalize();
        assert_eq!(snapshot.current_user_id, Some(RecordId::from("7")));
        assert_eq!(snapshot.tickets.len(), 1);
        assert_eq!(snapshot.forwarded_tickets.len(), 1);
        assert_eq!(snapshot.tasks.len(), 1);
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].entity, "ticket");

        assert_eq!(snapshot.tickets[0].department_head_id, Some(RecordId::Num(7)));
        let creator = snapshot.tasks[0].created_by.as_ref().unwrap();
        assert_eq!(creator.department_id, Some(RecordId::Num(1)));
    }

    #[test]
    fn empty_snapshot_is_valid() {
        let raw: RawSnapshot = serde_json::from_str("{}").unwrap();
        let (snapshot, rejected) = raw.normalize();
        assert!(snapshot.tickets.is_empty());
        assert!(rejected.is_empty());
        assert_eq!(snapshot.current_user_id, None);
    }
}
