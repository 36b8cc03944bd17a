//! Raw ticket records as served by the ticket listings.

use serde::Deserialize;
use ticketdesk_core::ticket::Ticket;
use ticketdesk_core::types::{RecordId, RecordTime};

use super::common::{non_blank, parse_time, resolve_department, RawDepartmentField, RawUserField};
use crate::directory::UserDirectory;
use crate::error::{RecordError, RecordResult};
use crate::status;

const ENTITY: &str = "ticket";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTicket {
    #[serde(default, alias = "_id", alias = "ticketId")]
    pub id: Option<RecordId>,
    #[serde(default, alias = "subject")]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
    #[serde(default, alias = "dueDate", alias = "deadline")]
    pub due_date: Option<String>,

    #[serde(default, alias = "creatorId")]
    pub creator_id: Option<RecordId>,
    #[serde(default, alias = "createdBy", alias = "created_by")]
    pub creator: Option<RawUserField>,
    #[serde(default, alias = "assigneeId", alias = "assigned_to_id")]
    pub assignee_id: Option<RecordId>,
    #[serde(default, alias = "assignedTo", alias = "assigned_to")]
    pub assignee: Option<RawUserField>,

    #[serde(default, alias = "departmentId")]
    pub department_id: Option<RecordId>,
    #[serde(default, alias = "departmentName")]
    pub department_name: Option<String>,
    #[serde(default)]
    pub department: Option<RawDepartmentField>,
    #[serde(default, alias = "departmentAssignment", alias = "department_head_id")]
    pub department_assignment: Option<RecordId>,

    #[serde(default, alias = "forwardedToId", alias = "forwarded_to")]
    pub forwarded_to_id: Option<RecordId>,
    #[serde(default, alias = "forwardedFromId", alias = "forwarded_from")]
    pub forwarded_from_id: Option<RecordId>,
    #[serde(default, alias = "isForwarded")]
    pub is_forwarded: Option<bool>,
    #[serde(default, alias = "currentHandlerId", alias = "current_handler")]
    pub current_handler_id: Option<RecordId>,
}

impl RawTicket {
    /// Build a canonical [`Ticket`].
    ///
    /// `id`, `status`, `created_at`, and a creator id (either `creator_id`
    /// or the embedded creator's id) are required. An unparseable
    /// `created_at` is kept as malformed rather than rejected.
    pub fn into_ticket(self, users: &UserDirectory) -> RecordResult<Ticket> {
        let id = self.id.ok_or(RecordError::MissingField {
            entity: ENTITY,
            field: "id",
        })?;
        let raw_status = self.status.ok_or(RecordError::MissingField {
            entity: ENTITY,
            field: "status",
        })?;
        let status = status::ticket_status(&raw_status)?;
        let created_at: RecordTime =
            parse_time(self.created_at).ok_or(RecordError::MissingField {
                entity: ENTITY,
                field: "created_at",
            })?;

        let creator_id = self
            .creator_id
            .or_else(|| self.creator.as_ref().and_then(|c| c.id().cloned()))
            .ok_or(RecordError::MissingField {
                entity: ENTITY,
                field: "creator_id",
            })?;
        let creator = self.creator.and_then(|c| users.resolve(c));

        let assignee_id = self
            .assignee_id
            .or_else(|| self.assignee.as_ref().and_then(|a| a.id().cloned()));
        let assignee = self.assignee.and_then(|a| users.resolve(a));

        let (department_id, department_name) =
            resolve_department(self.department_id, self.department_name, self.department);

        Ok(Ticket {
            id,
            title: non_blank(self.title).unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            status,
            priority: status::priority(self.priority.as_deref()),
            created_at,
            due_date: parse_time(self.due_date),
            creator_id,
            creator,
            assignee_id,
            assignee,
            department_id,
            department_name,
            department_head_id: self.department_assignment,
            forwarded_to_id: self.forwarded_to_id,
            forwarded_from_id: self.forwarded_from_id,
            is_forwarded: self.is_forwarded.unwrap_or(false),
            current_handler_id: self.current_handler_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use ticketdesk_core::directory::User;
    use ticketdesk_core::ticket::{Priority, TicketStatus};

    fn decode(value: serde_json::Value) -> RawTicket {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn camel_case_ticket_is_normalized() {
        let raw = decode(serde_json::json!({
            "_id": "t-1",
            "title": "Laptop",
            "status": "In Progress",
            "priority": "High",
            "createdAt": "2024-05-01T08:00:00Z",
            "dueDate": "2024-05-03",
            "createdBy": {"_id": 4, "firstName": "Kim", "lastName": "Lee"},
            "assignedTo": 9,
            "department": {"id": 2, "name": "IT"},
            "isForwarded": true,
            "forwardedFromId": 4
        }));
        let ticket = raw.into_ticket(&UserDirectory::default()).unwrap();

        assert_eq!(ticket.id, RecordId::from("t-1"));
        assert_eq!(ticket.status, TicketStatus::InProgress);
        assert_eq!(ticket.priority, Priority::High);
        assert_eq!(ticket.creator_id, RecordId::Num(4));
        assert_eq!(ticket.creator_name(), "Kim Lee");
        assert_eq!(ticket.assignee_id, Some(RecordId::Num(9)));
        assert_eq!(ticket.department_id, Some(RecordId::Num(2)));
        assert_eq!(ticket.department_name.as_deref(), Some("IT"));
        assert!(ticket.is_forwarded);
        assert_eq!(ticket.forwarded_from_id, Some(RecordId::Num(4)));
        assert!(ticket.due_date.is_some());
    }

    #[test]
    fn department_as_plain_name() {
        let raw = decode(serde_json::json!({
            "id": 1,
            "status": "pending",
            "created_at": "2024-05-01",
            "creator_id": 3,
            "department": "Facilities"
        }));
        let ticket = raw.into_ticket(&UserDirectory::default()).unwrap();
        assert_eq!(ticket.department_id, None);
        assert_eq!(ticket.department_name.as_deref(), Some("Facilities"));
    }

    #[test]
    fn embedded_creator_is_completed_from_directory() {
        let mut known = User::new(3);
        known.department_name = Some("IT".into());
        let users = UserDirectory::new([known]);

        let raw = decode(serde_json::json!({
            "id": 1,
            "status": "pending",
            "created_at": "2024-05-01",
            "creator": 3
        }));
        let ticket = raw.into_ticket(&users).unwrap();
        assert_eq!(ticket.creator_id, RecordId::Num(3));
        assert_eq!(
            ticket.creator.and_then(|c| c.department_name).as_deref(),
            Some("IT")
        );
    }

    #[test]
    fn malformed_created_at_is_kept() {
        let raw = decode(serde_json::json!({
            "id": 1,
            "status": "pending",
            "created_at": "sometime",
            "creator_id": 3
        }));
        let ticket = raw.into_ticket(&UserDirectory::default()).unwrap();
        assert!(ticket.created_at.is_malformed());
    }

    #[test]
    fn missing_created_at_is_rejected() {
        let raw = decode(serde_json::json!({"id": 1, "status": "pending", "creator_id": 3}));
        assert_matches!(
            raw.into_ticket(&UserDirectory::default()),
            Err(RecordError::MissingField { field: "created_at", .. })
        );
    }

    #[test]
    fn missing_creator_is_rejected() {
        let raw = decode(serde_json::json!({
            "id": 1,
            "status": "pending",
            "created_at": "2024-05-01"
        }));
        assert_matches!(
            raw.into_ticket(&UserDirectory::default()),
            Err(RecordError::MissingField { field: "creator_id", .. })
        );
    }

    #[test]
    fn unknown_status_is_rejected() {
        let raw = decode(serde_json::json!({
            "id": 1,
            "status": "escalated",
            "created_at": "2024-05-01",
            "creator_id": 3
        }));
        assert_matches!(
            raw.into_ticket(&UserDirectory::default()),
            Err(RecordError::UnknownStatus { .. })
        );
    }
}
