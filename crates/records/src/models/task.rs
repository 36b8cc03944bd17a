//! Raw task records.

use serde::Deserialize;
use ticketdesk_core::task::Task;
use ticketdesk_core::types::RecordId;

use super::common::{non_blank, parse_time, resolve_department, RawDepartmentField, RawUserField};
use crate::directory::UserDirectory;
use crate::error::{RecordError, RecordResult};
use crate::status;

const ENTITY: &str = "task";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTask {
    #[serde(default, alias = "_id", alias = "taskId")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
    #[serde(default, alias = "dueDate", alias = "deadline")]
    pub due_date: Option<String>,
    #[serde(default, alias = "completedAt")]
    pub completed_at: Option<String>,
    #[serde(default, alias = "departmentId")]
    pub department_id: Option<RecordId>,
    #[serde(default, alias = "departmentName")]
    pub department_name: Option<String>,
    #[serde(default)]
    pub department: Option<RawDepartmentField>,
    #[serde(default, alias = "assignedTo", alias = "assignee")]
    pub assigned_to: Option<RawUserField>,
    #[serde(default, alias = "createdBy", alias = "creator")]
    pub created_by: Option<RawUserField>,
}

impl RawTask {
    /// Build a canonical [`Task`]. `id`, `status`, and `created_at` are
    /// required.
    pub fn into_task(self, users: &UserDirectory) -> RecordResult<Task> {
        let id = self.id.ok_or(RecordError::MissingField {
            entity: ENTITY,
            field: "id",
        })?;
        let raw_status = self.status.ok_or(RecordError::MissingField {
            entity: ENTITY,
            field: "status",
        })?;
        let status = status::task_status(&raw_status)?;
        let created_at = parse_time(self.created_at).ok_or(RecordError::MissingField {
            entity: ENTITY,
            field: "created_at",
        })?;
        let (department_id, department_name) =
            resolve_department(self.department_id, self.department_name, self.department);

        Ok(Task {
            id,
            title: non_blank(self.title).unwrap_or_default(),
            status,
            created_at,
            due_date: parse_time(self.due_date),
            completed_at: parse_time(self.completed_at),
            department_id,
            department_name,
            assigned_to: self.assigned_to.and_then(|u| users.resolve(u)),
            created_by: self.created_by.and_then(|u| users.resolve(u)),
        })
    }
}
