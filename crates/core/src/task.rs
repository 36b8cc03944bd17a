//! Task record.

use serde::{Deserialize, Serialize};

use crate::directory::User;
use crate::types::{RecordId, RecordTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }
}

/// An internal task. Department references are populated inconsistently
/// upstream: directly, through the assignee, through the creator, or not at
/// all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: RecordId,
    pub title: String,
    pub status: TaskStatus,
    pub created_at: RecordTime,
    pub due_date: Option<RecordTime>,
    pub completed_at: Option<RecordTime>,
    pub department_id: Option<RecordId>,
    pub department_name: Option<String>,
    pub assigned_to: Option<User>,
    pub created_by: Option<User>,
}

impl Task {
    pub fn new(
        id: impl Into<RecordId>,
        status: TaskStatus,
        created_at: impl Into<RecordTime>,
    ) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            status,
            created_at: created_at.into(),
            due_date: None,
            completed_at: None,
            department_id: None,
            department_name: None,
            assigned_to: None,
            created_by: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_status_has_no_declined() {
        assert_eq!(TaskStatus::parse("declined"), None);
        assert_eq!(TaskStatus::parse("completed"), Some(TaskStatus::Completed));
    }
}
