//! Organizational records: departments and users.

use serde::{Deserialize, Serialize};

use crate::types::RecordId;

/// A department. Child records may reference it by `id`, by `name`, or both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: RecordId,
    pub name: String,
    /// User heading the department, if known.
    #[serde(default)]
    pub head_id: Option<RecordId>,
}

impl Department {
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            head_id: None,
        }
    }
}

/// A user, either from the user listing or embedded on a ticket/task.
///
/// The department fields are only used as an indirect attribution path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub department_id: Option<RecordId>,
    #[serde(default)]
    pub department_name: Option<String>,
}

impl User {
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            first_name: String::new(),
            last_name: String::new(),
            department_id: None,
            department_name: None,
        }
    }

    /// First and last name joined by a space.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Whether any department information is present.
    pub fn has_department(&self) -> bool {
        self.department_id.is_some() || self.department_name.is_some()
    }
}
