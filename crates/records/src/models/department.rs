//! Raw department listing entries.

use serde::Deserialize;
use ticketdesk_core::directory::Department;
use ticketdesk_core::types::RecordId;

use super::common::non_blank;
use crate::error::{RecordError, RecordResult};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDepartment {
    #[serde(default, alias = "_id", alias = "departmentId")]
    pub id: Option<RecordId>,
    #[serde(default, alias = "departmentName")]
    pub name: Option<String>,
    #[serde(default, alias = "headId", alias = "head")]
    pub head_id: Option<RecordId>,
}

impl RawDepartment {
    pub fn into_department(self) -> RecordResult<Department> {
        let id = self.id.ok_or(RecordError::MissingField {
            entity: "department",
            field: "id",
        })?;
        let name = non_blank(self.name).ok_or(RecordError::MissingField {
            entity: "department",
            field: "name",
        })?;
        Ok(Department {
            id,
            name,
            head_id: self.head_id,
        })
    }
}
