//! Raw user records, from the user listing or embedded on tickets and tasks.

use serde::Deserialize;
use ticketdesk_core::directory::User;
use ticketdesk_core::types::RecordId;

use super::common::{non_blank, resolve_department, RawDepartmentField};
use crate::error::{RecordError, RecordResult};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawUser {
    #[serde(default, alias = "_id", alias = "userId")]
    pub id: Option<RecordId>,
    #[serde(default, alias = "firstName")]
    pub first_name: Option<String>,
    #[serde(default, alias = "lastName")]
    pub last_name: Option<String>,
    #[serde(default, alias = "departmentId")]
    pub department_id: Option<RecordId>,
    #[serde(default, alias = "departmentName")]
    pub department_name: Option<String>,
    #[serde(default)]
    pub department: Option<RawDepartmentField>,
}

impl RawUser {
    pub fn into_user(self) -> RecordResult<User> {
        let id = self.id.ok_or(RecordError::MissingField {
            entity: "user",
            field: "id",
        })?;
        let (department_id, department_name) =
            resolve_department(self.department_id, self.department_name, self.department);

        Ok(User {
            id,
            first_name: non_blank(self.first_name).unwrap_or_default(),
            last_name: non_blank(self.last_name).unwrap_or_default(),
            department_id,
            department_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn camel_case_user_with_department_object() {
        let raw: RawUser = serde_json::from_value(serde_json::json!({
            "_id": "u1",
            "firstName": "Ada",
            "lastName": "Byron",
            "department": {"id": 5, "name": "IT"}
        }))
        .unwrap();
        let user = raw.into_user().unwrap();
        assert_eq!(user.id, RecordId::from("u1"));
        assert_eq!(user.display_name(), "Ada Byron");
        assert_eq!(user.department_id, Some(RecordId::Num(5)));
        assert_eq!(user.department_name.as_deref(), Some("IT"));
    }

    #[test]
    fn user_without_id_is_rejected() {
        let raw = RawUser::default();
        assert_matches!(
            raw.into_user(),
            Err(RecordError::MissingField { entity: "user", field: "id" })
        );
    }
}
