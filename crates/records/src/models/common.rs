//! Loosely typed fields shared by several raw records.

use serde::Deserialize;
use ticketdesk_core::types::{RecordId, RecordTime};

use super::user::RawUser;

/// A `department` value that may be a name, a numeric id, or an object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawDepartmentField {
    Id(i64),
    Name(String),
    Object(RawDepartmentRef),
}

/// Embedded department object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDepartmentRef {
    #[serde(default, alias = "_id", alias = "departmentId")]
    pub id: Option<RecordId>,
    #[serde(default, alias = "departmentName")]
    pub name: Option<String>,
}

/// A user reference that may be a bare id or an expanded user object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawUserField {
    Id(RecordId),
    Object(Box<RawUser>),
}

impl RawUserField {
    pub fn id(&self) -> Option<&RecordId> {
        match self {
            Self::Id(id) => Some(id),
            Self::Object(user) => user.id.as_ref(),
        }
    }
}

/// Department id and name after merging the explicit fields with the
/// polymorphic `department` field. Explicit fields take precedence.
pub fn resolve_department(
    department_id: Option<RecordId>,
    department_name: Option<String>,
    department: Option<RawDepartmentField>,
) -> (Option<RecordId>, Option<String>) {
    let (field_id, field_name) = match department {
        None => (None, None),
        Some(RawDepartmentField::Id(id)) => (Some(RecordId::Num(id)), None),
        Some(RawDepartmentField::Name(name)) => (None, Some(name)),
        Some(RawDepartmentField::Object(obj)) => (obj.id, obj.name),
    };

    (
        department_id.or(field_id),
        non_blank(department_name).or_else(|| non_blank(field_name)),
    )
}

/// `None` for absent or whitespace-only strings.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Parse an optional raw timestamp. Blank strings count as absent.
pub fn parse_time(raw: Option<String>) -> Option<RecordTime> {
    non_blank(raw).map(|s| RecordTime::parse(&s))
}
