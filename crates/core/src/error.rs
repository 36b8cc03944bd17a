use crate::types::RecordId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Malformed timestamp on {entity} {id}: {field} = '{value}'")]
    MalformedTimestamp {
        entity: &'static str,
        id: RecordId,
        field: &'static str,
        value: String,
    },

    #[error("Inconsistent {entity} {id}: {reason}")]
    Inconsistent {
        entity: &'static str,
        id: RecordId,
        reason: String,
    },
}
