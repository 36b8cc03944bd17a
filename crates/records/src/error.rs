/// Reasons a raw record cannot be turned into a domain record.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("{entity} is missing required field `{field}`")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    #[error("{entity} has unknown status '{value}'")]
    UnknownStatus { entity: &'static str, value: String },

    #[error("{entity} could not be decoded: {source}")]
    Decode {
        entity: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub type RecordResult<T> = Result<T, RecordError>;
