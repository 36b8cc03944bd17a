use ticketdesk_core::error::CoreError;

/// Errors surfaced by the desk layer.
///
/// Wraps [`CoreError`] for domain validation failures and adds the
/// configuration and snapshot-loading failures of the calling layer.
#[derive(Debug, thiserror::Error)]
pub enum DeskError {
    /// A domain-level error from `ticketdesk_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An environment variable held an unusable value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The snapshot did not name the current user.
    #[error("No current user in snapshot")]
    NoCurrentUser,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot decode error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for desk operations.
pub type DeskResult<T> = Result<T, DeskError>;
