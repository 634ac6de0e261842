use thiserror::Error;

/// Validation errors for domain values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Profile ids are opaque foreign keys but must be positive integers.
    #[error("Invalid profile id: {0} (must be positive)")]
    InvalidProfileId(i64),

    /// Session ids are UUIDs on the wire.
    #[error("Invalid session id: {0}")]
    InvalidSessionId(String),
}
