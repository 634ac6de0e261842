use thiserror::Error;

use becometry_shared::ProfileId;

/// Errors produced by the store layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite error.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to determine a platform data directory.
    #[error("Could not determine application data directory")]
    NoDataDir,

    /// Generic I/O error (e.g. creating the database directory).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Guest attempted to exceed the favorites cap. A designed boundary, not
    /// a failure: callers surface the account upgrade prompt.
    #[error("Guest favorites limit of {limit} reached")]
    GuestLimitReached { limit: usize },

    /// The profile is already in the guest favorites list. Non-fatal.
    #[error("Profile {0} is already favorited")]
    AlreadyFavorited(ProfileId),

    /// Migration failure.
    #[error("Migration error: {0}")]
    Migration(String),

    /// A persisted value could not be parsed back into its domain type.
    #[error("Corrupt stored value for key {key}: {reason}")]
    CorruptValue { key: String, reason: String },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
