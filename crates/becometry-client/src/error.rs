use thiserror::Error;

use becometry_shared::ProfileId;
use becometry_store::StoreError;

/// Errors surfaced by the favorites client.
///
/// Network failures and malformed backend responses are both service
/// unavailability from the caller's point of view; the split into
/// [`ClientError::Network`] and [`ClientError::ServiceUnavailable`] only
/// preserves the underlying cause for logging.
#[derive(Error, Debug)]
pub enum ClientError {
    /// A bearer token was presented but rejected by the backend. The caller
    /// should start the re-authentication flow.
    #[error("Unauthorized: token rejected by the backend")]
    Unauthorized,

    /// The backend answered with an error status or a response shape this
    /// client does not recognize.
    #[error("Favorites service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Transport-level failure (connection refused, timeout, TLS, ...).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A request for this profile is still outstanding. The shell should
    /// disable the control instead of retrying; this is the debounce for
    /// rapid double-clicks on a favorite toggle.
    #[error("Operation already in flight for profile {0}")]
    OperationInFlight(ProfileId),

    /// Durable storage failure from the store layer.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ClientError {
    /// Whether this error belongs to the `ServiceUnavailable` class of the
    /// taxonomy (transport failures included).
    pub fn is_service_unavailable(&self) -> bool {
        matches!(
            self,
            ClientError::ServiceUnavailable(_) | ClientError::Network(_)
        )
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_unavailable_class_covers_shape_errors() {
        let err = ClientError::ServiceUnavailable("bad shape".into());
        assert!(err.is_service_unavailable());
        assert!(!ClientError::Unauthorized.is_service_unavailable());
    }
}

