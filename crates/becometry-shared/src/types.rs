use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ModelError;

// Identifier of a directory profile. Opaque foreign key owned by the backend;
// the only validation this layer owns is "positive integer", enforced on
// deserialization as well via `try_from`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "i64", into = "i64")]
pub struct ProfileId(i64);

impl ProfileId {
    pub fn new(raw: i64) -> Result<Self, ModelError> {
        if raw <= 0 {
            return Err(ModelError::InvalidProfileId(raw));
        }
        Ok(Self(raw))
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for ProfileId {
    type Error = ModelError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<ProfileId> for i64 {
    fn from(id: ProfileId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Client-generated opaque token identifying an anonymous browser context.
/// Created once, persisted for the lifetime of that context, never rotated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Mint a fresh random session id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a session id previously persisted or returned by the backend.
    pub fn parse(s: &str) -> Result<Self, ModelError> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| ModelError::InvalidSessionId(s.to_string()))
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bearer token issued by the authentication subsystem.
/// Opaque to this layer; never logged in full.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthToken(pub String);

impl AuthToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Redact the token in debug output so it cannot leak through tracing.
impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AuthToken(..)")
    }
}

/// The acting identity for a favorites operation.
///
/// A visitor is in exactly one of two mutually exclusive modes: a guest
/// carrying a session id, or an account holder carrying a bearer token.
/// Making this an enum (rather than two optional fields) rules out the
/// "both or neither" case before a request ever leaves the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Guest(SessionId),
    Account(AuthToken),
}

impl Identity {
    /// Whether this identity belongs to a signed-in account.
    pub fn has_account(&self) -> bool {
        matches!(self, Identity::Account(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_id_must_be_positive() {
        assert!(ProfileId::new(1).is_ok());
        assert!(ProfileId::new(0).is_err());
        assert!(ProfileId::new(-7).is_err());
    }

    #[test]
    fn profile_id_validation_applies_on_deserialize() {
        assert!(serde_json::from_str::<ProfileId>("17").is_ok());
        assert!(serde_json::from_str::<ProfileId>("-3").is_err());
        assert!(serde_json::from_str::<ProfileId>("0").is_err());
    }

    #[test]
    fn session_id_round_trip() {
        let id = SessionId::generate();
        let parsed = SessionId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn session_id_rejects_garbage() {
        assert!(SessionId::parse("not-a-uuid").is_err());
    }

    #[test]
    fn auth_token_debug_is_redacted() {
        let token = AuthToken("secret-bearer-value".into());
        assert_eq!(format!("{token:?}"), "AuthToken(..)");
    }

    #[test]
    fn identity_modes_are_exclusive() {
        let guest = Identity::Guest(SessionId::generate());
        let account = Identity::Account(AuthToken("t".into()));
        assert!(!guest.has_account());
        assert!(account.has_account());
    }
}
