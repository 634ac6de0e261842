//! The favorites store client: single point of contact with the backend's
//! favorites endpoints.
//!
//! Every call takes an [`Identity`] and sends exactly one of
//! `Authorization: Bearer <token>` or `X-Session-ID: <sessionId>`; the enum
//! makes the "both or neither" case unrepresentable.
//!
//! Response bodies are parsed by pure `(status, body)` functions so the wire
//! contract is unit-testable without a live backend. Anything the parser does
//! not recognize maps to [`ClientError::ServiceUnavailable`] rather than a
//! panic: the backend's JSON is untrusted input.

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use becometry_shared::{AuthToken, GroupedFavorites, Identity, ProfileId, SessionId};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Outcome of an `add` call.
///
/// `accepted == false` with `needs_account == true` means the backend
/// enforced the guest cap: the favorite was *not* stored and the caller must
/// surface the upgrade prompt instead of retrying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    /// Whether the favorite was stored.
    pub accepted: bool,
    /// Backend signal that the guest cap was hit.
    pub needs_account: bool,
    /// Session id minted by the backend for a first-time guest. Must be
    /// persisted immediately as the new durable session id.
    pub session_id: Option<SessionId>,
}

/// Payload of `GET /favorites/count`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesCount {
    /// Number of favorites attached to the acting identity.
    pub count: u32,
    /// Whether the identity is a signed-in account.
    pub has_account: bool,
    /// Guest cap; `None` for account holders (unlimited).
    pub limit: Option<u32>,
}

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

/// Standard `{success, data}` envelope; `message` appears on failures.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
struct Envelope<T> {
    success: bool,
    #[serde(default)]
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
}

/// Body of `POST /favorites/:profileId`, also emitted on 4xx rejections.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddBody {
    success: bool,
    #[serde(default)]
    needs_account: bool,
    #[serde(default)]
    session_id: Option<SessionId>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckData {
    is_favorited: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TransferBody<'a> {
    session_id: &'a SessionId,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for the favorites endpoints.
pub struct FavoritesApi {
    http: reqwest::Client,
    base_url: String,
}

impl FavoritesApi {
    /// Build a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
        })
    }

    fn request(&self, method: Method, path: &str, identity: &Identity) -> reqwest::RequestBuilder {
        let builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        match identity {
            Identity::Account(token) => builder.bearer_auth(token.as_str()),
            Identity::Guest(session) => builder.header("X-Session-ID", session.to_string()),
        }
    }

    async fn status_and_body(builder: reqwest::RequestBuilder) -> Result<(StatusCode, String)> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }

    /// `GET /favorites`: all favorites, grouped by category by the backend.
    pub async fn list(&self, identity: &Identity) -> Result<GroupedFavorites> {
        let (status, body) =
            Self::status_and_body(self.request(Method::GET, "/favorites", identity)).await?;
        parse_data(status, &body)
    }

    /// `POST /favorites/:profileId`: request the backend add a favorite.
    /// The backend is authoritative for the guest cap.
    pub async fn add(&self, profile_id: ProfileId, identity: &Identity) -> Result<AddOutcome> {
        let path = format!("/favorites/{profile_id}");
        let (status, body) =
            Self::status_and_body(self.request(Method::POST, &path, identity)).await?;
        parse_add(status, &body)
    }

    /// `DELETE /favorites/:profileId`. Idempotent: removing an already-absent
    /// favorite is not an error.
    pub async fn remove(&self, profile_id: ProfileId, identity: &Identity) -> Result<()> {
        let path = format!("/favorites/{profile_id}");
        let (status, body) =
            Self::status_and_body(self.request(Method::DELETE, &path, identity)).await?;
        parse_remove(status, &body)
    }

    /// `GET /favorites/count`.
    pub async fn count(&self, identity: &Identity) -> Result<FavoritesCount> {
        let (status, body) =
            Self::status_and_body(self.request(Method::GET, "/favorites/count", identity)).await?;
        parse_data(status, &body)
    }

    /// `GET /favorites/check/:profileId`.
    ///
    /// Errors are propagated here; the service layer soft-fails them to
    /// `false` because this is a display optimization, not a security check.
    pub async fn check(&self, profile_id: ProfileId, identity: &Identity) -> Result<bool> {
        let path = format!("/favorites/check/{profile_id}");
        let (status, body) =
            Self::status_and_body(self.request(Method::GET, &path, identity)).await?;
        let data: CheckData = parse_data(status, &body)?;
        Ok(data.is_favorited)
    }

    /// `POST /favorites/transfer`: merge all favorites attached to
    /// `session_id` into the account identified by `token`. Safe to call for
    /// a session with zero favorites.
    pub async fn transfer(&self, session_id: &SessionId, token: &AuthToken) -> Result<()> {
        let builder = self
            .http
            .post(format!("{}/favorites/transfer", self.base_url))
            .bearer_auth(token.as_str())
            .json(&TransferBody { session_id });
        let (status, body) = Self::status_and_body(builder).await?;
        parse_ack(status, &body)
    }
}

// ---------------------------------------------------------------------------
// Pure response parsers
// ---------------------------------------------------------------------------

fn failure_message(status: StatusCode, body: &str) -> String {
    // Prefer the backend's human-readable message when the body carries one.
    if let Ok(envelope) = serde_json::from_str::<Envelope<serde_json::Value>>(body) {
        if let Some(message) = envelope.message {
            return message;
        }
    }
    format!("backend returned {status}")
}

/// Parse a `{success, data}` envelope into `T`.
fn parse_data<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
    if status == StatusCode::UNAUTHORIZED {
        return Err(ClientError::Unauthorized);
    }
    if !status.is_success() {
        return Err(ClientError::ServiceUnavailable(failure_message(status, body)));
    }

    match serde_json::from_str::<Envelope<T>>(body) {
        Ok(Envelope {
            success: true,
            data: Some(data),
            ..
        }) => Ok(data),
        Ok(envelope) => Err(ClientError::ServiceUnavailable(
            envelope
                .message
                .unwrap_or_else(|| "backend reported failure".to_string()),
        )),
        Err(e) => Err(ClientError::ServiceUnavailable(format!(
            "unexpected response shape: {e}"
        ))),
    }
}

/// Parse the `add` response, which carries `needsAccount` / `sessionId` at
/// the top level and may arrive with a 4xx status when the cap is hit.
fn parse_add(status: StatusCode, body: &str) -> Result<AddOutcome> {
    if status == StatusCode::UNAUTHORIZED {
        return Err(ClientError::Unauthorized);
    }

    match serde_json::from_str::<AddBody>(body) {
        Ok(parsed) if parsed.needs_account => Ok(AddOutcome {
            accepted: false,
            needs_account: true,
            session_id: parsed.session_id,
        }),
        Ok(parsed) if status.is_success() && parsed.success => Ok(AddOutcome {
            accepted: true,
            needs_account: false,
            session_id: parsed.session_id,
        }),
        Ok(parsed) => Err(ClientError::ServiceUnavailable(
            parsed
                .message
                .unwrap_or_else(|| format!("backend returned {status}")),
        )),
        Err(_) => Err(ClientError::ServiceUnavailable(failure_message(
            status, body,
        ))),
    }
}

/// Parse a bare `{success}` acknowledgement.
fn parse_ack(status: StatusCode, body: &str) -> Result<()> {
    if status == StatusCode::UNAUTHORIZED {
        return Err(ClientError::Unauthorized);
    }
    if !status.is_success() {
        return Err(ClientError::ServiceUnavailable(failure_message(status, body)));
    }
    match serde_json::from_str::<Envelope<serde_json::Value>>(body) {
        Ok(envelope) if envelope.success => Ok(()),
        Ok(envelope) => Err(ClientError::ServiceUnavailable(
            envelope
                .message
                .unwrap_or_else(|| "backend reported failure".to_string()),
        )),
        Err(e) => Err(ClientError::ServiceUnavailable(format!(
            "unexpected response shape: {e}"
        ))),
    }
}

/// Like [`parse_ack`], but a 404 counts as success: removing an
/// already-absent favorite is a no-op by contract.
fn parse_remove(status: StatusCode, body: &str) -> Result<()> {
    if status == StatusCode::NOT_FOUND {
        return Ok(());
    }
    parse_ack(status, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_data_unwraps_envelope() {
        let body = r#"{"success": true, "data": {"count": 3, "hasAccount": false, "limit": 5}}"#;
        let count: FavoritesCount = parse_data(StatusCode::OK, body).unwrap();
        assert_eq!(
            count,
            FavoritesCount {
                count: 3,
                has_account: false,
                limit: Some(5),
            }
        );
    }

    #[test]
    fn parse_data_null_limit_means_unlimited() {
        // Scenario C shape: account holders have no cap.
        let body = r#"{"success": true, "data": {"count": 12, "hasAccount": true, "limit": null}}"#;
        let count: FavoritesCount = parse_data(StatusCode::OK, body).unwrap();
        assert!(count.has_account);
        assert_eq!(count.limit, None);
    }

    #[test]
    fn parse_data_maps_401_to_unauthorized() {
        let result: Result<FavoritesCount> =
            parse_data(StatusCode::UNAUTHORIZED, r#"{"success": false}"#);
        assert!(matches!(result, Err(ClientError::Unauthorized)));
    }

    #[test]
    fn parse_data_maps_garbage_to_service_unavailable() {
        let result: Result<FavoritesCount> = parse_data(StatusCode::OK, "<html>oops</html>");
        assert!(matches!(result, Err(ClientError::ServiceUnavailable(_))));
    }

    #[test]
    fn parse_data_surfaces_backend_message() {
        let result: Result<FavoritesCount> = parse_data(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"success": false, "message": "database down"}"#,
        );
        match result {
            Err(ClientError::ServiceUnavailable(msg)) => assert_eq!(msg, "database down"),
            other => panic!("expected ServiceUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn parse_add_accepts_minted_session_shape() {
        let minted = SessionId::generate();
        let body = format!(r#"{{"success": true, "sessionId": "{minted}"}}"#);
        let outcome = parse_add(StatusCode::OK, &body).unwrap();
        assert!(outcome.accepted);
        assert!(!outcome.needs_account);
        assert_eq!(outcome.session_id, Some(minted));
    }

    #[test]
    fn parse_add_recognizes_needs_account_on_error_status() {
        // The backend rejects a capped guest with a 4xx carrying the signal.
        let body = r#"{"success": false, "needsAccount": true}"#;
        let outcome = parse_add(StatusCode::FORBIDDEN, body).unwrap();
        assert!(!outcome.accepted);
        assert!(outcome.needs_account);
    }

    #[test]
    fn parse_add_plain_success_has_no_session() {
        let outcome = parse_add(StatusCode::OK, r#"{"success": true}"#).unwrap();
        assert!(outcome.accepted);
        assert_eq!(outcome.session_id, None);
    }

    #[test]
    fn parse_add_garbage_is_service_unavailable() {
        let result = parse_add(StatusCode::OK, "not json");
        assert!(matches!(result, Err(ClientError::ServiceUnavailable(_))));
    }

    #[test]
    fn parse_remove_treats_404_as_success() {
        assert!(parse_remove(StatusCode::NOT_FOUND, "").is_ok());
    }

    #[test]
    fn parse_ack_requires_success_flag() {
        assert!(parse_ack(StatusCode::OK, r#"{"success": true}"#).is_ok());
        assert!(matches!(
            parse_ack(StatusCode::OK, r#"{"success": false, "message": "nope"}"#),
            Err(ClientError::ServiceUnavailable(_))
        ));
    }

    #[test]
    fn grouped_favorites_list_body_parses() {
        let body = r#"{
            "success": true,
            "data": {
                "Health": {
                    "category_id": 3,
                    "category_slug": "health",
                    "profiles": [{"id": 101, "name": "Ada", "category_name": "Health"}]
                }
            }
        }"#;
        let grouped: GroupedFavorites = parse_data(StatusCode::OK, body).unwrap();
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped.profile_count(), 1);
    }
}
