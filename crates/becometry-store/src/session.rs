//! Session identity provider.
//!
//! Issues and persists the durable anonymous session id for unauthenticated
//! visitors. The id is generated once per storage scope and never rotated,
//! so guest favorites stay attached to the same identity across visits until
//! the storage is cleared or a transfer to an account happens.

use rusqlite::{params, OptionalExtension};

use becometry_shared::constants::SESSION_ID_KEY;
use becometry_shared::SessionId;

use crate::database::Database;
use crate::error::{Result, StoreError};

impl Database {
    /// Return the persisted session id, if one exists.
    pub fn session_id(&self) -> Result<Option<SessionId>> {
        let stored: Option<String> = self
            .conn()
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                params![SESSION_ID_KEY],
                |row| row.get(0),
            )
            .optional()?;

        match stored {
            None => Ok(None),
            Some(raw) => SessionId::parse(&raw)
                .map(Some)
                .map_err(|e| StoreError::CorruptValue {
                    key: SESSION_ID_KEY.to_string(),
                    reason: e.to_string(),
                }),
        }
    }

    /// Return the session id, generating and persisting a fresh one on first
    /// call. Subsequent calls return the stored value unchanged.
    pub fn get_or_create_session_id(&self) -> Result<SessionId> {
        if let Some(existing) = self.session_id()? {
            return Ok(existing);
        }

        let fresh = SessionId::generate();
        self.set_session_id(&fresh)?;
        tracing::info!(session_id = %fresh, "minted new guest session id");
        Ok(fresh)
    }

    /// Persist `session_id`, replacing any previous value. Used when the
    /// backend mints a session id on a first guest `add`.
    pub fn set_session_id(&self, session_id: &SessionId) -> Result<()> {
        self.conn().execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![SESSION_ID_KEY, session_id.to_string()],
        )?;
        Ok(())
    }

    /// Remove the stored session id (after a successful transfer to an
    /// account). A later guest visit will mint a fresh identity.
    pub fn clear_session_id(&self) -> Result<()> {
        self.conn().execute(
            "DELETE FROM kv WHERE key = ?1",
            params![SESSION_ID_KEY],
        )?;
        Ok(())
    }
}
