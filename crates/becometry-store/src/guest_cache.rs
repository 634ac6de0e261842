//! Guest favorites cache.
//!
//! Local bookkeeping mirror of a guest's favorited profile ids, used for
//! instant UI feedback without a network round trip and as the local
//! enforcement point for the guest cap. The list is ordered (insertion
//! order), holds distinct ids only, and every mutation is written through to
//! SQLite before the call returns.
//!
//! The cap is passed in by the caller rather than hardcoded here: the client
//! layer derives it from the backend's `count.limit` when known and falls
//! back to [`becometry_shared::constants::MAX_GUEST_FAVORITES`].
//!
//! Concurrent processes sharing the same database file are not coordinated;
//! last writer wins. This is an accepted inconsistency window.

use chrono::Utc;
use rusqlite::params;

use becometry_shared::ProfileId;

use crate::database::Database;
use crate::error::{Result, StoreError};

impl Database {
    /// Add `profile_id` to the guest favorites list.
    ///
    /// Fails with [`StoreError::GuestLimitReached`] when the list already
    /// holds `cap` distinct ids and `profile_id` is not among them; the list
    /// is left unchanged. Fails (non-fatally) with
    /// [`StoreError::AlreadyFavorited`] when the id is already present.
    pub fn add_guest_favorite(&self, profile_id: ProfileId, cap: usize) -> Result<()> {
        if self.has_guest_favorite(profile_id)? {
            return Err(StoreError::AlreadyFavorited(profile_id));
        }
        if self.guest_favorites_count()? >= cap {
            return Err(StoreError::GuestLimitReached { limit: cap });
        }

        self.conn().execute(
            "INSERT INTO guest_favorites (profile_id, added_at) VALUES (?1, ?2)",
            params![profile_id.get(), Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Remove `profile_id` from the list. Idempotent: removing an absent id
    /// is not an error. Returns `true` if a row was deleted.
    pub fn remove_guest_favorite(&self, profile_id: ProfileId) -> Result<bool> {
        let affected = self.conn().execute(
            "DELETE FROM guest_favorites WHERE profile_id = ?1",
            params![profile_id.get()],
        )?;
        Ok(affected > 0)
    }

    /// Whether `profile_id` is currently favorited.
    pub fn has_guest_favorite(&self, profile_id: ProfileId) -> Result<bool> {
        let count: i64 = self.conn().query_row(
            "SELECT COUNT(*) FROM guest_favorites WHERE profile_id = ?1",
            params![profile_id.get()],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Number of favorited profiles.
    pub fn guest_favorites_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn()
            .query_row("SELECT COUNT(*) FROM guest_favorites", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// All favorited profile ids in insertion order.
    pub fn list_guest_favorites(&self) -> Result<Vec<ProfileId>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT profile_id FROM guest_favorites ORDER BY seq ASC")?;

        let rows = stmt.query_map([], |row| row.get::<_, i64>(0))?;

        let mut ids = Vec::new();
        for row in rows {
            let raw = row?;
            let id = ProfileId::new(raw).map_err(|e| StoreError::CorruptValue {
                key: "guest_favorites".to_string(),
                reason: e.to_string(),
            })?;
            ids.push(id);
        }
        Ok(ids)
    }

    /// Drop the whole list (after a successful transfer to an account).
    pub fn clear_guest_favorites(&self) -> Result<()> {
        self.conn().execute("DELETE FROM guest_favorites", [])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use becometry_shared::constants::MAX_GUEST_FAVORITES;

    fn pid(raw: i64) -> ProfileId {
        ProfileId::new(raw).unwrap()
    }

    #[test]
    fn sixth_distinct_add_is_rejected_and_cache_unchanged() {
        // P1 / Scenario A.
        let db = Database::open_in_memory().unwrap();

        for raw in [101, 102, 103, 104, 105] {
            db.add_guest_favorite(pid(raw), MAX_GUEST_FAVORITES).unwrap();
        }
        assert_eq!(db.guest_favorites_count().unwrap(), 5);

        match db.add_guest_favorite(pid(106), MAX_GUEST_FAVORITES) {
            Err(StoreError::GuestLimitReached { limit: 5 }) => {}
            other => panic!("expected GuestLimitReached, got {other:?}"),
        }

        let ids: Vec<i64> = db
            .list_guest_favorites()
            .unwrap()
            .iter()
            .map(|p| p.get())
            .collect();
        assert_eq!(ids, [101, 102, 103, 104, 105]);
    }

    #[test]
    fn duplicate_add_is_rejected_without_growing_the_list() {
        let db = Database::open_in_memory().unwrap();
        db.add_guest_favorite(pid(7), MAX_GUEST_FAVORITES).unwrap();

        match db.add_guest_favorite(pid(7), MAX_GUEST_FAVORITES) {
            Err(StoreError::AlreadyFavorited(id)) => assert_eq!(id, pid(7)),
            other => panic!("expected AlreadyFavorited, got {other:?}"),
        }
        assert_eq!(db.guest_favorites_count().unwrap(), 1);
    }

    #[test]
    fn remove_is_idempotent() {
        // P2.
        let db = Database::open_in_memory().unwrap();
        db.add_guest_favorite(pid(9), MAX_GUEST_FAVORITES).unwrap();

        assert!(db.remove_guest_favorite(pid(9)).unwrap());
        assert!(!db.remove_guest_favorite(pid(9)).unwrap());
        assert_eq!(db.guest_favorites_count().unwrap(), 0);
    }

    #[test]
    fn list_preserves_insertion_order_after_removal() {
        let db = Database::open_in_memory().unwrap();
        for raw in [3, 1, 2] {
            db.add_guest_favorite(pid(raw), MAX_GUEST_FAVORITES).unwrap();
        }
        db.remove_guest_favorite(pid(1)).unwrap();

        let ids: Vec<i64> = db
            .list_guest_favorites()
            .unwrap()
            .iter()
            .map(|p| p.get())
            .collect();
        assert_eq!(ids, [3, 2]);
    }

    #[test]
    fn larger_cap_allows_more_entries() {
        // Backend-reported limit overrides the built-in 5.
        let db = Database::open_in_memory().unwrap();
        for raw in 1..=8 {
            db.add_guest_favorite(pid(raw), 10).unwrap();
        }
        assert_eq!(db.guest_favorites_count().unwrap(), 8);
    }

    #[test]
    fn cache_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");

        {
            let db = Database::open_at(&path).unwrap();
            db.add_guest_favorite(pid(42), MAX_GUEST_FAVORITES).unwrap();
        }

        let db = Database::open_at(&path).unwrap();
        assert!(db.has_guest_favorite(pid(42)).unwrap());
    }

    #[test]
    fn clear_empties_the_list() {
        let db = Database::open_in_memory().unwrap();
        for raw in [1, 2, 3] {
            db.add_guest_favorite(pid(raw), MAX_GUEST_FAVORITES).unwrap();
        }
        db.clear_guest_favorites().unwrap();
        assert_eq!(db.guest_favorites_count().unwrap(), 0);
    }
}
