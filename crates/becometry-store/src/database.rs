//! Database connection management.
//!
//! The [`Database`] struct owns a [`rusqlite::Connection`] and guarantees
//! that migrations are run before any other operation.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use rusqlite::Connection;

use crate::error::{Result, StoreError};
use crate::migrations;

/// Wrapper around a [`rusqlite::Connection`].
pub struct Database {
    conn: Connection,
    /// True when the on-disk database could not be opened and we fell back
    /// to an in-memory connection. Guest state then lasts for the current
    /// process only.
    degraded: bool,
}

impl Database {
    /// Open (or create) the default application database.
    ///
    /// The database file is placed in the platform-appropriate data directory:
    /// - Linux:   `~/.local/share/becometry/becometry.db`
    /// - macOS:   `~/Library/Application Support/com.becometry.becometry/becometry.db`
    /// - Windows: `{FOLDERID_RoamingAppData}\becometry\becometry\data\becometry.db`
    ///
    /// If the directory or file is unusable this does not fail: the store
    /// degrades to an in-memory database so the UI keeps working, at the cost
    /// of guest favorites not surviving a restart.
    pub fn open_default() -> Result<Self> {
        match Self::try_open_on_disk() {
            Ok(db) => Ok(db),
            Err(e) => {
                tracing::warn!(error = %e, "durable storage unavailable, using in-memory store");
                Self::open_in_memory()
            }
        }
    }

    fn try_open_on_disk() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("com", "becometry", "becometry").ok_or(StoreError::NoDataDir)?;

        let data_dir = project_dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        let db_path = data_dir.join("becometry.db");

        tracing::info!(path = %db_path.display(), "opening database");

        Self::open_at(&db_path)
    }

    /// Open (or create) a database at an explicit path.
    ///
    /// This is useful for tests and for embedding the store inside custom
    /// directory layouts.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::init(conn, false)
    }

    /// Open a volatile in-memory database (the degraded mode of
    /// [`Database::open_default`]).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn, true)
    }

    fn init(conn: Connection, degraded: bool) -> Result<Self> {
        // Recommended SQLite settings.
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        // Run schema migrations.
        migrations::run_migrations(&conn)?;

        Ok(Self { conn, degraded })
    }

    /// Return a reference to the underlying `rusqlite::Connection`.
    ///
    /// Callers should prefer the typed helpers in [`crate::session`] and
    /// [`crate::guest_cache`], but direct access is occasionally needed for
    /// transactions or ad-hoc queries.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Whether this store is running in the in-memory degraded mode.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Return the filesystem path of the open database (if any).
    pub fn path(&self) -> Option<PathBuf> {
        self.conn.path().map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");

        let db = Database::open_at(&path).expect("should open");
        assert!(db.path().is_some());
        assert!(!db.is_degraded());
    }

    #[test]
    fn in_memory_store_reports_degraded() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.is_degraded());
    }

    #[test]
    fn reopening_runs_migrations_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");

        drop(Database::open_at(&path).unwrap());
        // Second open must not fail on already-applied migrations.
        let db = Database::open_at(&path).unwrap();
        let version: u32 = db
            .conn()
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .unwrap();
        assert_eq!(version, migrations::CURRENT_VERSION);
    }
}
