//! v001 -- Initial schema creation.
//!
//! Creates the `kv` table (session id and other small durable values) and the
//! `guest_favorites` list. Both names are part of the durable contract: they
//! must stay stable across releases or existing guest state is orphaned.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Key/value pairs (session id lives under the key 'sessionId')
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS kv (
    key   TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
);

-- ----------------------------------------------------------------
-- Guest favorites: ordered distinct profile ids
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS guest_favorites (
    seq        INTEGER PRIMARY KEY AUTOINCREMENT,  -- insertion order
    profile_id INTEGER NOT NULL UNIQUE,
    added_at   TEXT NOT NULL                       -- ISO-8601 / RFC-3339
);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
