//! # becometry-store
//!
//! Durable client-side storage for the Becometry favorites subsystem, backed
//! by SQLite. Holds the two pieces of guest state that must survive restarts:
//! the anonymous session id and the cap-enforced guest favorites list.
//!
//! The crate exposes a synchronous [`Database`] handle; every mutation is
//! written through to disk before the call returns. When the on-disk database
//! cannot be opened the store degrades to an in-memory connection valid for
//! the process lifetime only, so a broken profile directory never takes the
//! application down.

pub mod database;
pub mod guest_cache;
pub mod migrations;
pub mod session;

mod error;

pub use database::Database;
pub use error::StoreError;
