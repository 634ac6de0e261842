//! # becometry-shared
//!
//! Domain types and pure logic shared between the Becometry favorites store
//! and client crates: identity newtypes, the wire models returned by the
//! favorites API, and the category-grouping fold used by the favorites view.
//!
//! Nothing in this crate performs I/O.

pub mod constants;
pub mod grouping;
pub mod models;
pub mod types;

mod error;

pub use error::ModelError;
pub use grouping::{flatten, group_by_category};
pub use models::{CategoryBucket, FavoriteProfile, GroupedFavorites};
pub use types::{AuthToken, Identity, ProfileId, SessionId};
