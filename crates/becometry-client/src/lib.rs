//! # becometry-client
//!
//! Service layer for Becometry favorites: the HTTP client for the backend's
//! favorites endpoints, the guest upgrade prompt, and the
//! [`FavoritesService`] orchestrator a UI shell drives from its event
//! handlers. No rendering or framework lifecycle lives here; every operation
//! is an explicit, directly callable method.

pub mod api;
pub mod config;
pub mod prompt;
pub mod service;

mod error;

pub use api::{AddOutcome, FavoritesApi, FavoritesCount};
pub use config::ClientConfig;
pub use error::ClientError;
pub use prompt::{PromptState, UpgradePrompt};
pub use service::{FavoritesService, Toggle};

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize tracing for an embedding application shell.
///
/// Honors `RUST_LOG`; defaults to debug for the becometry crates and warn
/// for everything else.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("becometry_client=debug,becometry_store=info,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
