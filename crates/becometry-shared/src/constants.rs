/// Maximum number of favorites a guest may hold before the backend requires
/// an account. The backend's `count.limit` field supersedes this value at
/// runtime; this is only the starting cap before the first round trip.
pub const MAX_GUEST_FAVORITES: usize = 5;

/// Durable storage key under which the anonymous session id is persisted.
/// Must stay stable across releases or existing guest favorites are orphaned.
pub const SESSION_ID_KEY: &str = "sessionId";

/// Name of the table holding the guest favorites id list.
/// Same stability requirement as [`SESSION_ID_KEY`].
pub const GUEST_FAVORITES_TABLE: &str = "guest_favorites";

/// Bucket name used when a favorited profile carries no category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Default API base URL, overridable via `BECOMETRY_API_URL`.
pub const DEFAULT_API_URL: &str = "http://localhost:5001/api";
