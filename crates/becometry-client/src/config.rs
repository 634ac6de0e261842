//! Client configuration.

use std::time::Duration;

use becometry_shared::constants::DEFAULT_API_URL;

/// Configuration for the favorites API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend API, without a trailing slash.
    /// Env: `BECOMETRY_API_URL`
    /// Default: `http://localhost:5001/api`
    pub api_url: String,

    /// Per-request timeout.
    /// Env: `BECOMETRY_HTTP_TIMEOUT_SECS`
    /// Default: 10 seconds.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("BECOMETRY_API_URL") {
            if !url.is_empty() {
                config.api_url = url;
            }
        }

        if let Ok(val) = std::env::var("BECOMETRY_HTTP_TIMEOUT_SECS") {
            match val.parse::<u64>() {
                Ok(secs) if secs > 0 => config.request_timeout = Duration::from_secs(secs),
                _ => tracing::warn!(value = %val, "Invalid BECOMETRY_HTTP_TIMEOUT_SECS, using default"),
            }
        }

        config.api_url = config.api_url.trim_end_matches('/').to_string();
        config
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_backend() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url(), "http://localhost:5001/api");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ClientConfig {
            api_url: "https://api.becometry.example/api/".into(),
            ..ClientConfig::default()
        };
        assert_eq!(config.base_url(), "https://api.becometry.example/api");
    }
}
