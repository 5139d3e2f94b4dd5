/// Configuration management for the Inspecto media client
use crate::error::{MediaError, MediaResult};
use serde::{Deserialize, Serialize};
use std::env;

/// Default freshness window for cached resolved URLs (30 minutes).
///
/// Resolved URLs embed time-limited signatures from the media host; the
/// window conservatively approximates the host's signature validity.
pub const FRESHNESS_WINDOW_SECS: u64 = 1800;

/// Default timeout for a single resolution request
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Media client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Base URL of the media host (e.g., "https://res.mediahost.example")
    pub base_url: String,
    /// Cloud account identifier on the media host
    pub cloud_name: String,
    /// Timeout for a single outbound resolution request, in seconds
    pub request_timeout_secs: u64,
    /// Freshness window for cached resolved URLs, in seconds
    pub freshness_ttl_secs: u64,
    /// User-Agent header for HTTP requests
    pub user_agent: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            base_url: "https://res.mediahost.example".to_string(),
            cloud_name: String::new(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            freshness_ttl_secs: FRESHNESS_WINDOW_SECS,
            user_agent: "inspecto-media/0.1".to_string(),
        }
    }
}

impl MediaConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> MediaResult<Self> {
        dotenv::dotenv().ok();

        let base_url = env::var("INSPECTO_MEDIA_BASE_URL")
            .unwrap_or_else(|_| "https://res.mediahost.example".to_string());
        let cloud_name = env::var("INSPECTO_MEDIA_CLOUD_NAME")
            .map_err(|_| MediaError::Validation("Media cloud name required".to_string()))?;
        let request_timeout_secs = env::var("INSPECTO_MEDIA_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
            .parse()
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        let freshness_ttl_secs = env::var("INSPECTO_MEDIA_FRESHNESS_TTL_SECS")
            .unwrap_or_else(|_| FRESHNESS_WINDOW_SECS.to_string())
            .parse()
            .unwrap_or(FRESHNESS_WINDOW_SECS);
        let user_agent = env::var("INSPECTO_MEDIA_USER_AGENT")
            .unwrap_or_else(|_| "inspecto-media/0.1".to_string());

        let config = Self {
            base_url,
            cloud_name,
            request_timeout_secs,
            freshness_ttl_secs,
            user_agent,
        };
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> MediaResult<()> {
        if self.base_url.is_empty() {
            return Err(MediaError::Validation("Base URL cannot be empty".to_string()));
        }

        if self.cloud_name.is_empty() {
            return Err(MediaError::Validation(
                "Cloud name cannot be empty".to_string(),
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(MediaError::Validation(
                "Request timeout must be non-zero".to_string(),
            ));
        }

        Ok(())
    }
}
