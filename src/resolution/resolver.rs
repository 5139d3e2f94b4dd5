/// URL Resolver - Translates media references into display-ready URLs
use crate::config::MediaConfig;
use crate::error::{MediaError, MediaResult};
use crate::transform::MediaVariant;
use async_trait::async_trait;
use std::time::Duration;

/// Resolution seam consumed by the binding.
///
/// Implementations turn a non-empty identifier plus variant into a URL
/// renderable by a standard image element at the moment of return. No
/// caching, no retry; the caller decides both.
#[async_trait]
pub trait ResolveMedia: Send + Sync {
    async fn resolve(&self, identifier: &str, variant: MediaVariant) -> MediaResult<String>;
}

/// Production resolver delegating to the external media host
pub struct UrlResolver {
    http_client: reqwest::Client,
    config: MediaConfig,
}

impl UrlResolver {
    /// Create a new resolver
    pub fn new(config: MediaConfig) -> MediaResult<Self> {
        // Build HTTP client; the request timeout converts a hung call into
        // ResolutionFailed instead of pinning a consumer in the loading state
        let http_client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| MediaError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Compose the delivery URL for an identifier and variant.
    ///
    /// Read URLs carry no client-side auth token; the transform segment is
    /// omitted entirely for untransformed delivery.
    pub fn delivery_url(&self, identifier: &str, variant: MediaVariant) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        let encoded = urlencoding::encode(identifier);

        match variant.transform() {
            Some(transform) => format!(
                "{}/{}/image/upload/{}/{}",
                base,
                self.config.cloud_name,
                transform.url_segment(),
                encoded
            ),
            None => format!("{}/{}/image/upload/{}", base, self.config.cloud_name, encoded),
        }
    }
}

#[async_trait]
impl ResolveMedia for UrlResolver {
    async fn resolve(&self, identifier: &str, variant: MediaVariant) -> MediaResult<String> {
        if identifier.is_empty() {
            return Err(MediaError::ResolutionFailed(
                "Empty media identifier".to_string(),
            ));
        }

        let url = self.delivery_url(identifier, variant);

        // Single outbound call confirming the composed URL is renderable
        let response = self
            .http_client
            .head(&url)
            .send()
            .await
            .map_err(|e| MediaError::ResolutionFailed(format!("Media host unreachable: {}", e)))?;

        if !response.status().is_success() {
            return Err(MediaError::ResolutionFailed(format!(
                "Media host returned error: {}",
                response.status()
            )));
        }

        Ok(url)
    }
}
