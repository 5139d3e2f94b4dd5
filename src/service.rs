/// Service wiring and dependency injection
use crate::config::MediaConfig;
use crate::error::MediaResult;
use crate::resolution::{MediaBinding, MediaUrlCache, ResolveMedia, UrlResolver};
use chrono::Duration;
use std::sync::Arc;
use tracing::info;

/// Media service holding the shared cache and resolver.
///
/// Constructed once at application start and injected into consumers; each
/// consuming view takes its own [`MediaBinding`] while the cache is shared
/// process-wide.
#[derive(Clone)]
pub struct MediaService {
    config: Arc<MediaConfig>,
    cache: Arc<MediaUrlCache>,
    resolver: Arc<dyn ResolveMedia>,
}

impl MediaService {
    /// Create a new media service from configuration
    pub fn new(config: MediaConfig) -> MediaResult<Self> {
        config.validate()?;

        let cache = Arc::new(MediaUrlCache::with_ttl(Duration::seconds(
            config.freshness_ttl_secs as i64,
        )));
        let resolver = Arc::new(UrlResolver::new(config.clone())?);

        info!("Media service initialized for cloud {}", config.cloud_name);

        Ok(Self {
            config: Arc::new(config),
            cache,
            resolver,
        })
    }

    /// Create a service with a custom resolver (used by tests to inject
    /// stubs)
    pub fn with_resolver(config: MediaConfig, resolver: Arc<dyn ResolveMedia>) -> Self {
        let cache = Arc::new(MediaUrlCache::with_ttl(Duration::seconds(
            config.freshness_ttl_secs as i64,
        )));
        Self {
            config: Arc::new(config),
            cache,
            resolver,
        }
    }

    /// Create a binding for a single consumer
    pub fn binding(&self) -> MediaBinding {
        MediaBinding::new(Arc::clone(&self.cache), Arc::clone(&self.resolver))
    }

    /// Shared URL cache
    pub fn cache(&self) -> &Arc<MediaUrlCache> {
        &self.cache
    }

    /// Service configuration
    pub fn config(&self) -> &MediaConfig {
        &self.config
    }
}
