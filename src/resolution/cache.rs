/// Client-side cache for resolved media URLs
use crate::config::FRESHNESS_WINDOW_SECS;
use crate::resolution::{CacheEntry, CacheKey};
use chrono::{Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Process-wide store of resolved URLs, keyed by (identifier, variant).
///
/// Entries older than the freshness window are treated as absent and purged
/// on next lookup, never served stale. The cache performs no network I/O;
/// deduplication of in-flight resolutions is the binding's responsibility.
pub struct MediaUrlCache {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
    /// Freshness window (default: 30 minutes)
    ttl: Duration,
}

impl MediaUrlCache {
    /// Create a cache with the default freshness window
    pub fn new() -> Self {
        Self::with_ttl(Duration::seconds(FRESHNESS_WINDOW_SECS as i64))
    }

    /// Create a cache with a custom freshness window
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Look up a fresh entry.
    ///
    /// Returns the cached URL if the entry is younger than the freshness
    /// window. An expired entry is deleted and reported as a miss.
    pub async fn lookup(&self, key: &CacheKey) -> Option<String> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if Utc::now() - entry.resolved_at < self.ttl => {
                    debug!("Media cache HIT: {}/{}", key.identifier, key.variant);
                    return Some(entry.resolved_url.clone());
                }
                Some(_) => {}
                None => {
                    debug!("Media cache MISS: {}/{}", key.identifier, key.variant);
                    return None;
                }
            }
        }

        // Entry looked expired; recheck under the write lock in case a
        // store refreshed it between locks
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(key) {
            if Utc::now() - entry.resolved_at < self.ttl {
                return Some(entry.resolved_url.clone());
            }
            debug!("Media cache EXPIRED: {}/{}", key.identifier, key.variant);
            entries.remove(key);
        }
        None
    }

    /// Store a resolved URL with a current timestamp.
    ///
    /// This is the only mutation path; the write fully replaces any prior
    /// entry for the key.
    pub async fn store(&self, key: CacheKey, resolved_url: String) {
        debug!("Media cache SET: {}/{}", key.identifier, key.variant);

        let entry = CacheEntry {
            resolved_url,
            resolved_at: Utc::now(),
        };
        self.entries.write().await.insert(key, entry);
    }

    /// Remove a cached entry (force re-resolution)
    pub async fn invalidate(&self, key: &CacheKey) {
        self.entries.write().await.remove(key);
    }

    /// Clean up expired cache entries, returning the number evicted
    pub async fn cleanup_expired(&self) -> usize {
        let cutoff = Utc::now() - self.ttl;

        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.resolved_at > cutoff);
        before - entries.len()
    }

    /// Number of entries currently held, expired or not
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache holds no entries
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for MediaUrlCache {
    fn default() -> Self {
        Self::new()
    }
}
