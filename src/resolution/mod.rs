/// Media URL Resolution System
///
/// Turns opaque media identifiers plus presentation variants into
/// time-limited display URLs, with a process-wide freshness cache and a
/// cancellation-safe consumer binding.

pub mod binding;
pub mod cache;
pub mod resolver;

pub use binding::MediaBinding;
pub use cache::MediaUrlCache;
pub use resolver::{ResolveMedia, UrlResolver};

use crate::transform::MediaVariant;
use chrono::{DateTime, Utc};

/// Reference to a piece of externally-hosted media
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaReference {
    /// Opaque identifier issued by the media host; `None` means no media
    /// attached
    pub identifier: Option<String>,
    /// Intended presentation transform
    pub variant: MediaVariant,
}

impl MediaReference {
    /// Create a reference to a hosted asset
    pub fn new(identifier: impl Into<String>, variant: MediaVariant) -> Self {
        Self {
            identifier: Some(identifier.into()),
            variant,
        }
    }

    /// The explicit empty state: no media attached
    pub fn none() -> Self {
        Self {
            identifier: None,
            variant: MediaVariant::Raw,
        }
    }

    /// Identifier if present and non-empty
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref().filter(|id| !id.is_empty())
    }
}

/// Cache key derived from an (identifier, variant) pair.
///
/// Identical pairs always yield identical keys; distinct pairs never
/// collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub identifier: String,
    pub variant: MediaVariant,
}

impl CacheKey {
    pub fn new(identifier: impl Into<String>, variant: MediaVariant) -> Self {
        Self {
            identifier: identifier.into(),
            variant,
        }
    }
}

/// A resolved, cached answer
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Fully-qualified URL last produced for this key
    pub resolved_url: String,
    /// Timestamp of resolution
    pub resolved_at: DateTime<Utc>,
}

/// Resolution state observed by a consumer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolutionState {
    /// Resolved display URL, empty until resolution succeeds
    pub url: String,
    /// A resolution is in flight
    pub is_loading: bool,
    /// Generic error message from the last failed resolution
    pub error: Option<String>,
}

impl ResolutionState {
    /// The explicit empty state (no media attached)
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn loading() -> Self {
        Self {
            url: String::new(),
            is_loading: true,
            error: None,
        }
    }

    pub(crate) fn resolved(url: String) -> Self {
        Self {
            url,
            is_loading: false,
            error: None,
        }
    }

    pub(crate) fn failed(message: String) -> Self {
        Self {
            url: String::new(),
            is_loading: false,
            error: Some(message),
        }
    }
}
