/// Inspecto Media - signed media URL resolution and caching
///
/// Client-side utility for the Inspecto marketplace: turns opaque media
/// identifiers plus presentation variants into time-limited display URLs
/// served by the external media host. Resolved URLs are cached process-wide
/// for a 30-minute freshness window, and consumer bindings cancel the
/// observable effect of superseded in-flight resolutions.

pub mod config;
pub mod error;
pub mod jobs;
pub mod resolution;
pub mod service;
pub mod transform;

pub use config::{MediaConfig, FRESHNESS_WINDOW_SECS};
pub use error::{MediaError, MediaResult};
pub use jobs::MaintenanceScheduler;
pub use resolution::{
    CacheEntry, CacheKey, MediaBinding, MediaReference, MediaUrlCache, ResolutionState,
    ResolveMedia, UrlResolver,
};
pub use service::MediaService;
pub use transform::{CropMode, Gravity, MediaVariant, Transform};
