/// Consumer binding - exposes resolution state with lifecycle semantics
use crate::resolution::{CacheKey, MediaReference, MediaUrlCache, ResolutionState, ResolveMedia};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::warn;

/// Per-consumer handle onto the resolution pipeline.
///
/// A binding checks the shared cache first, resolves on miss, and publishes
/// `ResolutionState` transitions over a watch channel. Changing the source
/// or dropping the binding cancels the observable effect of any in-flight
/// resolution: the request itself runs to completion (so its cache write
/// still lands), but a superseded result never overwrites newer state.
pub struct MediaBinding {
    cache: Arc<MediaUrlCache>,
    resolver: Arc<dyn ResolveMedia>,
    state_tx: watch::Sender<ResolutionState>,
    /// Bumped on every source change and on teardown; in-flight tasks
    /// publish only if their captured generation is still current
    generation: Arc<AtomicU64>,
}

impl MediaBinding {
    /// Create a binding over a shared cache and resolver
    pub fn new(cache: Arc<MediaUrlCache>, resolver: Arc<dyn ResolveMedia>) -> Self {
        let (state_tx, _) = watch::channel(ResolutionState::empty());
        Self {
            cache,
            resolver,
            state_tx,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Subscribe to resolution state transitions
    pub fn subscribe(&self) -> watch::Receiver<ResolutionState> {
        self.state_tx.subscribe()
    }

    /// Current resolution state
    pub fn state(&self) -> ResolutionState {
        self.state_tx.borrow().clone()
    }

    /// Point the binding at a new (identifier, variant) pair.
    ///
    /// An absent or empty identifier is the explicit empty state, published
    /// immediately without consulting the cache or the resolver. A cache hit
    /// publishes synchronously, never entering the loading state. A miss
    /// publishes the loading state and resolves in the background.
    pub async fn set_source(&self, reference: &MediaReference) {
        // Supersede any in-flight resolution
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let identifier = match reference.identifier() {
            Some(id) => id.to_string(),
            None => {
                self.publish(my_generation, ResolutionState::empty());
                return;
            }
        };

        let key = CacheKey::new(identifier.clone(), reference.variant);

        if let Some(url) = self.cache.lookup(&key).await {
            self.publish(my_generation, ResolutionState::resolved(url));
            return;
        }

        self.publish(my_generation, ResolutionState::loading());

        let cache = Arc::clone(&self.cache);
        let resolver = Arc::clone(&self.resolver);
        let state_tx = self.state_tx.clone();
        let generation = Arc::clone(&self.generation);
        let variant = reference.variant;

        tokio::spawn(async move {
            let state = match resolver.resolve(&identifier, variant).await {
                Ok(url) => {
                    // The cache write lands even for superseded requests,
                    // so future consumers still benefit from it
                    cache.store(key, url.clone()).await;
                    ResolutionState::resolved(url)
                }
                Err(e) => {
                    warn!("Media resolution failed for {}/{}: {}", identifier, variant, e);
                    ResolutionState::failed("Failed to load media".to_string())
                }
            };

            // A superseded or torn-down request never publishes; cancelled
            // failures are dropped silently, not surfaced. The generation
            // check runs inside the channel lock so a racing set_source
            // cannot slip between check and write.
            state_tx.send_if_modified(|current| {
                if generation.load(Ordering::SeqCst) == my_generation {
                    *current = state;
                    true
                } else {
                    false
                }
            });
        });
    }

    fn publish(&self, my_generation: u64, state: ResolutionState) {
        let generation = &self.generation;
        self.state_tx.send_if_modified(|current| {
            if generation.load(Ordering::SeqCst) == my_generation {
                *current = state;
                true
            } else {
                false
            }
        });
    }
}

impl Drop for MediaBinding {
    fn drop(&mut self) {
        // Teardown cancellation: in-flight tasks see a newer generation and
        // discard their results
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}
