/// End-to-end tests for the media resolution pipeline
///
/// Exercises the cache, binding, and cancellation semantics against a
/// scripted resolver; no network calls are made.
use async_trait::async_trait;
use inspecto_media::{
    CacheKey, MediaConfig, MediaError, MediaReference, MediaResult, MediaService, MediaVariant,
    ResolutionState, ResolveMedia,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::{sleep, Duration};

/// Resolver stub with per-identifier delays and failure injection
struct ScriptedResolver {
    calls: AtomicUsize,
    delays: HashMap<String, Duration>,
    failing: HashSet<String>,
}

impl ScriptedResolver {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            delays: HashMap::new(),
            failing: HashSet::new(),
        }
    }

    fn with_delay(mut self, identifier: &str, delay: Duration) -> Self {
        self.delays.insert(identifier.to_string(), delay);
        self
    }

    fn with_failure(mut self, identifier: &str) -> Self {
        self.failing.insert(identifier.to_string());
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResolveMedia for ScriptedResolver {
    async fn resolve(&self, identifier: &str, variant: MediaVariant) -> MediaResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(identifier) {
            sleep(*delay).await;
        }

        if self.failing.contains(identifier) {
            return Err(MediaError::ResolutionFailed(
                "Media host returned error: 404 Not Found".to_string(),
            ));
        }

        Ok(format!("https://host/{}/{}", variant, identifier))
    }
}

/// Install a subscriber so resolution failures show up in test output
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inspecto_media=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

fn test_config() -> MediaConfig {
    MediaConfig {
        cloud_name: "inspecto".to_string(),
        ..MediaConfig::default()
    }
}

fn test_service(resolver: Arc<ScriptedResolver>) -> MediaService {
    MediaService::with_resolver(test_config(), resolver)
}

/// Wait until the binding leaves the loading state
async fn wait_settled(rx: &mut watch::Receiver<ResolutionState>) -> ResolutionState {
    loop {
        let state = rx.borrow_and_update().clone();
        if !state.is_loading && (!state.url.is_empty() || state.error.is_some()) {
            return state;
        }
        rx.changed().await.unwrap();
    }
}

#[tokio::test]
async fn cache_hit_avoids_resolver_call() {
    let resolver = Arc::new(ScriptedResolver::new());
    let service = test_service(Arc::clone(&resolver));

    // First consumer resolves and populates the cache
    let binding = service.binding();
    let mut rx = binding.subscribe();
    binding
        .set_source(&MediaReference::new("veh-42", MediaVariant::Face))
        .await;
    let state = wait_settled(&mut rx).await;
    assert_eq!(state.url, "https://host/face/veh-42");
    assert_eq!(resolver.calls(), 1);

    // Second consumer gets the cached URL synchronously, no new call
    let second = service.binding();
    second
        .set_source(&MediaReference::new("veh-42", MediaVariant::Face))
        .await;
    let state = second.state();
    assert_eq!(state.url, "https://host/face/veh-42");
    assert!(!state.is_loading);
    assert_eq!(resolver.calls(), 1);
}

#[tokio::test]
async fn cache_expiry_forces_re_resolution() {
    let resolver = Arc::new(ScriptedResolver::new());
    let config = MediaConfig {
        // Zero freshness window: every stored entry is already stale
        freshness_ttl_secs: 0,
        ..test_config()
    };
    let service = MediaService::with_resolver(config, resolver.clone());

    let binding = service.binding();
    let mut rx = binding.subscribe();
    binding
        .set_source(&MediaReference::new("veh-42", MediaVariant::Raw))
        .await;
    wait_settled(&mut rx).await;
    assert_eq!(resolver.calls(), 1);

    // The entry aged past the window, so the next observation misses and
    // resolves again
    binding
        .set_source(&MediaReference::new("veh-42", MediaVariant::Raw))
        .await;
    wait_settled(&mut rx).await;
    assert_eq!(resolver.calls(), 2);
}

#[tokio::test]
async fn variants_maintain_independent_entries() {
    let resolver = Arc::new(ScriptedResolver::new());
    let service = test_service(Arc::clone(&resolver));

    let binding = service.binding();
    let mut rx = binding.subscribe();

    binding
        .set_source(&MediaReference::new("abc", MediaVariant::Face))
        .await;
    let face = wait_settled(&mut rx).await;

    binding
        .set_source(&MediaReference::new("abc", MediaVariant::Signature))
        .await;
    let signature = wait_settled(&mut rx).await;

    assert_ne!(face.url, signature.url);
    assert_eq!(resolver.calls(), 2);

    // Both entries live side by side in the cache
    let cache = service.cache();
    assert_eq!(
        cache.lookup(&CacheKey::new("abc", MediaVariant::Face)).await,
        Some(face.url)
    );
    assert_eq!(
        cache
            .lookup(&CacheKey::new("abc", MediaVariant::Signature))
            .await,
        Some(signature.url)
    );
}

#[tokio::test]
async fn empty_identifier_short_circuits() {
    let resolver = Arc::new(ScriptedResolver::new());
    let service = test_service(Arc::clone(&resolver));

    let binding = service.binding();
    binding.set_source(&MediaReference::none()).await;

    let state = binding.state();
    assert_eq!(state.url, "");
    assert!(!state.is_loading);
    assert!(state.error.is_none());
    assert_eq!(resolver.calls(), 0);
    assert!(service.cache().is_empty().await);
}

#[tokio::test(start_paused = true)]
async fn late_result_never_clobbers_newer_pair() {
    let resolver = Arc::new(
        ScriptedResolver::new()
            .with_delay("slow", Duration::from_millis(50))
            .with_delay("fast", Duration::from_millis(5)),
    );
    let service = test_service(Arc::clone(&resolver));

    let binding = service.binding();
    binding
        .set_source(&MediaReference::new("slow", MediaVariant::Raw))
        .await;
    binding
        .set_source(&MediaReference::new("fast", MediaVariant::Raw))
        .await;

    // Let both resolutions run to completion
    sleep(Duration::from_millis(100)).await;

    // The slower, superseded result must not overwrite the newer pair
    let state = binding.state();
    assert_eq!(state.url, "https://host/raw/fast");
    assert!(!state.is_loading);
    assert_eq!(resolver.calls(), 2);

    // The superseded resolution still landed in the cache
    let cache = service.cache();
    assert_eq!(
        cache.lookup(&CacheKey::new("slow", MediaVariant::Raw)).await,
        Some("https://host/raw/slow".to_string())
    );
}

#[tokio::test(start_paused = true)]
async fn teardown_discards_result_silently() {
    let resolver = Arc::new(ScriptedResolver::new().with_delay("slow", Duration::from_millis(50)));
    let service = test_service(Arc::clone(&resolver));

    let binding = service.binding();
    let rx = binding.subscribe();
    binding
        .set_source(&MediaReference::new("slow", MediaVariant::Raw))
        .await;

    // Consumer goes away before the resolution completes
    drop(binding);
    sleep(Duration::from_millis(100)).await;

    // No state update fired after teardown; the last observed state is
    // still the loading one
    let state = rx.borrow().clone();
    assert!(state.is_loading);
    assert!(state.error.is_none());

    // The cache write was not suppressed
    assert_eq!(
        service
            .cache()
            .lookup(&CacheKey::new("slow", MediaVariant::Raw))
            .await,
        Some("https://host/raw/slow".to_string())
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn superseded_result_never_lands_across_threads() {
    init_tracing();

    let resolver = Arc::new(ScriptedResolver::new().with_delay("slow", Duration::from_millis(20)));
    let config = MediaConfig {
        // Zero freshness window so every iteration resolves anew
        freshness_ttl_secs: 0,
        ..test_config()
    };
    let service = MediaService::with_resolver(config, resolver.clone());

    // Real threads and real timers; repeat to give an ordering race a
    // chance to surface
    for _ in 0..10 {
        let binding = service.binding();
        binding
            .set_source(&MediaReference::new("slow", MediaVariant::Raw))
            .await;
        binding
            .set_source(&MediaReference::new("fast", MediaVariant::Raw))
            .await;

        sleep(Duration::from_millis(40)).await;

        let state = binding.state();
        assert_eq!(state.url, "https://host/raw/fast");
        assert!(!state.is_loading);
    }
}

#[tokio::test]
async fn failed_resolution_surfaces_error_without_cache_write() {
    init_tracing();

    let resolver = Arc::new(ScriptedResolver::new().with_failure("gone"));
    let service = test_service(Arc::clone(&resolver));

    let binding = service.binding();
    let mut rx = binding.subscribe();
    binding
        .set_source(&MediaReference::new("gone", MediaVariant::Certificate))
        .await;

    let state = wait_settled(&mut rx).await;
    assert!(!state.is_loading);
    assert!(state.error.is_some());
    assert_eq!(state.url, "");
    assert_eq!(resolver.calls(), 1);

    // Failures never populate the cache
    assert!(service.cache().is_empty().await);

    // A manual re-trigger issues a fresh attempt (no automatic retry)
    binding
        .set_source(&MediaReference::new("gone", MediaVariant::Certificate))
        .await;
    wait_settled(&mut rx).await;
    assert_eq!(resolver.calls(), 2);
}
