//! Freshness-keyed caching of sanitized icon content.
//!
//! Two tiers: a bounded in-process LRU map that is always consulted, and an
//! optional external shared cache that is only engaged in non-debug mode.
//! Both are keyed on `(library, name, mtime)`, so editing the source file
//! changes the key and stale content is never served; no explicit
//! invalidation call exists or is needed.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::IconError;
use crate::sanitize::SanitizedContent;

/// Default capacity of the in-process tier.
pub const DEFAULT_CAPACITY: usize = 256;

/// Default time-to-live of external cache entries: 30 days.
pub const DEFAULT_TTL_SECONDS: u64 = 60 * 60 * 24 * 30;

/// Capability for an external shared cache (memcached, Redis, or similar).
///
/// Absence and failure are both equivalent to a permanent miss: `get`
/// returns `None` on any error, and `set` swallows errors.  The pipeline
/// never surfaces external-cache trouble to the caller; it just recomputes.
pub trait ExternalCache: Send + Sync {
    /// Looks up `key`; `None` on miss or error.
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Stores `value` under `key` for at most `ttl_seconds`.
    fn set(&self, key: &str, value: &[u8], ttl_seconds: u64);
}

/// Cache key for one `(library, name, mtime)` triple.
///
/// Derived from the modification timestamp rather than a content hash, so
/// any edit to the source file changes the key.  Stale entries are left to
/// age out of the LRU and expire from the external tier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct CacheKey(String);

impl CacheKey {
    pub fn new(library: Option<&str>, name: &str, modified: SystemTime) -> CacheKey {
        let mtime = modified
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        CacheKey(format!(
            "svg-icon:{}:{}:{}",
            library.unwrap_or("default"),
            name,
            mtime
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Bounded in-process tier with least-recently-used eviction.
///
/// Insertion and eviction are serialized by the mutex; the lock is never
/// held while content is being computed, so lookups do not block on
/// computation of a different key.
struct ContentCache {
    inner: Mutex<LruState>,
}

struct LruState {
    entries: HashMap<CacheKey, SanitizedContent>,
    order: VecDeque<CacheKey>,
    capacity: usize,
}

impl ContentCache {
    fn new(capacity: usize) -> ContentCache {
        ContentCache {
            inner: Mutex::new(LruState {
                entries: HashMap::new(),
                order: VecDeque::new(),
                capacity: capacity.max(1),
            }),
        }
    }

    fn get(&self, key: &CacheKey) -> Option<SanitizedContent> {
        let mut state = self.inner.lock().unwrap();
        let hit = state.entries.get(key).cloned();
        if hit.is_some() {
            state.touch(key);
        }
        hit
    }

    fn insert(&self, key: CacheKey, content: SanitizedContent) {
        let mut state = self.inner.lock().unwrap();
        state.entries.insert(key.clone(), content);
        state.touch(&key);
        while state.order.len() > state.capacity {
            if let Some(evicted) = state.order.pop_front() {
                state.entries.remove(&evicted);
            }
        }
    }
}

impl LruState {
    fn touch(&mut self, key: &CacheKey) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
        self.order.push_back(key.clone());
    }
}

/// The two cache tiers plus the mode flag that selects between them.
pub(crate) struct CacheStack {
    local: ContentCache,
    external: Option<Box<dyn ExternalCache>>,
    ttl_seconds: u64,
    debug: bool,
}

impl CacheStack {
    pub fn new() -> CacheStack {
        CacheStack {
            local: ContentCache::new(DEFAULT_CAPACITY),
            external: None,
            ttl_seconds: DEFAULT_TTL_SECONDS,
            debug: false,
        }
    }

    /// Replaces the in-process tier with an empty one of `capacity` entries.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.local = ContentCache::new(capacity);
    }

    pub fn set_external(&mut self, external: Box<dyn ExternalCache>) {
        self.external = Some(external);
    }

    pub fn set_ttl(&mut self, ttl_seconds: u64) {
        self.ttl_seconds = ttl_seconds;
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// Returns the cached content for `key`, or computes, caches, and
    /// returns it.
    ///
    /// `compute` runs outside the local tier's lock, so concurrent first
    /// accesses to the same uncached key may each compute; they converge on
    /// identical output since the computation is a pure function of the
    /// keyed inputs.  Errors are not cached: a transient read failure is
    /// retried on the next access instead of being pinned.
    pub fn get_or_compute<F>(&self, key: &CacheKey, compute: F) -> Result<SanitizedContent, IconError>
    where
        F: FnOnce() -> Result<SanitizedContent, IconError>,
    {
        if let Some(content) = self.local.get(key) {
            tracing::debug!(key = key.as_str(), "icon cache hit (local)");
            return Ok(content);
        }

        if let Some(content) = self.external_get(key) {
            tracing::debug!(key = key.as_str(), "icon cache hit (external)");
            self.local.insert(key.clone(), content.clone());
            return Ok(content);
        }

        let content = compute()?;
        self.local.insert(key.clone(), content.clone());
        if let Some(external) = self.external_tier() {
            external.set(key.as_str(), content.as_str().as_bytes(), self.ttl_seconds);
        }

        Ok(content)
    }

    /// The external tier, if one is configured and the mode engages it.
    fn external_tier(&self) -> Option<&dyn ExternalCache> {
        if self.debug {
            return None;
        }
        self.external.as_deref()
    }

    fn external_get(&self, key: &CacheKey) -> Option<SanitizedContent> {
        let bytes = self.external_tier()?.get(key.as_str())?;
        // A corrupt entry is indistinguishable from a miss.
        let text = String::from_utf8(bytes).ok()?;
        Some(SanitizedContent::from_trusted(text))
    }
}
