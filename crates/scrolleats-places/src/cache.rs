//! Time-bounded response cache keyed by query string.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// How long a cached response stays valid.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Source of "now" for cache expiry.
pub trait Clock: Send + Sync + std::fmt::Debug {
    fn now(&self) -> Instant;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    base: Instant,
    offset_ms: AtomicU64,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset_ms: AtomicU64::new(0),
        }
    }

    pub fn advance(&self, by: Duration) {
        let ms = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
        self.offset_ms.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + Duration::from_millis(self.offset_ms.load(Ordering::SeqCst))
    }
}

#[derive(Debug, Clone)]
struct Entry<V> {
    payload: V,
    inserted_at: Instant,
}

/// A map from key to payload where entries expire `ttl` after insertion.
///
/// Expired entries are dropped lazily on lookup or by [`TtlCache::purge_expired`].
#[derive(Debug)]
pub struct TtlCache<V> {
    entries: Mutex<HashMap<String, Entry<V>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> TtlCache<V> {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    #[must_use]
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    /// Returns the payload for `key` if it was inserted less than `ttl` ago.
    pub async fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if now.saturating_duration_since(entry.inserted_at) < self.ttl => {
                Some(entry.payload.clone())
            }
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub async fn insert(&self, key: impl Into<String>, payload: V) {
        let inserted_at = self.clock.now();
        self.entries.lock().await.insert(
            key.into(),
            Entry {
                payload,
                inserted_at,
            },
        );
    }

    /// Drops every expired entry and returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| now.saturating_duration_since(entry.inserted_at) < self.ttl);
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache_with_clock() -> (TtlCache<u32>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        (TtlCache::with_clock(DEFAULT_TTL, clock.clone()), clock)
    }

    #[tokio::test]
    async fn entry_is_served_before_ttl() {
        let (cache, clock) = cache_with_clock();
        cache.insert("k", 7).await;
        clock.advance(Duration::from_secs(4 * 60 + 59));
        assert_eq!(cache.get("k").await, Some(7));
    }

    #[tokio::test]
    async fn entry_expires_at_ttl() {
        let (cache, clock) = cache_with_clock();
        cache.insert("k", 7).await;
        clock.advance(DEFAULT_TTL);
        assert_eq!(cache.get("k").await, None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn reinsert_restarts_ttl() {
        let (cache, clock) = cache_with_clock();
        cache.insert("k", 1).await;
        clock.advance(Duration::from_secs(200));
        cache.insert("k", 2).await;
        clock.advance(Duration::from_secs(200));
        assert_eq!(cache.get("k").await, Some(2));
    }

    #[tokio::test]
    async fn purge_removes_only_expired() {
        let (cache, clock) = cache_with_clock();
        cache.insert("old", 1).await;
        clock.advance(Duration::from_secs(301));
        cache.insert("new", 2).await;
        assert_eq!(cache.purge_expired().await, 1);
        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.get("new").await, Some(2));
    }
}
