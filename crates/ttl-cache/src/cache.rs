//! TTL cache with lazy, read-time eviction

use crate::clock::{Clock, SystemClock};
use crate::types::{CacheEntry, CacheStats};
use chrono::TimeDelta;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

/// A key/value cache whose entries stop being served once they reach the TTL
///
/// Every `get` and `set` is atomic with respect to the underlying map. Two
/// concurrent writers to the same key are not coordinated: the last write wins.
pub struct TtlCache<K, V> {
    entries: RwLock<HashMap<K, CacheEntry<V>>>,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Create a cache driven by the wall clock
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Create a cache driven by the given clock
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            clock,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    /// Get a value if it is younger than the TTL
    ///
    /// An expired entry is removed before `None` is returned.
    pub async fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let now = self.clock.now();

        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if !entry.is_expired(now, self.ttl) => {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return Some(entry.value.clone());
                }
                Some(_) => {}
                None => {
                    self.misses.fetch_add(1, Ordering::Relaxed);
                    return None;
                }
            }
        }

        // Re-check under the write lock: a `set` may have landed in between.
        {
            let mut entries = self.entries.write().await;
            let still_expired = entries
                .get(key)
                .is_some_and(|entry| entry.is_expired(now, self.ttl));
            if still_expired {
                if let Some(entry) = entries.remove(key) {
                    self.evictions.fetch_add(1, Ordering::Relaxed);
                    debug!(age_secs = entry.age(now).num_seconds(), "Cache entry expired");
                }
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Store a value, replacing any existing entry for the key
    pub async fn set(&self, key: K, value: V) {
        let entry = CacheEntry::new(value, self.clock.now());
        let mut entries = self.entries.write().await;
        entries.insert(key, entry);
    }

    /// Remove an entry regardless of age
    pub async fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let mut entries = self.entries.write().await;
        entries.remove(key).map(|entry| entry.value)
    }

    /// Number of stored entries, including expired ones not yet read
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len().await,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::{DateTime, Utc};

    fn test_cache() -> (TtlCache<String, Vec<u32>>, Arc<ManualClock>) {
        let start = DateTime::parse_from_rfc3339("2024-06-01T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let clock = Arc::new(ManualClock::new(start));
        let cache = TtlCache::with_clock(Duration::from_secs(60), clock.clone());
        (cache, clock)
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let (cache, _) = test_cache();
        assert!(cache.get("tenant-a").await.is_none());

        let stats = cache.stats().await;
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 0);
    }

    #[tokio::test]
    async fn test_entry_served_before_ttl() {
        let (cache, clock) = test_cache();
        let key = "tenant-a".to_string();
        cache.set(key.clone(), vec![1, 2, 3]).await;

        clock.advance(TimeDelta::seconds(59));
        assert_eq!(cache.get(&key).await, Some(vec![1, 2, 3]));
        assert_eq!(cache.stats().await.hits, 1);
    }

    #[tokio::test]
    async fn test_entry_evicted_after_ttl() {
        let (cache, clock) = test_cache();
        let key = "tenant-a".to_string();
        cache.set(key.clone(), vec![1]).await;

        clock.advance(TimeDelta::seconds(61));
        assert_eq!(cache.get(&key).await, None);

        let stats = cache.stats().await;
        assert_eq!(stats.entries, 0);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.misses, 1);
    }

    #[tokio::test]
    async fn test_entry_expires_exactly_at_ttl() {
        let (cache, clock) = test_cache();
        let key = "tenant-a".to_string();
        cache.set(key.clone(), vec![1]).await;

        clock.advance(TimeDelta::seconds(60));
        assert_eq!(cache.get(&key).await, None);
    }

    #[tokio::test]
    async fn test_expired_entry_kept_until_read() {
        let (cache, clock) = test_cache();
        cache.set("tenant-a".to_string(), vec![1]).await;

        clock.advance(TimeDelta::seconds(120));
        assert_eq!(cache.len().await, 1);

        cache.get("tenant-a").await;
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_set_overwrites_and_restamps() {
        let (cache, clock) = test_cache();
        let key = "tenant-a".to_string();
        cache.set(key.clone(), vec![1]).await;

        clock.advance(TimeDelta::seconds(50));
        cache.set(key.clone(), vec![2]).await;

        clock.advance(TimeDelta::seconds(50));
        assert_eq!(cache.get(&key).await, Some(vec![2]));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let (cache, clock) = test_cache();
        cache.set("tenant-a".to_string(), vec![1]).await;
        clock.advance(TimeDelta::seconds(30));
        cache.set("tenant-b".to_string(), vec![2]).await;
        clock.advance(TimeDelta::seconds(40));

        assert_eq!(cache.get("tenant-a").await, None);
        assert_eq!(cache.get("tenant-b").await, Some(vec![2]));
    }

    #[tokio::test]
    async fn test_remove() {
        let (cache, _) = test_cache();
        cache.set("tenant-a".to_string(), vec![7]).await;

        assert_eq!(cache.remove("tenant-a").await, Some(vec![7]));
        assert_eq!(cache.remove("tenant-a").await, None);
    }

    #[tokio::test]
    async fn test_concurrent_writers_last_wins() {
        let (cache, _) = test_cache();
        let cache = Arc::new(cache);

        let handles: Vec<_> = (0..8u32)
            .map(|i| {
                let cache = cache.clone();
                tokio::spawn(async move { cache.set("tenant-a".to_string(), vec![i]).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let value = cache.get("tenant-a").await.unwrap();
        assert_eq!(value.len(), 1);
        assert!(value[0] < 8);
        assert_eq!(cache.len().await, 1);
    }
}
