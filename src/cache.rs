//! TTL + single-flight cache for extraction results.
//!
//! [`TtlCache`] guards the expensive upstream transformer call: a fresh
//! entry short-circuits the whole pipeline, and concurrent misses for the
//! same key collapse into one in-flight computation whose outcome is shared
//! by every waiter.
//!
//! # Architecture
//!
//! moka's async cache supplies the machinery. `try_get_with` pins exactly
//! one `init` future per key per miss window; late callers await the
//! leader's result instead of computing again. A successful value is stored
//! and fanned out. An error is fanned out and **not** stored, so the next
//! call recomputes. If the leading caller is dropped while others wait,
//! moka hands the computation to a remaining waiter; in-flight work dies
//! only once it has zero waiters.
//!
//! Expiry is lazy (checked on read) plus moka's internal housekeeping;
//! readers always receive a snapshot clone, never a torn entry.
//!
//! The cache is an explicitly constructed value owned by its gateway, not
//! process-wide state: two gateways in one process never share entries,
//! and tests get isolation for free.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use moka::future::Cache;

use crate::telemetry;
use crate::{MuninError, Result};

/// Configuration for the extraction cache.
///
/// ```rust
/// # use munin::CacheConfig;
/// # use std::time::Duration;
/// let config = CacheConfig::new()
///     .max_entries(5_000)
///     .ttl(Duration::from_secs(600));
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached entries. Default: 10,000.
    pub max_entries: u64,
    /// Time-to-live for cached entries. Default: 30 minutes.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
            ttl: Duration::from_secs(30 * 60),
        }
    }
}

impl CacheConfig {
    /// Create a new config with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of cached entries.
    pub fn max_entries(mut self, n: u64) -> Self {
        self.max_entries = n;
        self
    }

    /// Set the time-to-live for cached entries.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// A settled cache entry: the value plus when it was stored.
///
/// Immutable once created; a refresh replaces the entry wholesale.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub stored_at: Instant,
}

impl<V> CacheEntry<V> {
    fn new(value: V) -> Self {
        Self {
            value,
            stored_at: Instant::now(),
        }
    }

    /// How long ago this entry was stored.
    pub fn age(&self) -> Duration {
        self.stored_at.elapsed()
    }
}

/// Key → value store with TTL expiry and single-flight de-duplication.
///
/// Keys are opaque strings compared exactly. Values are cloned out on
/// read, so `V` should be cheap to clone (the extraction results stored
/// here are `Arc`-backed JSON trees in practice).
#[derive(Clone)]
pub struct TtlCache<V> {
    inner: Cache<String, CacheEntry<V>>,
    /// Label attached to hit/miss counters.
    operation: &'static str,
}

impl<V> TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig, operation: &'static str) -> Self {
        let inner = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.ttl)
            .build();
        Self { inner, operation }
    }

    /// Look up a fresh entry.
    ///
    /// Returns `None` if the key was never stored or its entry has
    /// expired. Emits cache hit/miss metrics.
    pub async fn get(&self, key: &str) -> Option<CacheEntry<V>> {
        match self.inner.get(key).await {
            Some(entry) => {
                metrics::counter!(telemetry::CACHE_HITS_TOTAL, "operation" => self.operation)
                    .increment(1);
                Some(entry)
            }
            None => {
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "operation" => self.operation)
                    .increment(1);
                None
            }
        }
    }

    /// Insert (or replace) an entry, stamped now.
    pub async fn insert(&self, key: impl Into<String>, value: V) {
        self.inner.insert(key.into(), CacheEntry::new(value)).await;
    }

    /// Return a fresh entry, or run `init` to produce one. This is the core
    /// primitive.
    ///
    /// Exactly one `init` runs per key per miss window, no matter how many
    /// callers arrive concurrently; the rest await its outcome. Success is
    /// stored under the configured TTL and returned to everyone. Failure
    /// is returned to everyone and **not** stored.
    pub async fn get_or_try_compute<F>(&self, key: &str, init: F) -> Result<V>
    where
        F: Future<Output = Result<V>>,
    {
        let entry = self
            .inner
            .try_get_with(key.to_string(), async move {
                let value = init.await?;
                Ok::<_, MuninError>(CacheEntry::new(value))
            })
            .await
            .map_err(|e: Arc<MuninError>| (*e).clone())?;
        Ok(entry.value)
    }

    /// Remove an entry.
    pub async fn invalidate(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    /// Approximate number of live entries.
    ///
    /// moka evicts lazily; call [`run_pending_tasks`](Self::run_pending_tasks)
    /// first when an exact count matters (tests, stats endpoints).
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    /// Flush pending eviction housekeeping.
    pub async fn run_pending_tasks(&self) {
        self.inner.run_pending_tasks().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = CacheConfig::default();
        assert_eq!(config.max_entries, 10_000);
        assert_eq!(config.ttl, Duration::from_secs(1800));
    }

    #[test]
    fn config_builder() {
        let config = CacheConfig::new()
            .max_entries(500)
            .ttl(Duration::from_secs(60));
        assert_eq!(config.max_entries, 500);
        assert_eq!(config.ttl, Duration::from_secs(60));
    }

    #[tokio::test]
    async fn entry_records_storage_time() {
        let cache: TtlCache<u32> = TtlCache::new(&CacheConfig::default(), "test");
        cache.insert("k", 7).await;
        let entry = cache.get("k").await.unwrap();
        assert_eq!(entry.value, 7);
        assert!(entry.age() < Duration::from_secs(1));
    }
}
