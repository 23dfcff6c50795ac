use std::collections::HashMap;
use std::fmt::Display;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use recipehub_core::cache_keys::CacheKey;
use tracing::{debug, trace, warn};

use crate::entry::{AnyData, Entry, Freshness};

/// Default time a fetched result is served without revalidation.
pub const DEFAULT_STALE_TIME: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
    pub stale_time: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stale_time: DEFAULT_STALE_TIME,
        }
    }
}

enum Lookup<T> {
    Hit(Arc<T>),
    Revalidate(Arc<T>, u64),
    Fetch(u64),
}

/// Keyed store of query results shared by every view.
///
/// Cloning is cheap; clones share the same entries. The lock is only held
/// for short synchronous sections, never across an `.await`.
#[derive(Clone, Default)]
pub struct QueryCache {
    entries: Arc<Mutex<HashMap<CacheKey, Entry>>>,
    /// Source of every epoch. Never reset, so a removed and recreated key
    /// cannot match a fetch that started before the removal.
    epochs: Arc<AtomicU64>,
    config: CacheConfig,
}

impl QueryCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            epochs: Arc::new(AtomicU64::new(0)),
            config,
        }
    }

    pub fn config(&self) -> CacheConfig {
        self.config
    }

    fn next_epoch(&self) -> u64 {
        self.epochs.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read `key`, fetching through `fetch` when needed.
    ///
    /// - fresh data is returned as is;
    /// - aged data is returned immediately and one background refetch is
    ///   spawned for the key;
    /// - missing or invalidated data is fetched before returning.
    ///
    /// A failed foreground fetch leaves the cache as it was.
    pub async fn query<T, E, F, Fut>(&self, key: CacheKey, fetch: F) -> Result<Arc<T>, E>
    where
        T: Send + Sync + 'static,
        E: Display + Send + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        match self.lookup::<T>(&key) {
            Lookup::Hit(data) => {
                trace!(key = %key, "cache hit");
                Ok(data)
            }
            Lookup::Revalidate(data, epoch) => {
                debug!(key = %key, "serving aged data, revalidating in background");
                let cache = self.clone();
                let pending = fetch();
                tokio::spawn(async move {
                    match pending.await {
                        Ok(value) => {
                            cache.store(&key, epoch, Arc::new(value));
                        }
                        Err(e) => {
                            warn!(key = %key, error = %e, "background refetch failed");
                            cache.end_refetch(&key, epoch);
                        }
                    }
                });
                Ok(data)
            }
            Lookup::Fetch(epoch) => {
                debug!(key = %key, "cache miss, fetching");
                let value = Arc::new(fetch().await?);
                self.store(&key, epoch, value.clone());
                Ok(value)
            }
        }
    }

    fn lookup<T: Send + Sync + 'static>(&self, key: &CacheKey) -> Lookup<T> {
        let now = Instant::now();
        let stale_time = self.config.stale_time;
        let mut entries = self.lock();
        let entry = entries
            .entry(key.clone())
            .or_insert_with(|| Entry::new(self.next_epoch()));

        let typed = entry
            .data
            .clone()
            .and_then(|data| data.downcast::<T>().ok());

        match (typed, entry.freshness(stale_time, now)) {
            (Some(data), Freshness::Fresh) => Lookup::Hit(data),
            (Some(data), Freshness::Aged) if entry.refetching => Lookup::Hit(data),
            (Some(data), Freshness::Aged) => {
                entry.refetching = true;
                Lookup::Revalidate(data, entry.epoch)
            }
            _ => Lookup::Fetch(entry.epoch),
        }
    }

    /// Store a fetch result if nothing invalidated the key since the fetch
    /// began. Returns whether the result was kept.
    fn store<T: Send + Sync + 'static>(&self, key: &CacheKey, epoch: u64, value: Arc<T>) -> bool {
        let mut entries = self.lock();
        match entries.get_mut(key) {
            Some(entry) if entry.epoch == epoch => {
                let data: AnyData = value;
                entry.fill(data, Instant::now());
                true
            }
            _ => {
                debug!(key = %key, "discarding result that settled after invalidation");
                false
            }
        }
    }

    fn end_refetch(&self, key: &CacheKey, epoch: u64) {
        let mut entries = self.lock();
        if let Some(entry) = entries.get_mut(key)
            && entry.epoch == epoch
        {
            entry.refetching = false;
        }
    }

    /// Run a mutation. On success, mark every key produced by
    /// `invalidates` (matched by prefix) stale; on failure touch nothing.
    pub async fn mutate<T, E, Fut, K>(&self, mutation: Fut, invalidates: K) -> Result<T, E>
    where
        Fut: Future<Output = Result<T, E>>,
        K: FnOnce(&T) -> Vec<CacheKey>,
    {
        let value = mutation.await?;
        let keys = invalidates(&value);
        let count = self.invalidate_many(&keys);
        debug!(keys = keys.len(), entries = count, "mutation settled, keys invalidated");
        Ok(value)
    }

    /// Mark every entry under `prefix` stale. Returns how many matched.
    pub fn invalidate(&self, prefix: &CacheKey) -> usize {
        self.invalidate_many(std::slice::from_ref(prefix))
    }

    pub fn invalidate_many(&self, prefixes: &[CacheKey]) -> usize {
        let mut entries = self.lock();
        let mut count = 0;
        for (key, entry) in entries.iter_mut() {
            if prefixes.iter().any(|p| key.starts_with(p)) {
                entry.mark_invalidated(self.next_epoch());
                count += 1;
            }
        }
        count
    }

    /// Drop every entry under `prefix`. In-flight fetches for removed keys
    /// are discarded when they settle.
    pub fn remove(&self, prefix: &CacheKey) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        before - entries.len()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Cached value for `key` regardless of freshness.
    pub fn get_query_data<T: Send + Sync + 'static>(&self, key: &CacheKey) -> Option<Arc<T>> {
        self.lock()
            .get(key)
            .and_then(|entry| entry.data.clone())
            .and_then(|data| data.downcast::<T>().ok())
    }

    /// Write a value directly. Counts as a fresh fetch, and supersedes any
    /// fetch still in flight for the key.
    pub fn set_query_data<T: Send + Sync + 'static>(&self, key: CacheKey, value: T) {
        let mut entries = self.lock();
        let entry = entries.entry(key).or_insert_with(|| Entry::new(0));
        entry.epoch = self.next_epoch();
        let data: AnyData = Arc::new(value);
        entry.fill(data, Instant::now());
    }

    pub fn freshness(&self, key: &CacheKey) -> Freshness {
        let now = Instant::now();
        self.lock()
            .get(key)
            .map(|entry| entry.freshness(self.config.stale_time, now))
            .unwrap_or(Freshness::Empty)
    }

    /// True unless the key holds data young enough to serve without a fetch.
    pub fn is_stale(&self, key: &CacheKey) -> bool {
        self.freshness(key) != Freshness::Fresh
    }

    /// Number of keys holding data.
    pub fn len(&self) -> usize {
        self.lock().values().filter(|e| e.data.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
