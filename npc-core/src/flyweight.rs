//! Generic flyweight cache.
//!
//! Maps a structural key to a shared, immutable record. The record is built
//! on the first request for its key; every later request with an equal key
//! gets the same `Arc` back.
//!
//! Entries are never evicted. The number of distinct kinds is expected to be
//! small, and a record handed out to a caller must stay the one returned for
//! its key for the life of the cache.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};

/// Counters describing how a cache has been used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Distinct keys stored.
    pub entries: usize,
    /// Requests answered from the cache.
    pub hits: u64,
    /// Requests that built a new record.
    pub misses: u64,
}

impl CacheStats {
    /// Total requests served.
    pub fn requests(&self) -> u64 {
        self.hits + self.misses
    }
}

/// A single-owner flyweight cache.
#[derive(Debug)]
pub struct FlyweightCache<K, V> {
    records: HashMap<K, Arc<V>>,
    hits: u64,
    misses: u64,
}

impl<K, V> Default for FlyweightCache<K, V> {
    fn default() -> Self {
        Self {
            records: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }
}

impl<K: Eq + Hash, V> FlyweightCache<K, V> {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the record for `key`, building it with `make` on a miss.
    ///
    /// On a hit `make` is not called: whatever it would have produced is
    /// discarded and the stored record is returned unchanged.
    pub fn get_or_create<F>(&mut self, key: K, make: F) -> Arc<V>
    where
        F: FnOnce(&K) -> V,
    {
        if let Some(existing) = self.records.get(&key) {
            self.hits += 1;
            return Arc::clone(existing);
        }

        let record = Arc::new(make(&key));
        self.misses += 1;
        self.records.insert(key, Arc::clone(&record));
        record
    }

    /// Look up a record without creating one.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.records.get(key).cloned()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.records.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.records.keys()
    }

    pub fn records(&self) -> impl Iterator<Item = &Arc<V>> {
        self.records.values()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.records.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }

    /// Drop every entry and reset the counters.
    ///
    /// Records already handed out stay alive in their holders; a later
    /// request for the same key builds a fresh one.
    pub fn clear(&mut self) {
        self.records.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

/// A flyweight cache that can be shared between threads.
///
/// Lookup, construction and insertion happen under one lock, so callers
/// racing on an unseen key all receive the same record.
#[derive(Debug)]
pub struct SharedFlyweightCache<K, V> {
    inner: Arc<Mutex<FlyweightCache<K, V>>>,
}

impl<K, V> Clone for SharedFlyweightCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> Default for SharedFlyweightCache<K, V> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FlyweightCache::default())),
        }
    }
}

impl<K: Eq + Hash, V> SharedFlyweightCache<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing cache.
    pub fn from_cache(cache: FlyweightCache<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    /// See [`FlyweightCache::get_or_create`]. `make` runs while the lock is
    /// held and must not touch this cache.
    pub fn get_or_create<F>(&self, key: K, make: F) -> Arc<V>
    where
        F: FnOnce(&K) -> V,
    {
        self.lock().get_or_create(key, make)
    }

    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.lock().get(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    // A panic inside `make` happens before the insert, so a poisoned cache
    // is still consistent.
    fn lock(&self) -> MutexGuard<'_, FlyweightCache<K, V>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
