use std::collections::VecDeque;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::{Equivalent, IndexMap};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Bounded least-recently-used cache, safe to share between threads.
///
/// Every entry carries the tick of its last use, and every use also pushes
/// `(tick, key)` onto a recency queue. Eviction pops the queue front until it
/// finds a pair whose tick is still current for its key and removes that
/// entry with `swap_remove`. Stale pairs are compacted away once the queue
/// grows past twice the capacity, so hits, inserts and evictions are
/// amortized O(1) whatever the capacity.
///
/// Lookups and stores are independent critical sections, so two callers that
/// miss on the same key both compute and both store; the later store wins.
#[derive(Debug)]
pub struct LruCache<K, V> {
    inner: Mutex<Inner<K, V>>,
    capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

#[derive(Debug)]
struct Inner<K, V> {
    /// key -> (value, tick of last use)
    entries: IndexMap<K, (V, u64)>,
    /// `(tick, key)` per use, oldest first; may hold stale ticks
    recency: VecDeque<(u64, K)>,
    tick: u64,
}

impl<K, V> Inner<K, V>
where
    K: Hash + Eq + Clone,
{
    fn touch(&mut self, key: K) -> u64 {
        self.tick += 1;
        self.recency.push_back((self.tick, key));
        self.tick
    }

    fn is_current(&self, tick: u64, key: &K) -> bool {
        self.entries.get(key).is_some_and(|(_, last)| *last == tick)
    }

    /// Remove the least recently used entry
    fn evict(&mut self) -> Option<K> {
        while let Some((tick, key)) = self.recency.pop_front() {
            if self.is_current(tick, &key) {
                self.entries.swap_remove(&key);
                return Some(key);
            }
        }
        None
    }

    fn compact(&mut self, capacity: usize) {
        if self.recency.len() <= capacity.saturating_mul(2) {
            return;
        }
        let entries = &self.entries;
        self.recency
            .retain(|(tick, key)| entries.get(key).is_some_and(|(_, last)| last == tick));
    }
}

/// Counters of a cache at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub entries: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create a cache holding at most `capacity` entries.
    /// A capacity of 0 is raised to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Mutex::new(Inner {
                entries: IndexMap::with_capacity(capacity.min(1024)),
                recency: VecDeque::new(),
                tick: 0,
            }),
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Look a key up and mark it as most recently used.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        let mut inner = self.inner.lock();
        let (found, value) = match inner.entries.get_full(key) {
            Some((_, found, (value, _))) => (found.clone(), value.clone()),
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                return None;
            }
        };
        let tick = inner.touch(found.clone());
        if let Some((_, last)) = inner.entries.get_mut(&found) {
            *last = tick;
        }
        inner.compact(self.capacity);
        self.hits.fetch_add(1, Ordering::Relaxed);
        Some(value)
    }

    /// Store a value as the most recently used entry.
    ///
    /// # Returns
    /// * `Option<K>` - the key evicted to make room, if any
    pub fn insert(&self, key: K, value: V) -> Option<K> {
        let mut inner = self.inner.lock();
        let tick = inner.touch(key.clone());
        inner.entries.insert(key, (value, tick));

        let evicted = if inner.entries.len() > self.capacity {
            inner.evict()
        } else {
            None
        };
        if evicted.is_some() {
            self.evictions.fetch_add(1, Ordering::Relaxed);
        }
        inner.compact(self.capacity);
        evicted
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.inner.lock().entries.contains_key(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every entry. Counters are kept.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.recency.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }

    #[cfg(test)]
    fn recency_len(&self) -> usize {
        self.inner.lock().recency.len()
    }
}
