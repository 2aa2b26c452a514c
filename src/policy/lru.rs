//! # Least Recently Used (LRU) Cache
//!
//! Bounded key→value cache with strict recency-based eviction.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                           LruCache<K, V>                                 │
//!   │                                                                          │
//!   │   ┌────────────────────────────────────────────────────────────────────┐ │
//!   │   │                    Arc<Mutex<LruCore<K, V>>>                       │ │
//!   │   └────────────────────────────────────────────────────────────────────┘ │
//!   │                                  │                                       │
//!   │                                  ▼                                       │
//!   │   ┌────────────────────────────────────────────────────────────────────┐ │
//!   │   │                         LruCore<K, V>                              │ │
//!   │   │                                                                    │ │
//!   │   │   index: FxHashMap<K, SlotId>                                      │ │
//!   │   │            │                                                       │ │
//!   │   │            ▼                                                       │ │
//!   │   │   order: IntrusiveList<Entry { key, value: Arc<V> }>               │ │
//!   │   │                                                                    │ │
//!   │   │     head ──► [MRU] ◄──► [ ... ] ◄──► [LRU] ◄── tail                │ │
//!   │   └────────────────────────────────────────────────────────────────────┘ │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operation flow
//!
//! ```text
//!   set(D) on a full cache (capacity 3)
//!
//!     head ──► [A] ◄──► [B] ◄──► [C] ◄── tail
//!
//!     1. push [D] at head, index D
//!     2. len (4) > capacity (3): pop tail [C], unindex C
//!
//!     head ──► [D] ◄──► [A] ◄──► [B] ◄── tail
//!
//!   get(B)
//!
//!     1. index lookup: O(1)
//!     2. move [B] to head: O(1), len unchanged
//!
//!     head ──► [B] ◄──► [D] ◄──► [A] ◄── tail
//! ```
//!
//! ## Capacity policy
//!
//! A cache always holds at least one entry. `new(0)` clamps the capacity to
//! one and logs a warning; `try_new(0)` returns a [`ConfigError`].
//!
//! ## Concurrency
//!
//! `LruCore` has no locking. `LruCache` wraps it in a single
//! `parking_lot::Mutex`: every operation, including `get`, reorders the list,
//! so a reader/writer split would buy nothing. Guards are scoped, so the lock
//! is released on every return path and on unwind. Operations are
//! linearizable.
//!
//! ## Values
//!
//! Values are stored as `Arc<V>`. `LruCache::get` hands back a clone of the
//! `Arc`, so a caller can keep using a value after it has been evicted and
//! the cache never clones or inspects `V` itself.

use std::fmt;
use std::hash::Hash;
use std::mem;
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::ds::intrusive_list::IntrusiveList;
use crate::ds::slot_arena::SlotId;
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LruMetricsReadRecorder, LruMetricsRecorder, MetricsSnapshotProvider,
};
#[cfg(feature = "concurrency")]
use crate::traits::Cache;
use crate::traits::CoreCache;

/// Payload stored in each list node.
#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: Arc<V>,
}

/// Single-threaded LRU core: lookup index plus recency list.
///
/// Invariant: `index.len() == order.len() <= capacity`, and every indexed
/// handle resolves to a node carrying the same key.
pub struct LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    index: FxHashMap<K, SlotId>,
    order: IntrusiveList<Entry<K, V>>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a core holding at most `capacity` entries.
    ///
    /// A capacity of 0 is clamped to 1.
    ///
    /// # Example
    /// ```
    /// use lrukit::policy::lru::LruCore;
    /// use lrukit::traits::CoreCache;
    ///
    /// let cache: LruCore<u32, String> = LruCore::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// assert_eq!(LruCore::<u32, String>::new(0).capacity(), 1);
    /// ```
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self::with_storage(clamp_capacity(capacity), true)
    }

    /// Creates a core, rejecting a zero capacity.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::zero_capacity());
        }
        Ok(Self::with_storage(capacity, true))
    }

    /// `capacity` must already be validated.
    pub(crate) fn with_storage(capacity: usize, prealloc: bool) -> Self {
        debug_assert!(capacity > 0);
        let (index, order) = if prealloc {
            (
                FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
                IntrusiveList::with_capacity(capacity),
            )
        } else {
            (FxHashMap::default(), IntrusiveList::new())
        };
        LruCore {
            index,
            order,
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        }
    }

    /// Inserts or overwrites `key`; returns `true` if the key was present.
    ///
    /// ```
    /// use lrukit::policy::lru::LruCore;
    ///
    /// let mut cache = LruCore::new(2);
    /// assert!(!cache.set("a", 1));
    /// assert!(cache.set("a", 2));
    /// assert_eq!(cache.peek(&"a").map(|v| **v), Some(2));
    /// ```
    #[inline]
    pub fn set(&mut self, key: K, value: V) -> bool {
        self.insert(key, Arc::new(value)).is_some()
    }

    /// Returns the value for `key` without changing recency order.
    pub fn peek(&self, key: &K) -> Option<&Arc<V>> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_call();

        let id = *self.index.get(key)?;
        let value = self.order.get(id).map(|entry| &entry.value);

        #[cfg(feature = "metrics")]
        {
            if value.is_some() {
                (&self.metrics).record_peek_found();
            }
        }

        value
    }

    /// Returns the next eviction candidate without removing it.
    pub fn peek_lru(&self) -> Option<(&K, &Arc<V>)> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lru_call();

        let entry = self.order.back()?;

        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_lru_found();

        Some((&entry.key, &entry.value))
    }

    /// Removes `key` and returns its value.
    pub fn remove(&mut self, key: &K) -> Option<Arc<V>> {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        let id = self.index.remove(key)?;
        let entry = self.order.remove(id);
        debug_assert!(entry.is_some(), "indexed key had no list node");

        #[cfg(feature = "metrics")]
        self.metrics.record_remove_found();

        self.debug_check_len();
        entry.map(|entry| entry.value)
    }

    /// Keys from most to least recently used.
    pub fn keys_mru(&self) -> impl Iterator<Item = &K> + '_ {
        self.order.iter().map(|entry| &entry.key)
    }

    /// Verifies that the index and the recency list agree.
    ///
    /// Walks the whole list, so it is O(n). Returns the first violation found.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.order.check_invariants()?;

        if self.index.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "index has {} keys but list has {} nodes",
                self.index.len(),
                self.order.len()
            )));
        }
        if self.order.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.order.len(),
                self.capacity
            )));
        }
        for (key, &id) in &self.index {
            match self.order.get(id) {
                Some(entry) if entry.key == *key => {},
                Some(_) => {
                    return Err(InvariantError::new(format!(
                        "slot {} carries a different key than its index entry",
                        id.index()
                    )));
                },
                None => {
                    return Err(InvariantError::new(format!(
                        "index points at freed slot {}",
                        id.index()
                    )));
                },
            }
        }
        Ok(())
    }

    fn evict_lru(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_evict_call();

        if let Some(entry) = self.order.pop_back() {
            self.index.remove(&entry.key);
            log::trace!("lru evicted tail entry (len now {})", self.order.len());

            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
        }
    }

    #[inline(always)]
    fn debug_check_len(&self) {
        debug_assert_eq!(
            self.index.len(),
            self.order.len(),
            "index and recency list diverged"
        );
        debug_assert!(self.order.len() <= self.capacity);
    }
}

impl<K, V> CoreCache<K, Arc<V>> for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Inserts at MRU, or overwrites in place and moves to MRU.
    ///
    /// A fresh key that pushes the length past capacity evicts exactly one
    /// entry: the current tail.
    fn insert(&mut self, key: K, value: Arc<V>) -> Option<Arc<V>> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            let previous = self
                .order
                .get_mut(id)
                .map(|entry| mem::replace(&mut entry.value, value));
            self.order.move_to_front(id);
            self.debug_check_len();
            return previous;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        let id = self.order.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);

        if self.order.len() > self.capacity {
            self.evict_lru();
        }

        self.debug_check_len();
        None
    }

    fn get(&mut self, key: &K) -> Option<&Arc<V>> {
        let id = match self.index.get(key) {
            Some(&id) => id,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return None;
            },
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.order.move_to_front(id);
        self.order.get(id).map(|entry| &entry.value)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        let discarded = self.order.len();
        self.order.clear();
        self.index.clear();
        log::debug!("lru cache cleared ({discarded} entries discarded)");
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        LruMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evict_calls: self.metrics.evict_calls,
            evicted_entries: self.metrics.evicted_entries,
            clear_calls: self.metrics.clear_calls,
            remove_calls: self.metrics.remove_calls,
            remove_found: self.metrics.remove_found,
            peek_calls: self.metrics.peek_calls.get(),
            peek_found: self.metrics.peek_found.get(),
            peek_lru_calls: self.metrics.peek_lru_calls.get(),
            peek_lru_found: self.metrics.peek_lru_found.get(),
            cache_len: self.order.len(),
            capacity: self.capacity,
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> fmt::Debug for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCore")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LRU core with a capacity of 16.
    fn default() -> Self {
        Self::new(16)
    }
}

impl<K, V> Extend<(K, V)> for LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

pub(crate) fn clamp_capacity(capacity: usize) -> usize {
    if capacity == 0 {
        log::warn!("lru cache capacity 0 is not allowed; using 1");
        1
    } else {
        capacity
    }
}

/// Thread-safe LRU cache: an [`LruCore`] behind one `parking_lot::Mutex`.
///
/// Cloning is cheap and yields a handle to the same cache.
#[cfg(feature = "concurrency")]
pub struct LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    inner: Arc<Mutex<LruCore<K, V>>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> Clone for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.lock();
        f.debug_struct("LruCache")
            .field("len", &cache.len())
            .field("capacity", &cache.capacity())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> Default for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache with a capacity of 16.
    fn default() -> Self {
        Self::new(16)
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> From<LruCore<K, V>> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn from(core: LruCore<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(core)),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries (0 is clamped to 1).
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let cache: LruCache<String, u32> = LruCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(capacity: usize) -> Self {
        LruCore::new(capacity).into()
    }

    /// Creates a cache, rejecting a zero capacity.
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// assert!(LruCache::<u32, u32>::try_new(0).is_err());
    /// assert!(LruCache::<u32, u32>::try_new(1).is_ok());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        LruCore::try_new(capacity).map(Self::from)
    }

    /// Inserts or overwrites `key`. Returns `true` if the key was already
    /// present (value replaced, entry refreshed to MRU), `false` if it was
    /// newly inserted (possibly evicting the LRU entry).
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let cache = LruCache::new(3);
    /// assert!(!cache.set("aaa", 100));
    /// assert!(cache.set("aaa", 300));
    /// assert_eq!(cache.get(&"aaa").as_deref(), Some(&300));
    /// ```
    pub fn set(&self, key: K, value: V) -> bool {
        let value = Arc::new(value);
        let mut cache = self.inner.lock();
        cache.insert(key, value).is_some()
    }

    /// Looks up `key` and marks it most recently used.
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let cache = LruCache::new(2);
    /// cache.set("a", 1);
    /// cache.set("b", 2);
    /// cache.get(&"a");
    /// cache.set("c", 3);
    /// assert!(cache.get(&"b").is_none());
    /// assert_eq!(cache.get(&"a").as_deref(), Some(&1));
    /// ```
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let mut cache = self.inner.lock();
        cache.get(key).map(Arc::clone)
    }

    /// Looks up `key` without changing recency order.
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        let cache = self.inner.lock();
        cache.peek(key).map(Arc::clone)
    }

    /// Returns a copy of the next eviction candidate.
    pub fn peek_lru(&self) -> Option<(K, Arc<V>)> {
        let cache = self.inner.lock();
        cache
            .peek_lru()
            .map(|(key, value)| (key.clone(), Arc::clone(value)))
    }

    pub fn contains(&self, key: &K) -> bool {
        let cache = self.inner.lock();
        cache.contains(key)
    }

    /// Removes `key` and returns its value.
    pub fn remove(&self, key: &K) -> Option<Arc<V>> {
        let mut cache = self.inner.lock();
        cache.remove(key)
    }

    /// Drops every entry. Capacity is unchanged.
    pub fn clear(&self) {
        let mut cache = self.inner.lock();
        cache.clear();
    }

    pub fn len(&self) -> usize {
        let cache = self.inner.lock();
        cache.len()
    }

    pub fn is_empty(&self) -> bool {
        let cache = self.inner.lock();
        cache.is_empty()
    }

    pub fn capacity(&self) -> usize {
        let cache = self.inner.lock();
        cache.capacity()
    }

    /// See [`LruCore::check_invariants`].
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let cache = self.inner.lock();
        cache.check_invariants()
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        let cache = self.inner.lock();
        cache.metrics_snapshot()
    }
}

#[cfg(all(feature = "concurrency", feature = "metrics"))]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> Cache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone + Send,
    V: Send + Sync,
{
    fn set(&self, key: K, value: V) -> bool {
        LruCache::set(self, key, value)
    }

    fn get(&self, key: &K) -> Option<Arc<V>> {
        LruCache::get(self, key)
    }

    fn clear(&self) {
        LruCache::clear(self)
    }

    fn len(&self) -> usize {
        LruCache::len(self)
    }

    fn capacity(&self) -> usize {
        LruCache::capacity(self)
    }
}
