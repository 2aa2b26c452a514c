//! # Cache traits
//!
//! Two views of the same contract:
//!
//! ```text
//!   ┌──────────────────────────────┐      ┌──────────────────────────────┐
//!   │       CoreCache<K, V>        │      │         Cache<K, V>          │
//!   │  (single-threaded, &mut)     │      │  (shared, &self, locked)     │
//!   │                              │      │                              │
//!   │  insert(K, V) → Option<V>    │      │  set(K, V) → bool            │
//!   │  get(&K) → Option<&V>        │      │  get(&K) → Option<Arc<V>>    │
//!   │  contains(&K) → bool         │      │  clear()                     │
//!   │  len / is_empty / capacity   │      │  len / is_empty / capacity   │
//!   │  clear()                     │      │                              │
//!   └──────────────┬───────────────┘      └──────────────┬───────────────┘
//!                  │ implemented by                      │ implemented by
//!                  ▼                                     ▼
//!            LruCore<K, V>  ◄──── Mutex ────────── LruCache<K, V>
//! ```
//!
//! `CoreCache` is the policy surface: it needs exclusive access and hands
//! out borrowed values. `Cache` is what callers share across threads; it
//! returns owned `Arc<V>` handles because a borrow cannot outlive the lock.

use std::sync::Arc;

/// Operations every single-threaded cache core supports.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::LruCore;
/// use lrukit::traits::CoreCache;
/// use std::sync::Arc;
///
/// fn warm<C: CoreCache<u32, Arc<String>>>(cache: &mut C) {
///     cache.insert(1, Arc::new("one".to_string()));
/// }
///
/// let mut cache = LruCore::new(4);
/// warm(&mut cache);
/// assert!(cache.contains(&1));
/// ```
pub trait CoreCache<K, V> {
    /// Inserts or overwrites `key`. Returns the previous value on overwrite.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Returns the value for `key`, counting the lookup as a use.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Returns `true` if `key` is present. Does not count as a use.
    fn contains(&self, key: &K) -> bool;

    /// Number of live entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries.
    fn capacity(&self) -> usize;

    /// Drops every entry. Capacity is unchanged.
    fn clear(&mut self);
}

/// Thread-safe Set/Get/Clear contract.
///
/// Every method is linearizable: it appears to take effect atomically at
/// some point between call and return.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::LruCache;
/// use lrukit::traits::Cache;
///
/// fn remember(cache: &dyn Cache<String, u64>, name: &str, id: u64) -> bool {
///     cache.set(name.to_string(), id)
/// }
///
/// let cache = LruCache::new(8);
/// assert!(!remember(&cache, "alice", 1));
/// assert!(remember(&cache, "alice", 2));
/// assert_eq!(cache.get(&"alice".to_string()).as_deref(), Some(&2));
/// ```
pub trait Cache<K, V>: Send + Sync {
    /// Inserts or overwrites `key`; returns `true` if it was already present.
    fn set(&self, key: K, value: V) -> bool;

    /// Returns the value for `key` and marks it most recently used.
    fn get(&self, key: &K) -> Option<Arc<V>>;

    /// Drops every entry. Capacity is unchanged.
    fn clear(&self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn capacity(&self) -> usize;
}
