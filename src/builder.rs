//! Builder for LRU caches.
//!
//! Collects construction parameters in one place and offers both a clamping
//! `build*` path and a validating `try_build*` path.
//!
//! ## Example
//!
//! ```rust
//! use lrukit::builder::LruCacheBuilder;
//!
//! let mut core = LruCacheBuilder::new(100)
//!     .prealloc(false)
//!     .try_build_core::<u64, String>()
//!     .expect("capacity is non-zero");
//! core.set(1, "hello".to_string());
//! assert_eq!(core.peek(&1).map(|v| v.as_str()), Some("hello"));
//! ```

use std::hash::Hash;

use crate::error::ConfigError;
#[cfg(feature = "concurrency")]
use crate::policy::lru::LruCache;
use crate::policy::lru::{clamp_capacity, LruCore};

/// Construction parameters for [`LruCore`] and `LruCache`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LruCacheBuilder {
    capacity: usize,
    prealloc: bool,
}

impl LruCacheBuilder {
    /// Starts a builder for a cache of `capacity` entries.
    ///
    /// Storage for `capacity` entries is reserved up front unless
    /// [`prealloc(false)`](Self::prealloc) is set.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            prealloc: true,
        }
    }

    /// Whether to reserve index and list storage for the full capacity at
    /// construction. Turn off for large, rarely-filled caches.
    pub fn prealloc(mut self, prealloc: bool) -> Self {
        self.prealloc = prealloc;
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Checks the parameters without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::zero_capacity());
        }
        Ok(())
    }

    /// Builds a single-threaded core, rejecting invalid parameters.
    pub fn try_build_core<K, V>(self) -> Result<LruCore<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        self.validate()?;
        Ok(LruCore::with_storage(self.capacity, self.prealloc))
    }

    /// Builds a single-threaded core, clamping a zero capacity to one.
    pub fn build_core<K, V>(self) -> LruCore<K, V>
    where
        K: Eq + Hash + Clone,
    {
        LruCore::with_storage(clamp_capacity(self.capacity), self.prealloc)
    }

    /// Builds a thread-safe cache, rejecting invalid parameters.
    #[cfg(feature = "concurrency")]
    pub fn try_build<K, V>(self) -> Result<LruCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        self.try_build_core().map(LruCache::from)
    }

    /// Builds a thread-safe cache, clamping a zero capacity to one.
    #[cfg(feature = "concurrency")]
    pub fn build<K, V>(self) -> LruCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        LruCache::from(self.build_core())
    }
}
