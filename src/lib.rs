//! lrukit: a bounded, thread-safe LRU cache.
//!
//! Layered leaf-first:
//!
//! - [`ds::SlotArena`] / [`ds::IntrusiveList`]: recency list with stable
//!   generational handles and O(1) positional updates. No locking.
//! - [`policy::lru::LruCore`]: key index plus recency list; implements the
//!   eviction policy. No locking.
//! - `policy::lru::LruCache` (feature `concurrency`, on by default): the core
//!   behind a single mutex, exposing `set` / `get` / `clear`.
//!
//! ```
//! use lrukit::LruCache;
//!
//! let cache = LruCache::new(3);
//! assert!(!cache.set("aaa", 100));
//! assert!(!cache.set("bbb", 200));
//! assert!(!cache.set("ccc", 300));
//! assert!(!cache.set("ddd", 400));
//!
//! assert!(cache.get(&"aaa").is_none());
//! assert_eq!(cache.get(&"bbb").as_deref(), Some(&200));
//! ```

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;

pub use builder::LruCacheBuilder;
pub use error::{ConfigError, InvariantError};
#[cfg(feature = "concurrency")]
pub use policy::lru::LruCache;
pub use policy::lru::LruCore;
