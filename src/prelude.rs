pub use crate::builder::LruCacheBuilder;
pub use crate::ds::{IntrusiveList, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "concurrency")]
pub use crate::policy::lru::LruCache;
pub use crate::policy::lru::LruCore;
pub use crate::traits::{Cache, CoreCache};
