//! Error types for lrukit.
//!
//! - [`ConfigError`]: a cache was configured with invalid parameters
//!   (currently only a zero capacity).
//! - [`InvariantError`]: a `check_invariants` walk found the lookup index and
//!   the recency list out of agreement. Seeing one is always a bug in this
//!   crate.
//!
//! Lookup misses are not errors; they are reported as `None`.
//!
//! ```
//! use lrukit::error::ConfigError;
//! use lrukit::policy::lru::LruCore;
//!
//! let err: ConfigError = LruCore::<u32, u32>::try_new(0).unwrap_err();
//! assert!(err.to_string().contains("capacity"));
//! ```

use std::fmt;

/// Error returned when internal cache invariants are violated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invariant violated: {}", self.0)
    }
}

impl std::error::Error for InvariantError {}

/// Error returned by fallible constructors when parameters are invalid.
///
/// Produced by [`LruCore::try_new`](crate::policy::lru::LruCore::try_new),
/// `LruCache::try_new` and
/// [`LruCacheBuilder::try_build_core`](crate::builder::LruCacheBuilder::try_build_core).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    pub(crate) fn zero_capacity() -> Self {
        Self::new("capacity must be greater than zero")
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}
