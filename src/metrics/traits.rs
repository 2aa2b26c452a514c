//! # Metrics traits
//!
//! Recording and reading are split so the cache core only ever writes
//! counters, while tests, benches and embedding applications read them
//! through a snapshot.
//!
//! ```text
//!   ┌─────────────────────────┐        ┌──────────────────────────────┐
//!   │   CoreMetricsRecorder   │        │  MetricsSnapshotProvider<S>  │
//!   │  get hit/miss, insert,  │        │  snapshot() -> S             │
//!   │  evict, clear, remove   │        └──────────────────────────────┘
//!   └────────────┬────────────┘
//!                ▼
//!   ┌─────────────────────────┐        ┌──────────────────────────────┐
//!   │   LruMetricsRecorder    │        │   LruMetricsReadRecorder     │
//!   │   (&mut self paths)     │        │   (&self paths: peek)        │
//!   └─────────────────────────┘        └──────────────────────────────┘
//! ```

/// Counters shared by every cache policy.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// LRU-specific counters for `&mut self` paths.
pub trait LruMetricsRecorder: CoreMetricsRecorder {
    fn record_remove_call(&mut self);
    fn record_remove_found(&mut self);
}

/// LRU counters for `&self` paths (interior mutability).
pub trait LruMetricsReadRecorder {
    fn record_peek_call(&self);
    fn record_peek_found(&self);
    fn record_peek_lru_call(&self);
    fn record_peek_lru_found(&self);
}

/// Produces a point-in-time copy of a cache's metrics.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}
