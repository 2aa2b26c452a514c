//! Optional operation counters (feature `metrics`).

pub mod cell;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use metrics_impl::LruMetrics;
pub use snapshot::LruMetricsSnapshot;
pub use traits::MetricsSnapshotProvider;
