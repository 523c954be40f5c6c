//! Operation counters for the containers (feature `metrics`).
//!
//! Every container owns a counter block updated with relaxed atomics on the
//! mutating path. Counters are observational only; they never influence
//! container behavior.
//!
//! ```text
//!   BoundedQueue / BoundedStack ──► DequeCounters ──► DequeMetricsSnapshot ─┐
//!   KeyedStore                  ──► StoreCounters ──► StoreMetricsSnapshot ─┼─► MetricsExporter
//!                                                                           │
//!                                          PrometheusTextExporter ◄─────────┘
//! ```

pub mod counters;
pub mod exporter;
pub mod snapshot;
pub mod traits;

pub use exporter::PrometheusTextExporter;
pub use snapshot::{DequeMetricsSnapshot, StoreMetricsSnapshot};
pub use traits::{MetricsExporter, MetricsSnapshotProvider};
