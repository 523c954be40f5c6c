//! Snapshot and export seams for container metrics.
//!
//! Recording happens inside the containers; these traits only cover reading
//! a consistent-enough view ([`MetricsSnapshotProvider`]) and publishing it
//! somewhere ([`MetricsExporter`]).

/// Produce a point-in-time copy of a container's counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Export metrics snapshots to a monitoring backend.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
