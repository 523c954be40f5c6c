use std::sync::atomic::{AtomicU64, Ordering};

use crate::metrics::snapshot::{DequeMetricsSnapshot, StoreMetricsSnapshot};

/// Counters shared by the bounded FIFO and LIFO containers.
#[derive(Debug, Default)]
pub(crate) struct DequeCounters {
    inserts: AtomicU64,
    removals: AtomicU64,
    evictions: AtomicU64,
    empty_removals: AtomicU64,
}

impl DequeCounters {
    pub(crate) fn snapshot(&self, len: usize, limit: usize) -> DequeMetricsSnapshot {
        DequeMetricsSnapshot {
            inserts: self.inserts.load(Ordering::Relaxed),
            removals: self.removals.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            empty_removals: self.empty_removals.load(Ordering::Relaxed),
            len,
            limit,
        }
    }

    #[inline]
    pub(crate) fn inc_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn inc_removal(&self) {
        self.removals.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn inc_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn inc_empty_removal(&self) {
        self.empty_removals.fetch_add(1, Ordering::Relaxed);
    }
}

/// Counters for the keyed store.
#[derive(Debug, Default)]
pub(crate) struct StoreCounters {
    inserts: AtomicU64,
    updates: AtomicU64,
    removes: AtomicU64,
    clears: AtomicU64,
    lookups: AtomicU64,
    misses: AtomicU64,
}

impl StoreCounters {
    pub(crate) fn snapshot(&self, len: usize) -> StoreMetricsSnapshot {
        StoreMetricsSnapshot {
            inserts: self.inserts.load(Ordering::Relaxed),
            updates: self.updates.load(Ordering::Relaxed),
            removes: self.removes.load(Ordering::Relaxed),
            clears: self.clears.load(Ordering::Relaxed),
            lookups: self.lookups.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            len,
        }
    }

    #[inline]
    pub(crate) fn inc_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn inc_update(&self) {
        self.updates.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn add_removes(&self, n: u64) {
        self.removes.fetch_add(n, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn inc_clear(&self) {
        self.clears.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a key lookup and whether it missed.
    #[inline]
    pub(crate) fn record_lookup(&self, hit: bool) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        if !hit {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
    }
}
