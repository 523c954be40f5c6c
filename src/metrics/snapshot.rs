/// Counters for a bounded queue or stack.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DequeMetricsSnapshot {
    pub inserts: u64,
    pub removals: u64,    // successful dequeue/pop, including evictions
    pub evictions: u64,   // removals triggered by an over-limit insert
    pub empty_removals: u64,

    // gauges captured at snapshot time
    pub len: usize,
    pub limit: usize,
}

/// Counters for a keyed store.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StoreMetricsSnapshot {
    pub inserts: u64,
    pub updates: u64,
    pub removes: u64, // includes entries dropped by clear
    pub clears: u64,
    pub lookups: u64,
    pub misses: u64,

    pub len: usize,
}
