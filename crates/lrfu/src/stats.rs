//! Engine statistics
//!
//! The engine is single-threaded, so counters are plain integers owned by
//! the engine and copied out as a [`LrfuStats`] snapshot.

/// Snapshot of engine activity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LrfuStats {
    /// Current number of entries
    pub size: usize,

    /// Maximum allowed entries (None = unbounded)
    pub max_entries: Option<usize>,

    /// Total number of `get` calls that found their key
    pub hits: u64,

    /// Total number of `get` calls that did not find their key
    pub misses: u64,

    /// Total number of `set` calls that created an entry
    pub inserts: u64,

    /// Total number of `set` calls that replaced an existing value
    pub updates: u64,

    /// Total number of entries evicted by the engine
    pub evictions: u64,

    /// Total number of entries removed by `remove` or `pop`
    pub removals: u64,
}

impl LrfuStats {
    /// Calculate hit rate (hits / total accesses)
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_accesses();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Calculate miss rate (misses / total accesses)
    pub fn miss_rate(&self) -> f64 {
        let total = self.total_accesses();
        if total == 0 {
            0.0
        } else {
            self.misses as f64 / total as f64
        }
    }

    /// Calculate fill percentage (size / max_entries)
    pub fn fill_percentage(&self) -> Option<f64> {
        self.max_entries.map(|max| if max == 0 { 0.0 } else { self.size as f64 / max as f64 })
    }

    /// Total number of `get` operations (hits + misses)
    pub fn total_accesses(&self) -> u64 {
        self.hits + self.misses
    }
}

/// Counters maintained by the engine between snapshots
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Counters {
    hits: u64,
    misses: u64,
    inserts: u64,
    updates: u64,
    evictions: u64,
    removals: u64,
}

impl Counters {
    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_insert(&mut self) {
        self.inserts += 1;
    }

    pub(crate) fn record_update(&mut self) {
        self.updates += 1;
    }

    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub(crate) fn record_removal(&mut self) {
        self.removals += 1;
    }

    pub(crate) fn snapshot(&self, size: usize, max_entries: Option<usize>) -> LrfuStats {
        LrfuStats {
            size,
            max_entries,
            hits: self.hits,
            misses: self.misses,
            inserts: self.inserts,
            updates: self.updates,
            evictions: self.evictions,
            removals: self.removals,
        }
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for stats.
    use super::*;

    /// Validates `LrfuStats::default` behavior for the no accesses scenario.
    ///
    /// Assertions:
    /// - Confirms `stats.hit_rate()` equals `0.0`.
    /// - Confirms `stats.miss_rate()` equals `0.0`.
    /// - Ensures `stats.fill_percentage().is_none()` evaluates to true.
    #[test]
    fn test_stats_no_accesses() {
        let stats = LrfuStats::default();
        assert_eq!(stats.hit_rate(), 0.0);
        assert_eq!(stats.miss_rate(), 0.0);
        assert!(stats.fill_percentage().is_none());
    }

    /// Validates `LrfuStats::hit_rate` behavior for the rate calculation
    /// scenario.
    ///
    /// Assertions:
    /// - Ensures `(stats.hit_rate() - 0.75).abs() < 1e-10` evaluates to true.
    /// - Ensures `(stats.miss_rate() - 0.25).abs() < 1e-10` evaluates to true.
    /// - Confirms `stats.total_accesses()` equals `40`.
    /// - Confirms `stats.fill_percentage()` equals `Some(0.5)`.
    #[test]
    fn test_rate_calculation() {
        let stats = LrfuStats {
            size: 5,
            max_entries: Some(10),
            hits: 30,
            misses: 10,
            ..Default::default()
        };

        assert!((stats.hit_rate() - 0.75).abs() < 1e-10);
        assert!((stats.miss_rate() - 0.25).abs() < 1e-10);
        assert_eq!(stats.total_accesses(), 40);
        assert_eq!(stats.fill_percentage(), Some(0.5));
    }

    #[test]
    fn test_counters_snapshot_and_reset() {
        let mut counters = Counters::default();
        counters.record_hit();
        counters.record_miss();
        counters.record_insert();
        counters.record_insert();
        counters.record_update();
        counters.record_eviction();
        counters.record_removal();

        let stats = counters.snapshot(1, None);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.inserts, 2);
        assert_eq!(stats.updates, 1);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.removals, 1);

        counters.reset();
        assert_eq!(counters.snapshot(0, None), LrfuStats::default());
    }
}
