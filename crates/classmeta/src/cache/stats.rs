// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::sync::atomic::{AtomicU64, Ordering};

/// Cache lookup statistics.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LookupStats {
    /// Lookups served from a fresh cached entry.
    pub hits: u64,
    /// Lookups that found no fresh entry and either built or waited.
    ///
    /// Balances as `builds + failures + coalesced` plus any aborted builds.
    /// A waiter whose result went stale retries and is counted again.
    pub misses: u64,
    /// Descriptors built and published.
    pub builds: u64,
    /// Lookups that waited on another caller's build.
    pub coalesced: u64,
    /// Builds that ended in an error.
    pub failures: u64,
}

impl LookupStats {
    /// Fraction of lookups served without a miss, `0.0` when idle.
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[derive(Debug, Default)]
pub(super) struct StatsCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    builds: AtomicU64,
    coalesced: AtomicU64,
    failures: AtomicU64,
}

impl StatsCounters {
    pub(super) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(super) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(super) fn record_build(&self) {
        self.builds.fetch_add(1, Ordering::Relaxed);
    }

    pub(super) fn record_coalesced(&self) {
        self.coalesced.fetch_add(1, Ordering::Relaxed);
    }

    pub(super) fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(super) fn snapshot(&self) -> LookupStats {
        LookupStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            builds: self.builds.load(Ordering::Relaxed),
            coalesced: self.coalesced.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_and_ratio() {
        let counters = StatsCounters::default();
        assert_eq!(counters.snapshot().hit_ratio(), 0.0);

        counters.record_hit();
        counters.record_hit();
        counters.record_hit();
        counters.record_miss();
        counters.record_build();

        let stats = counters.snapshot();
        assert_eq!(stats.hits, 3);
        assert_eq!(stats.builds, 1);
        assert_eq!(stats.failures, 0);
        assert!((stats.hit_ratio() - 0.75).abs() < f64::EPSILON);
    }
}
