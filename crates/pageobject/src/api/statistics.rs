// Resolution statistics per root scope

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters updated by the engine. Cheap to share; read through [`Statistics::snapshot`].
#[derive(Debug, Default)]
pub struct Statistics {
    resolutions: AtomicU64,
    cache_hits: AtomicU64,
    materializations: AtomicU64,
    not_found: AtomicU64,
    navigations: AtomicU64,
    finds: AtomicU64,
}

/// Point-in-time copy of [`Statistics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSnapshot {
    pub resolutions: u64,
    pub cache_hits: u64,
    pub materializations: u64,
    pub not_found: u64,
    pub navigations: u64,
    pub finds: u64,
}

impl Statistics {
    pub fn snapshot(&self) -> StatisticsSnapshot {
        StatisticsSnapshot {
            resolutions: self.resolutions.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            materializations: self.materializations.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
            navigations: self.navigations.load(Ordering::Relaxed),
            finds: self.finds.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn record_resolution(&self) {
        self.resolutions.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_materialization(&self) {
        self.materializations.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_not_found(&self) {
        self.not_found.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_navigation(&self) {
        self.navigations.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_find(&self) {
        self.finds.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_reflects_counters() {
        let statistics = Statistics::default();
        statistics.record_resolution();
        statistics.record_resolution();
        statistics.record_cache_hit();
        statistics.record_not_found();

        let snapshot = statistics.snapshot();
        assert_eq!(snapshot.resolutions, 2);
        assert_eq!(snapshot.cache_hits, 1);
        assert_eq!(snapshot.not_found, 1);
        assert_eq!(snapshot.materializations, 0);

        let json = serde_json::to_value(snapshot).expect("serialize");
        assert_eq!(json["cacheHits"], 1);
    }
}
