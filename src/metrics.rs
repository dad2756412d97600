//     ______     ______     ______     ______     ______
//    /\  ___\   /\  == \   /\  ___\   /\  ___\   /\__  _\
//    \ \ \____  \ \  __<   \ \  __\   \ \___  \  \/_/\ \/
//     \ \_____\  \ \_\ \_\  \ \_____\  \/\_____\    \ \_\
//      \/_____/   \/_/ /_/   \/_____/   \/_____/     \/_/
//
// Author: Colin MacRitchie / Ripple Group
//! Operation counters for scheduler monitoring
//!
//! Every scheduler operation increments an atomic counter here; with the
//! `metrics` feature the counters are mirrored to the `metrics` facade so
//! an exporter can pick them up.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

#[cfg(feature = "metrics")]
use metrics::{counter, gauge};

/// Counters covering every scheduler operation.
#[derive(Debug, Default)]
pub struct SchedulerMetrics {
    /// Tasks inserted with a previously unknown identifier
    pub tasks_inserted: AtomicU64,

    /// `add_task` calls that rewrote an existing entry instead
    pub tasks_upserted: AtomicU64,

    /// Priority updates applied to a scheduled task
    pub priority_updates: AtomicU64,

    /// Priority updates ignored because the identifier was unknown
    pub updates_ignored: AtomicU64,

    /// Tasks handed out by extraction
    pub tasks_extracted: AtomicU64,

    /// Extractions attempted while empty
    pub empty_extractions: AtomicU64,

    /// Tasks removed by cancellation
    pub tasks_removed: AtomicU64,

    /// High water mark for resident task count
    pub depth_high_water: AtomicUsize,
}

impl SchedulerMetrics {
    /// Creates a zeroed metrics instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an insertion of a new identifier at the given depth.
    pub fn record_insert(&self, depth: usize) {
        self.tasks_inserted.fetch_add(1, Ordering::Relaxed);
        self.record_depth(depth);

        #[cfg(feature = "metrics")]
        counter!("crest_tasks_inserted_total").increment(1);
    }

    /// Record an `add_task` that rewrote an existing entry.
    pub fn record_upsert(&self) {
        self.tasks_upserted.fetch_add(1, Ordering::Relaxed);

        #[cfg(feature = "metrics")]
        counter!("crest_tasks_upserted_total").increment(1);
    }

    /// Record an applied priority update.
    pub fn record_update(&self) {
        self.priority_updates.fetch_add(1, Ordering::Relaxed);

        #[cfg(feature = "metrics")]
        counter!("crest_priority_updates_total").increment(1);
    }

    /// Record a priority update ignored for an unknown identifier.
    pub fn record_ignored_update(&self) {
        self.updates_ignored.fetch_add(1, Ordering::Relaxed);

        #[cfg(feature = "metrics")]
        counter!("crest_updates_ignored_total").increment(1);
    }

    /// Record a successful extraction.
    pub fn record_extract(&self) {
        self.tasks_extracted.fetch_add(1, Ordering::Relaxed);

        #[cfg(feature = "metrics")]
        counter!("crest_tasks_extracted_total").increment(1);
    }

    /// Record an extraction attempted on an empty scheduler.
    pub fn record_empty_extraction(&self) {
        self.empty_extractions.fetch_add(1, Ordering::Relaxed);

        #[cfg(feature = "metrics")]
        counter!("crest_empty_extractions_total").increment(1);
    }

    /// Record a cancellation.
    pub fn record_remove(&self) {
        self.tasks_removed.fetch_add(1, Ordering::Relaxed);

        #[cfg(feature = "metrics")]
        counter!("crest_tasks_removed_total").increment(1);
    }

    /// Record the current resident depth, maintaining the high-water mark.
    pub fn record_depth(&self, depth: usize) {
        let mut current = self.depth_high_water.load(Ordering::Relaxed);
        while depth > current {
            match self.depth_high_water.compare_exchange_weak(
                current,
                depth,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(x) => current = x,
            }
        }

        #[cfg(feature = "metrics")]
        gauge!("crest_resident_tasks").set(depth as f64);
    }

    /// Get a point-in-time snapshot of the counters.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            tasks_inserted: self.tasks_inserted.load(Ordering::Relaxed),
            tasks_upserted: self.tasks_upserted.load(Ordering::Relaxed),
            priority_updates: self.priority_updates.load(Ordering::Relaxed),
            updates_ignored: self.updates_ignored.load(Ordering::Relaxed),
            tasks_extracted: self.tasks_extracted.load(Ordering::Relaxed),
            empty_extractions: self.empty_extractions.load(Ordering::Relaxed),
            tasks_removed: self.tasks_removed.load(Ordering::Relaxed),
            depth_high_water: self.depth_high_water.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time snapshot of scheduler counters for external consumption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Tasks inserted with a previously unknown identifier
    pub tasks_inserted: u64,
    /// `add_task` calls that rewrote an existing entry instead
    pub tasks_upserted: u64,
    /// Priority updates applied to a scheduled task
    pub priority_updates: u64,
    /// Priority updates ignored because the identifier was unknown
    pub updates_ignored: u64,
    /// Tasks handed out by extraction
    pub tasks_extracted: u64,
    /// Extractions attempted while empty
    pub empty_extractions: u64,
    /// Tasks removed by cancellation
    pub tasks_removed: u64,
    /// High water mark for resident task count
    pub depth_high_water: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = SchedulerMetrics::new();
        let snapshot = metrics.snapshot();

        assert_eq!(snapshot.tasks_inserted, 0);
        assert_eq!(snapshot.tasks_extracted, 0);
        assert_eq!(snapshot.depth_high_water, 0);
    }

    #[test]
    fn test_counter_recording() {
        let metrics = SchedulerMetrics::new();

        metrics.record_insert(1);
        metrics.record_insert(2);
        metrics.record_upsert();
        metrics.record_update();
        metrics.record_ignored_update();
        metrics.record_extract();
        metrics.record_empty_extraction();
        metrics.record_remove();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.tasks_inserted, 2);
        assert_eq!(snapshot.tasks_upserted, 1);
        assert_eq!(snapshot.priority_updates, 1);
        assert_eq!(snapshot.updates_ignored, 1);
        assert_eq!(snapshot.tasks_extracted, 1);
        assert_eq!(snapshot.empty_extractions, 1);
        assert_eq!(snapshot.tasks_removed, 1);
    }

    #[test]
    fn test_high_water_mark_never_decreases() {
        let metrics = SchedulerMetrics::new();

        metrics.record_depth(5);
        metrics.record_depth(3);
        assert_eq!(metrics.snapshot().depth_high_water, 5);

        metrics.record_depth(9);
        assert_eq!(metrics.snapshot().depth_high_water, 9);
    }

    #[test]
    fn test_snapshot_is_stable() {
        let metrics = SchedulerMetrics::new();
        metrics.record_insert(1);

        let first = metrics.snapshot();
        let second = metrics.snapshot();
        assert_eq!(first, second);
    }
}
