//! Task types and the scheduling policy layer
//!
//! The scheduler hides the insert-vs-update decision from callers:
//! submitting a task whose identifier is already resident rewrites its
//! priority in place instead of creating a duplicate entry. Extraction
//! comes in two flavors: a strict `Option` API and a zero-sentinel
//! compatibility wrapper.

#![forbid(unsafe_code)]

//     ______     ______     ______     ______     ______
//    /\  ___\   /\  == \   /\  ___\   /\  ___\   /\__  _\
//    \ \ \____  \ \  __<   \ \  __\   \ \___  \  \/_/\ \/
//     \ \_____\  \ \_\ \_\  \ \_____\  \/\_____\    \ \_\
//      \/_____/   \/_/ /_/   \/_____/   \/_____/     \/_/
//
// Author: Colin MacRitchie / Ripple Group

use std::sync::Arc;

use crate::heap::IndexedHeap;
use crate::metrics::SchedulerMetrics;

/// Task identifier, unique within one scheduler instance.
///
/// The compatibility API [`Scheduler::get_task`] reserves `TaskId(0)` as
/// its "nothing to schedule" placeholder, so callers of that API must never
/// submit a real task with identifier zero. The `Option`-returning API
/// carries no such restriction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

/// An opaque task descriptor: an identifier and its current urgency.
///
/// The scheduler only orders descriptors; it never executes anything.
/// Higher priority extracts first. While resident, priority is the only
/// mutable field; an extracted task is a detached value copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Task {
    /// Unique identifier within the owning scheduler
    pub id: TaskId,
    /// Urgency; higher extracts first
    pub priority: i64,
}

impl Task {
    /// Creates a task descriptor.
    #[must_use]
    pub const fn new(id: TaskId, priority: i64) -> Self {
        Self { id, priority }
    }
}

/// Priority task scheduler over an [`IndexedHeap`].
///
/// Single-threaded by contract: one logical owner issues operations
/// sequentially and no internal synchronization is performed. Wrap it in
/// [`SharedScheduler`](crate::shared::SharedScheduler) when several threads
/// need access.
///
/// From the scheduler's point of view an identifier is in exactly one of
/// two states: absent, or scheduled with some priority. [`add_task`]
/// moves `absent → scheduled` and rewrites the priority of an
/// already-scheduled identifier; extraction moves it back to absent. There
/// is no terminal state; the scheduler's lifetime is open-ended.
///
/// [`add_task`]: Self::add_task
#[derive(Debug)]
pub struct Scheduler {
    tasks: IndexedHeap,
    metrics: Arc<SchedulerMetrics>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tasks: IndexedHeap::new(),
            metrics: Arc::new(SchedulerMetrics::new()),
        }
    }

    /// Creates an empty scheduler with room for `capacity` tasks.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tasks: IndexedHeap::with_capacity(capacity),
            metrics: Arc::new(SchedulerMetrics::new()),
        }
    }

    /// Submits a task, inserting or updating as needed (upsert).
    ///
    /// A known identifier has its priority rewritten in place, discarding
    /// the old value. Re-announcing a task with fresh urgency is a normal
    /// operation, never an error, and never creates a duplicate entry. An
    /// unknown identifier is inserted as new.
    pub fn add_task(&mut self, task: Task) {
        if self.tasks.contains(task.id) {
            self.tasks.update_priority(task.id, task.priority);
            self.metrics.record_upsert();

            #[cfg(feature = "tracing")]
            tracing::debug!(id = task.id.0, priority = task.priority, "task re-announced");
        } else {
            self.tasks.insert(task);
            self.metrics.record_insert(self.tasks.len());

            #[cfg(feature = "tracing")]
            tracing::trace!(id = task.id.0, priority = task.priority, "task scheduled");
        }
    }

    /// Rewrites the priority of a scheduled task.
    ///
    /// Heap order is repaired immediately, so the new priority is honored
    /// by the very next extraction. Returns `false` when the identifier is
    /// not scheduled, leaving extraction order untouched; nothing is raised
    /// either way, so callers that ignore the flag get the silent no-op
    /// behavior.
    pub fn change_task_priority(&mut self, id: TaskId, priority: i64) -> bool {
        let updated = self.tasks.update_priority(id, priority);
        if updated {
            self.metrics.record_update();
        } else {
            self.metrics.record_ignored_update();

            #[cfg(feature = "tracing")]
            tracing::debug!(id = id.0, "priority change for unknown task ignored");
        }
        updated
    }

    /// Extracts and returns the highest-priority task, or `None` when the
    /// scheduler holds no tasks.
    ///
    /// Never blocks waiting for work; callers that need to wait must poll
    /// or layer their own hand-off on top.
    pub fn take_task(&mut self) -> Option<Task> {
        match self.tasks.extract_max() {
            Some(task) => {
                self.metrics.record_extract();

                #[cfg(feature = "tracing")]
                tracing::trace!(id = task.id.0, priority = task.priority, "task extracted");

                Some(task)
            }
            None => {
                self.metrics.record_empty_extraction();
                None
            }
        }
    }

    /// Extracts the highest-priority task, or the zero-value placeholder
    /// when the scheduler holds no tasks.
    ///
    /// Compatibility wrapper over [`take_task`](Self::take_task): an empty
    /// scheduler yields `Task::default()` (identifier and priority both
    /// zero) rather than signaling anything. Callers must treat the
    /// zero-identifier task as "nothing to schedule", which is only safe
    /// while identifier zero is never used for a real task.
    pub fn get_task(&mut self) -> Task {
        self.take_task().unwrap_or_default()
    }

    /// Cancels a scheduled task and returns its descriptor, or `None` when
    /// the identifier is not scheduled.
    pub fn remove_task(&mut self, id: TaskId) -> Option<Task> {
        let removed = self.tasks.remove(id);
        if removed.is_some() {
            self.metrics.record_remove();

            #[cfg(feature = "tracing")]
            tracing::debug!(id = id.0, "task removed");
        }
        removed
    }

    /// Returns the highest-priority task without extracting it.
    #[must_use]
    pub fn peek_task(&self) -> Option<&Task> {
        self.tasks.peek()
    }

    /// Returns `true` when `id` is currently scheduled.
    #[inline]
    #[must_use]
    pub fn contains(&self, id: TaskId) -> bool {
        self.tasks.contains(id)
    }

    /// Number of scheduled tasks.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when no tasks are scheduled.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Shared handle to the operation counters.
    #[must_use]
    pub fn metrics(&self) -> Arc<SchedulerMetrics> {
        Arc::clone(&self.metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_routes_known_id_to_update() {
        let mut scheduler = Scheduler::new();
        scheduler.add_task(Task::new(TaskId(1), 10));
        scheduler.add_task(Task::new(TaskId(1), 99));

        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.peek_task(), Some(&Task::new(TaskId(1), 99)));

        let snapshot = scheduler.metrics().snapshot();
        assert_eq!(snapshot.tasks_inserted, 1);
        assert_eq!(snapshot.tasks_upserted, 1);
    }

    #[test]
    fn test_sentinel_on_empty() {
        let mut scheduler = Scheduler::new();
        assert_eq!(scheduler.get_task(), Task::default());
        assert_eq!(scheduler.take_task(), None);

        let snapshot = scheduler.metrics().snapshot();
        assert_eq!(snapshot.empty_extractions, 2);
    }

    #[test]
    fn test_change_priority_reports_outcome() {
        let mut scheduler = Scheduler::new();
        scheduler.add_task(Task::new(TaskId(3), 30));

        assert!(scheduler.change_task_priority(TaskId(3), 5));
        assert!(!scheduler.change_task_priority(TaskId(4), 5));

        let snapshot = scheduler.metrics().snapshot();
        assert_eq!(snapshot.priority_updates, 1);
        assert_eq!(snapshot.updates_ignored, 1);
    }

    #[test]
    fn test_remove_task() {
        let mut scheduler = Scheduler::new();
        scheduler.add_task(Task::new(TaskId(1), 10));
        scheduler.add_task(Task::new(TaskId(2), 20));

        assert_eq!(scheduler.remove_task(TaskId(1)), Some(Task::new(TaskId(1), 10)));
        assert_eq!(scheduler.remove_task(TaskId(1)), None);
        assert_eq!(scheduler.take_task(), Some(Task::new(TaskId(2), 20)));
    }

    #[test]
    fn test_depth_high_water() {
        let mut scheduler = Scheduler::with_capacity(8);
        for id in 1..=5 {
            scheduler.add_task(Task::new(TaskId(id), id as i64));
        }
        for _ in 0..3 {
            let _ = scheduler.take_task();
        }

        assert_eq!(scheduler.metrics().snapshot().depth_high_water, 5);
    }
}
