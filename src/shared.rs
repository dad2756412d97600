#![forbid(unsafe_code)]

/*
 *     ______     ______     ______     ______     ______
 *    /\  ___\   /\  == \   /\  ___\   /\  ___\   /\__  _\
 *    \ \ \____  \ \  __<   \ \  __\   \ \___  \  \/_/\ \/
 *     \ \_____\  \ \_\ \_\  \ \_____\  \/\_____\    \ \_\
 *      \/_____/   \/_/ /_/   \/_____/   \/_____/     \/_/
 *
 * Author: Colin MacRitchie / Ripple Group
 */
/* Mutex-guarded scheduler handle for concurrent callers */

//! The heap and scheduler pair is a single unit of mutable state; this
//! wrapper guards it with one lock and makes every public operation a
//! single critical section; none may interleave partially. No operation
//! blocks waiting for work to appear and none carries a timeout or
//! cancellation dimension: extraction on an empty scheduler returns
//! immediately, and callers that need to wait must poll or layer their own
//! hand-off on top.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::metrics::SchedulerMetrics;
use crate::scheduler::{Scheduler, Task, TaskId};

/// Cloneable, thread-safe handle to a [`Scheduler`].
#[derive(Debug, Clone)]
pub struct SharedScheduler {
    inner: Arc<Mutex<Scheduler>>,
    metrics: Arc<SchedulerMetrics>,
}

impl Default for SharedScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedScheduler {
    /// Creates an empty shared scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::from_scheduler(Scheduler::new())
    }

    /// Creates an empty shared scheduler with room for `capacity` tasks.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_scheduler(Scheduler::with_capacity(capacity))
    }

    fn from_scheduler(scheduler: Scheduler) -> Self {
        let metrics = scheduler.metrics();
        Self {
            inner: Arc::new(Mutex::new(scheduler)),
            metrics,
        }
    }

    /// Submits a task, inserting or updating as needed (upsert).
    pub fn add_task(&self, task: Task) {
        self.inner.lock().add_task(task);
    }

    /// Rewrites the priority of a scheduled task; `false` when unknown.
    pub fn change_task_priority(&self, id: TaskId, priority: i64) -> bool {
        self.inner.lock().change_task_priority(id, priority)
    }

    /// Extracts the highest-priority task, or `None` when empty.
    pub fn take_task(&self) -> Option<Task> {
        self.inner.lock().take_task()
    }

    /// Extracts the highest-priority task, or the zero-value placeholder
    /// when empty. See [`Scheduler::get_task`] for the identifier-zero
    /// caveat.
    pub fn get_task(&self) -> Task {
        self.inner.lock().get_task()
    }

    /// Cancels a scheduled task and returns its descriptor.
    pub fn remove_task(&self, id: TaskId) -> Option<Task> {
        self.inner.lock().remove_task(id)
    }

    /// Returns `true` when `id` is currently scheduled.
    #[must_use]
    pub fn contains(&self, id: TaskId) -> bool {
        self.inner.lock().contains(id)
    }

    /// Number of scheduled tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` when no tasks are scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Shared handle to the operation counters; does not take the lock.
    #[must_use]
    pub fn metrics(&self) -> Arc<SchedulerMetrics> {
        Arc::clone(&self.metrics)
    }
}
