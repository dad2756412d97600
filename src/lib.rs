//! Priority task scheduling on an indexed max-heap
//!
//! This crate orders opaque task descriptors; it never runs them. The core
//! is an indexed priority queue: a binary max-heap augmented with an
//! identifier→slot map, so rewriting the priority of a resident task costs
//! O(log n) instead of the O(n) scan a plain heap would need. On top of it
//! sits a small policy layer that hides the insert-vs-update decision
//! (upsert) and exposes ordered extraction.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![warn(rust_2018_idioms)]

//     ______     ______     ______     ______     ______
//    /\  ___\   /\  == \   /\  ___\   /\  ___\   /\__  _\
//    \ \ \____  \ \  __<   \ \  __\   \ \___  \  \/_/\ \/
//     \ \_____\  \ \_\ \_\  \ \_____\  \/\_____\    \ \_\
//      \/_____/   \/_/ /_/   \/_____/   \/_____/     \/_/
//
// Author: Colin MacRitchie / Ripple Group

/// Indexed binary max-heap over task descriptors
pub mod heap;
/// Operation counters and snapshots
pub mod metrics;
/// Task types and the scheduling policy layer
pub mod scheduler;
/// Mutex-guarded scheduler handle for concurrent callers
pub mod shared;

// Public API exports
pub use heap::IndexedHeap;
pub use metrics::{MetricsSnapshot, SchedulerMetrics};
pub use scheduler::{Scheduler, Task, TaskId};
pub use shared::SharedScheduler;
