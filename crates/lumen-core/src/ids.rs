//! Monotonic activity id allocation.
//!
//! The allocator is owned by the store; it is reconciled against the loaded
//! collection before the store hands out any id.

use crate::activity::{Activity, ActivityId};

/// Strictly increasing id counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        IdAllocator { next: 1 }
    }

    /// Return the current counter value, then advance it.
    pub fn next(&mut self) -> ActivityId {
        let id = ActivityId(self.next);
        self.next += 1;
        id
    }

    /// Value the next call to [`IdAllocator::next`] will return.
    pub fn peek(&self) -> ActivityId {
        ActivityId(self.next)
    }

    /// Reset the counter to one past `max_observed` (or 1 when nothing was observed).
    pub fn reconcile(&mut self, max_observed: Option<ActivityId>) {
        self.next = max_observed.map_or(1, |id| id.0 + 1);
    }

    /// Reconcile against every activity in `activities`.
    pub fn reconcile_with(&mut self, activities: &[Activity]) {
        self.reconcile(activities.iter().map(Activity::id).max());
    }

    /// Make sure an externally supplied id can never be handed out again.
    pub fn observe(&mut self, id: ActivityId) {
        if id.0 >= self.next {
            self.next = id.0 + 1;
        }
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
