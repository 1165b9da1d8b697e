//! Virtual-clock timer queue.
//!
//! Deferred work on the page (tooltip auto-hide, search debounce, card
//! unlock, nav tooltip show/park) is scheduled here and fired by
//! `Page::advance`. There is at most one pending timer per key:
//! scheduling again replaces the earlier one.

use crate::dom::NodeId;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKey {
    TooltipHide,
    SearchDebounce,
    CardUnlock(NodeId),
    NavTooltipShow,
    /// Move a hidden nav tooltip off-screen once its fade-out ends.
    NavTooltipPark(NodeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    deadline: u64,
    seq: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now: u64,
    seq: u64,
    pending: HashMap<TimerKey, Pending>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    /// Schedule `key` to fire `delay_ms` from now, replacing any pending
    /// timer with the same key.
    pub fn schedule(&mut self, key: TimerKey, delay_ms: u64) {
        self.seq += 1;
        self.pending.insert(
            key,
            Pending {
                deadline: self.now + delay_ms,
                seq: self.seq,
            },
        );
    }

    pub fn cancel(&mut self, key: TimerKey) -> bool {
        self.pending.remove(&key).is_some()
    }

    pub fn is_pending(&self, key: TimerKey) -> bool {
        self.pending.contains_key(&key)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Pop the earliest timer due at or before `until`, advancing the
    /// clock to its deadline. Ties fire in scheduling order.
    pub fn pop_due(&mut self, until: u64) -> Option<TimerKey> {
        let (&key, &pending) = self
            .pending
            .iter()
            .filter(|(_, p)| p.deadline <= until)
            .min_by_key(|(_, p)| (p.deadline, p.seq))?;
        self.pending.remove(&key);
        self.now = self.now.max(pending.deadline);
        Some(key)
    }

    /// Move the clock forward without firing anything.
    pub fn set_now(&mut self, now: u64) {
        self.now = self.now.max(now);
    }
}
