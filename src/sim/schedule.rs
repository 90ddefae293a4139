//! Cancellable delayed transitions in virtual time
//!
//! The game never sleeps or spawns host timers. Every pause is a timer entry
//! stamped with the session generation that scheduled it, fired by
//! `GameState::advance_time` once virtual time reaches its due point.

use serde::{Deserialize, Serialize};

/// Transition to run when a timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingAction {
    /// Start sweeping the current stage
    BeginMoving,
    /// Reset the track for the next stage, then schedule `BeginMoving`
    PrepareStage,
    /// All stages dropped; work out the discount
    ComputeReward,
    /// Hand the computed discount to the host
    ReportReward,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timer {
    /// Scheduling order, breaks ties between timers due together
    pub seq: u64,
    pub due_at_ms: u64,
    /// Session generation the timer belongs to
    pub generation: u64,
    pub action: PendingAction,
}

/// Pending timers, fired earliest first (ties by scheduling order)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimerQueue {
    timers: Vec<Timer>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_at_ms: u64, generation: u64, action: PendingAction) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.push(Timer {
            seq,
            due_at_ms,
            generation,
            action,
        });
    }

    pub fn cancel_all(&mut self) {
        if !self.timers.is_empty() {
            log::debug!("Cancelling {} pending timer(s)", self.timers.len());
        }
        self.timers.clear();
    }

    /// Due time of the earliest pending timer
    pub fn next_due(&self) -> Option<u64> {
        self.timers.iter().map(|t| t.due_at_ms).min()
    }

    /// Remove and return the earliest timer due at or before `now_ms`
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Timer> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_at_ms <= now_ms)
            .min_by_key(|(_, t)| (t.due_at_ms, t.seq))
            .map(|(i, _)| i)?;
        Some(self.timers.remove(idx))
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
