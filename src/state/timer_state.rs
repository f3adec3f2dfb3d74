//! Observable timer state published to the tick task and the API

use serde::{Deserialize, Serialize};

use super::{model::ActiveTimer, tracker::Tracker};

/// Idle/Running view of the tracker, broadcast after every intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub active: bool,
    pub target: Option<ActiveTimer>,
    /// Run the target belongs to; only meaningful while active
    pub run_id: u64,
    pub elapsed_seconds: u64,
}

impl TimerState {
    /// Create an idle timer state
    pub fn new() -> Self {
        Self {
            active: false,
            target: None,
            run_id: 0,
            elapsed_seconds: 0,
        }
    }

    /// Capture the timer part of a tracker
    pub fn from_tracker(tracker: &Tracker) -> Self {
        match tracker.active_timer() {
            Some(target) => Self {
                active: true,
                target: Some(target),
                run_id: tracker.run_id(),
                elapsed_seconds: tracker.tick_count(),
            },
            None => Self::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The run to tick, if a timer is running
    pub fn running_run(&self) -> Option<u64> {
        if self.active {
            Some(self.run_id)
        } else {
            None
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}
