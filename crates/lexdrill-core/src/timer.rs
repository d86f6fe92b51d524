//! Cancellable delayed transition.
//!
//! After a skipped turn is counted as correct, the feedback stays on screen
//! for a hold interval before the next turn starts. The timer remembers the
//! turn generation it was armed for; it only fires while that generation is
//! still current and nobody disarmed it.

use std::time::{Duration, Instant};

/// Default hold interval for the counted-correct feedback.
pub const DEFAULT_HOLD: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    generation: u64,
    due: Instant,
}

/// A single-slot, generation-checked deadline.
#[derive(Debug, Clone)]
pub struct TransitionTimer {
    hold: Duration,
    pending: Option<Pending>,
}

impl TransitionTimer {
    pub fn new(hold: Duration) -> Self {
        Self {
            hold,
            pending: None,
        }
    }

    pub fn hold(&self) -> Duration {
        self.hold
    }

    /// Arm for `generation`, replacing any earlier deadline.
    pub fn arm(&mut self, generation: u64, now: Instant) {
        self.pending = Some(Pending {
            generation,
            due: now + self.hold,
        });
    }

    /// Cancel the pending transition. Returns whether one was armed.
    pub fn disarm(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending transition is due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.due)
    }

    /// Consume the pending transition if it is due at `now` and still
    /// belongs to `current_generation`.
    ///
    /// A stale deadline (armed for an older generation) is dropped.
    pub fn take_due(&mut self, now: Instant, current_generation: u64) -> bool {
        match self.pending {
            Some(p) if p.generation != current_generation => {
                tracing::debug!("dropping stale transition for turn {}", p.generation);
                self.pending = None;
                false
            }
            Some(p) if now >= p.due => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for TransitionTimer {
    fn default() -> Self {
        Self::new(DEFAULT_HOLD)
    }
}
