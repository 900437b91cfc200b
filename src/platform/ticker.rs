//! Countdown ticker
//!
//! Produces one tick per elapsed interval while armed. Arming and cancelling
//! follow the controller's [`TimerCommand`]s; a cancelled ticker never reports
//! a due tick, so nothing fires before a round starts or after it ends.

use std::time::Duration;

use crate::consts::TICK_INTERVAL_MS;
use crate::sim::TimerCommand;

#[derive(Debug, Clone)]
pub struct Ticker {
    interval_ms: u64,
    /// Next deadline while armed
    next_ms: Option<u64>,
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(TICK_INTERVAL_MS)
    }
}

impl Ticker {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            next_ms: None,
        }
    }

    /// Start a fresh period at `now_ms`, replacing any previous one
    pub fn arm(&mut self, now_ms: u64) {
        self.next_ms = Some(now_ms + self.interval_ms);
    }

    pub fn cancel(&mut self) {
        self.next_ms = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_ms.is_some()
    }

    pub fn apply(&mut self, cmd: TimerCommand, now_ms: u64) {
        match cmd {
            TimerCommand::Arm => self.arm(now_ms),
            TimerCommand::Cancel => self.cancel(),
        }
        log::debug!("Ticker {:?} at {}ms", cmd, now_ms);
    }

    /// Consume one due tick, if any. Call repeatedly to drain a backlog.
    pub fn poll_tick(&mut self, now_ms: u64) -> bool {
        match self.next_ms {
            Some(deadline) if now_ms >= deadline => {
                self.next_ms = Some(deadline + self.interval_ms);
                true
            }
            _ => false,
        }
    }

    /// How long the event loop may block before the next tick is due
    pub fn time_until_due(&self, now_ms: u64) -> Option<Duration> {
        self.next_ms
            .map(|deadline| Duration::from_millis(deadline.saturating_sub(now_ms)))
    }
}
