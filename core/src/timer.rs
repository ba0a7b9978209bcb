use serde::{Deserialize, Serialize};

/// Identity of one timer run. A new id is issued every time the timer is
/// started or cancelled, so ticks scheduled for an older run are ignored.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerId(u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimerTick {
    Stale,
    Running(u16),
    Expired,
}

/// Countdown of whole seconds driven by explicit ticks from the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleTimer {
    id: TimerId,
    limit_secs: u16,
    remaining_secs: u16,
    running: bool,
}

impl PuzzleTimer {
    pub fn new(limit_secs: u16) -> Self {
        Self {
            id: TimerId(0),
            limit_secs,
            remaining_secs: limit_secs,
            running: false,
        }
    }

    /// Restarts the countdown from the full limit under a fresh id.
    pub fn start(&mut self) -> TimerId {
        self.cancel();
        self.remaining_secs = self.limit_secs;
        self.running = true;
        self.id
    }

    /// Stops the countdown and invalidates every outstanding id.
    pub fn cancel(&mut self) {
        self.id = TimerId(self.id.0.wrapping_add(1));
        self.running = false;
    }

    /// Cancels and refills the countdown without starting it.
    pub fn reset(&mut self) {
        self.cancel();
        self.remaining_secs = self.limit_secs;
    }

    pub fn tick(&mut self, id: TimerId) -> TimerTick {
        if !self.is_current(id) {
            return TimerTick::Stale;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.running = false;
            TimerTick::Expired
        } else {
            TimerTick::Running(self.remaining_secs)
        }
    }

    pub fn is_current(&self, id: TimerId) -> bool {
        self.running && self.id == id
    }

    pub fn current_id(&self) -> Option<TimerId> {
        self.running.then_some(self.id)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_secs(&self) -> u16 {
        self.remaining_secs
    }

    pub fn limit_secs(&self) -> u16 {
        self.limit_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_to_expiry() {
        let mut timer = PuzzleTimer::new(3);
        let id = timer.start();

        assert_eq!(timer.tick(id), TimerTick::Running(2));
        assert_eq!(timer.tick(id), TimerTick::Running(1));
        assert_eq!(timer.tick(id), TimerTick::Expired);
        assert!(!timer.is_running());
        assert_eq!(timer.remaining_secs(), 0);

        // expired runs no longer accept ticks
        assert_eq!(timer.tick(id), TimerTick::Stale);
    }

    #[test]
    fn ticks_before_start_are_stale() {
        let mut timer = PuzzleTimer::new(5);
        let id = timer.current_id();

        assert_eq!(id, None);
        assert_eq!(timer.tick(TimerId(0)), TimerTick::Stale);
        assert_eq!(timer.remaining_secs(), 5);
    }

    #[test]
    fn cancel_invalidates_previous_run() {
        let mut timer = PuzzleTimer::new(5);
        let old = timer.start();
        timer.tick(old);
        timer.cancel();

        assert_eq!(timer.tick(old), TimerTick::Stale);
        assert_eq!(timer.remaining_secs(), 4);

        let new = timer.start();
        assert_ne!(old, new);
        assert_eq!(timer.remaining_secs(), 5);
        assert_eq!(timer.tick(old), TimerTick::Stale);
        assert_eq!(timer.tick(new), TimerTick::Running(4));
    }

    #[test]
    fn reset_refills_without_running() {
        let mut timer = PuzzleTimer::new(5);
        let id = timer.start();
        timer.tick(id);
        timer.reset();

        assert_eq!(timer.remaining_secs(), 5);
        assert_eq!(timer.current_id(), None);
    }
}
