// src/clock.rs

//! Virtual time. Nothing here sleeps: callers advance the clock and ask each task how
//! many times it fell due.

/// Millisecond clock that only moves when told to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VirtualClock {
    now_ms: u64,
}

impl VirtualClock {
    pub fn new() -> Self {
        VirtualClock { now_ms: 0 }
    }

    pub fn now(&self) -> u64 {
        self.now_ms
    }

    pub fn advance(&mut self, ms: u64) -> u64 {
        self.now_ms = self.now_ms.saturating_add(ms);
        self.now_ms
    }
}

/// A repeating task with a fixed period. Stopped tasks never fall due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodicTask {
    period_ms: u64,
    next_due: Option<u64>,
}

impl PeriodicTask {
    pub fn new(period_ms: u64) -> Self {
        PeriodicTask { period_ms: period_ms.max(1), next_due: None }
    }

    pub fn period(&self) -> u64 {
        self.period_ms
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Schedules the first firing one period after `now`.
    pub fn start(&mut self, now: u64) {
        self.next_due = Some(now.saturating_add(self.period_ms));
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// Changes the period. A running task restarts its countdown from `now`.
    pub fn set_period(&mut self, period_ms: u64, now: u64) {
        self.period_ms = period_ms.max(1);
        if self.is_running() {
            self.start(now);
        }
    }

    /// Time of the next firing, if running.
    pub fn next_due(&self) -> Option<u64> {
        self.next_due
    }

    /// Consumes one firing if the task is due at or before `now`.
    pub fn fire_if_due(&mut self, now: u64) -> bool {
        match self.next_due {
            Some(due) if due <= now => {
                self.next_due = Some(due.saturating_add(self.period_ms));
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopped_task_never_fires() {
        let mut task = PeriodicTask::new(10);
        assert!(!task.fire_if_due(1_000));
    }

    #[test]
    fn task_fires_once_per_period() {
        let mut clock = VirtualClock::new();
        let mut task = PeriodicTask::new(16);
        task.start(clock.now());
        let mut fired = 0;
        for _ in 0..100 {
            let now = clock.advance(4);
            while task.fire_if_due(now) {
                fired += 1;
            }
        }
        assert_eq!(fired, 400 / 16);
    }

    #[test]
    fn catching_up_after_a_long_advance() {
        let mut task = PeriodicTask::new(100);
        task.start(0);
        let mut fired = 0;
        while task.fire_if_due(1_000) {
            fired += 1;
        }
        assert_eq!(fired, 10);
        assert_eq!(task.next_due(), Some(1_100));
    }

    #[test]
    fn new_period_restarts_countdown() {
        let mut task = PeriodicTask::new(1_000);
        task.start(0);
        task.set_period(500, 300);
        assert_eq!(task.next_due(), Some(800));
        assert!(!task.fire_if_due(799));
        assert!(task.fire_if_due(800));
    }

    #[test]
    fn huge_period_stays_in_the_future() {
        let mut task = PeriodicTask::new(u64::MAX);
        task.start(16);
        assert_eq!(task.next_due(), Some(u64::MAX));
        assert!(!task.fire_if_due(1_000_000));
    }

    #[test]
    fn zero_period_is_bumped() {
        assert_eq!(PeriodicTask::new(0).period(), 1);
    }
}
