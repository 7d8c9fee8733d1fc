// src/seek.rs

//! Simulated head seek: a step counter bouncing between the outermost and innermost
//! track, plus a faster side toggle. Both run on [`PeriodicTask`]s of one virtual clock.

use log::{debug, trace, warn};

use crate::clock::PeriodicTask;

/// Steps in one sweep across the media.
pub const ANIMATION_STEPS: usize = 80;

/// Seek step period at 1x speed.
pub const BASE_SEEK_INTERVAL_MS: f64 = 1000.0;

/// Something the animator wants applied to the disk state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekEvent {
    /// The step counter moved; carries the new step.
    Step(usize),
    FlipSide,
}

/// Shortest seek period; the side period is half of it.
pub const MIN_SEEK_INTERVAL_MS: u64 = 2;

/// Longest seek period, about a day of virtual time per step.
pub const MAX_SEEK_INTERVAL_MS: u64 = 86_400_000;

/// Seek and side-flip periods for a speed multiplier; the side task runs twice as often.
pub fn intervals_for(speed: f64) -> (u64, u64) {
    let seek = ((BASE_SEEK_INTERVAL_MS / speed) as u64).clamp(MIN_SEEK_INTERVAL_MS, MAX_SEEK_INTERVAL_MS);
    (seek, seek / 2)
}

#[derive(Debug, Clone)]
pub struct HeadSeekAnimator {
    animating: bool,
    step: usize,
    direction_up: bool,
    speed: f64,
    seek_task: PeriodicTask,
    side_task: PeriodicTask,
}

impl Default for HeadSeekAnimator {
    fn default() -> Self {
        HeadSeekAnimator::new()
    }
}

impl HeadSeekAnimator {
    pub fn new() -> Self {
        let (seek, side) = intervals_for(1.0);
        HeadSeekAnimator {
            animating: false,
            step: 0,
            direction_up: true,
            speed: 1.0,
            seek_task: PeriodicTask::new(seek),
            side_task: PeriodicTask::new(side),
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn direction_up(&self) -> bool {
        self.direction_up
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn seek_period(&self) -> u64 {
        self.seek_task.period()
    }

    pub fn side_period(&self) -> u64 {
        self.side_task.period()
    }

    /// Starts both tasks; a running animator is left alone.
    pub fn start(&mut self, now: u64) {
        if self.animating {
            return;
        }
        self.animating = true;
        self.seek_task.start(now);
        self.side_task.start(now);
        debug!("head animation started at step {} ({} ms/step)", self.step, self.seek_task.period());
    }

    /// Stops both tasks and keeps the step so the sweep resumes where it left off.
    pub fn stop(&mut self) {
        if !self.animating {
            return;
        }
        self.animating = false;
        self.seek_task.stop();
        self.side_task.stop();
        debug!("head animation paused at step {}", self.step);
    }

    /// Stops and rewinds to the outermost track, sweeping inwards.
    pub fn reset(&mut self) {
        self.animating = false;
        self.seek_task.stop();
        self.side_task.stop();
        self.step = 0;
        self.direction_up = true;
        debug!("head animation reset");
    }

    /// Applies a new speed multiplier. Non-positive speeds are ignored.
    pub fn set_speed(&mut self, speed: f64, now: u64) -> bool {
        if !(speed > 0.0) || !speed.is_finite() {
            warn!("ignoring animation speed {}", speed);
            return false;
        }
        self.speed = speed;
        let (seek, side) = intervals_for(speed);
        self.seek_task.set_period(seek, now);
        self.side_task.set_period(side, now);
        debug!("animation speed {}x: seek every {} ms, side every {} ms", speed, seek, side);
        true
    }

    /// Moves the step counter one place, turning around at either end.
    pub fn advance_step(&mut self) -> usize {
        if self.direction_up {
            self.step += 1;
            if self.step >= ANIMATION_STEPS - 1 {
                self.step = ANIMATION_STEPS - 1;
                self.direction_up = false;
            }
        } else {
            self.step = self.step.saturating_sub(1);
            if self.step == 0 {
                self.direction_up = true;
            }
        }
        self.step
    }

    /// Fires every task that fell due up to `now`, oldest first. On a tie the seek step
    /// runs before the side flip.
    pub fn poll(&mut self, now: u64) -> Vec<SeekEvent> {
        let mut events = Vec::new();
        if !self.animating {
            return events;
        }
        loop {
            let seek_due = self.seek_task.next_due().filter(|&t| t <= now);
            let side_due = self.side_task.next_due().filter(|&t| t <= now);
            match (seek_due, side_due) {
                (Some(a), Some(b)) if b < a => {
                    self.side_task.fire_if_due(now);
                    events.push(SeekEvent::FlipSide);
                }
                (Some(_), _) => {
                    self.seek_task.fire_if_due(now);
                    let step = self.advance_step();
                    trace!("seek step -> {}", step);
                    events.push(SeekEvent::Step(step));
                }
                (None, Some(_)) => {
                    self.side_task.fire_if_due(now);
                    events.push(SeekEvent::FlipSide);
                }
                (None, None) => break,
            }
        }
        events
    }
}
