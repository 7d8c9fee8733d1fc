// src/driver.rs

//! The host side of the visualization: play/pause/reset, the speed presets, and the
//! ~60 Hz master tick that spins the platter and pulses the index sensor.

use log::{debug, info, trace};

use crate::clock::{PeriodicTask, VirtualClock};
use crate::disk::DiskModel;
use crate::error::{VizError, VizResult};
use crate::geometry::{normalize_degrees, sector_at_rotation, GeometryProfile, Size, STANDARD};
use crate::registers::RegisterPanel;
use crate::render::{Scene, DISK_CANVAS, PANEL_SIZE};

/// Master tick period (about 60 frames per second).
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Rotation per master tick at 1x: 300 RPM is 1800 deg/s, about 30 deg per 16 ms frame.
pub const BASE_DEGREES_PER_TICK: f64 = 30.0;

/// Ticks after the start of a revolution at which the index pulse is released.
pub const INDEX_PULSE_TICKS: u32 = 2;

/// Speed multipliers offered by the speed selector.
pub const SPEED_PRESETS: [f64; 7] = [0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.0];

pub const DEFAULT_SPEED_PRESET: usize = 5;

pub fn speed_preset(index: usize) -> VizResult<f64> {
    SPEED_PRESETS
        .get(index)
        .copied()
        .ok_or(VizError::SpeedPresetOutOfRange(index, SPEED_PRESETS.len() - 1))
}

#[derive(Debug, Clone)]
pub struct AnimationDriver {
    disk: DiskModel,
    panel: RegisterPanel,
    clock: VirtualClock,
    frame_task: PeriodicTask,
    playing: bool,
    speed: f64,
    angle: f64,
    pulse_counter: u32,
    revolutions: u64,
    profile: GeometryProfile,
    disk_canvas: Size,
    panel_canvas: Size,
}

impl Default for AnimationDriver {
    fn default() -> Self {
        AnimationDriver::new()
    }
}

impl AnimationDriver {
    pub fn new() -> Self {
        AnimationDriver::with_profile(STANDARD)
    }

    pub fn with_profile(profile: GeometryProfile) -> Self {
        AnimationDriver {
            disk: DiskModel::new(),
            panel: RegisterPanel::new(),
            clock: VirtualClock::new(),
            frame_task: PeriodicTask::new(FRAME_INTERVAL_MS),
            playing: false,
            speed: SPEED_PRESETS[DEFAULT_SPEED_PRESET],
            angle: 0.0,
            pulse_counter: 0,
            revolutions: 0,
            profile,
            disk_canvas: DISK_CANVAS,
            panel_canvas: PANEL_SIZE,
        }
    }

    pub fn set_canvases(&mut self, disk: Size, panel: Size) {
        self.disk_canvas = disk;
        self.panel_canvas = panel;
    }

    pub fn disk(&self) -> &DiskModel {
        &self.disk
    }

    pub fn disk_mut(&mut self) -> &mut DiskModel {
        &mut self.disk
    }

    pub fn panel(&self) -> &RegisterPanel {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut RegisterPanel {
        &mut self.panel
    }

    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Moves whenever the disk or the register panel changed; a host redraws when it does.
    pub fn revision(&self) -> u64 {
        self.disk.revision() + self.panel.revision()
    }

    /// Full revolutions completed since the last reset.
    pub fn revolutions(&self) -> u64 {
        self.revolutions
    }

    /// Play/pause button: starts or stops the master tick and the head seek together.
    pub fn toggle_play(&mut self) -> bool {
        self.playing = !self.playing;
        let now = self.clock.now();
        if self.playing {
            self.frame_task.start(now);
            self.disk.start_head_animation(now);
        } else {
            self.frame_task.stop();
            self.disk.stop_head_animation();
        }
        debug!("{} at {} ms", if self.playing { "play" } else { "pause" }, now);
        self.playing
    }

    pub fn play(&mut self) {
        if !self.playing {
            self.toggle_play();
        }
    }

    pub fn pause(&mut self) {
        if self.playing {
            self.toggle_play();
        }
    }

    /// Stops everything and puts the drive back to its power-on look.
    pub fn reset(&mut self) {
        self.playing = false;
        self.frame_task.stop();
        self.disk.reset_head_animation();
        self.disk.set_track(0);
        self.disk.set_side(0);
        self.disk.set_head_position(0);
        self.disk.set_operation(false);
        self.disk.set_double_sided(true);
        self.disk.set_double_density(true);
        self.angle = 0.0;
        self.pulse_counter = 0;
        self.revolutions = 0;
        self.disk.set_rotation_angle(0.0);
        self.disk.set_index_pulse(false);
        self.disk.set_current_sector(0);
        info!("drive reset");
    }

    pub fn set_speed(&mut self, speed: f64) -> VizResult<()> {
        if !(speed > 0.0) || !speed.is_finite() {
            return Err(VizError::InvalidSpeed(speed));
        }
        self.speed = speed;
        self.disk.set_animation_speed(speed, self.clock.now());
        Ok(())
    }

    pub fn set_speed_preset(&mut self, index: usize) -> VizResult<()> {
        let speed = speed_preset(index)?;
        self.set_speed(speed)
    }

    /// Turns the platter to `angle` and selects the sector derived from it.
    pub fn set_rotation(&mut self, angle: f64) {
        self.angle = normalize_degrees(angle);
        self.disk.set_rotation_angle(self.angle);
        let sector = sector_at_rotation(self.angle, self.disk.sector_count());
        self.disk.set_current_sector(sector as i32);
    }

    /// Runs virtual time forward. Master ticks and seek tasks fire in time order; seek
    /// tasks due at the same instant as a master tick run first.
    pub fn advance(&mut self, ms: u64) {
        let target = self.clock.now() + ms;
        while let Some(due) = self.frame_task.next_due().filter(|&d| d <= target) {
            self.disk.advance_to(due);
            self.clock.advance(due - self.clock.now());
            self.frame_task.fire_if_due(due);
            self.update_animation();
        }
        self.disk.advance_to(target);
        self.clock.advance(target - self.clock.now());
    }

    /// Advances by exactly one master tick period.
    pub fn tick(&mut self) {
        self.advance(FRAME_INTERVAL_MS);
    }

    fn update_animation(&mut self) {
        if !self.playing {
            return;
        }
        let increment = BASE_DEGREES_PER_TICK * self.speed;
        self.angle += increment;
        if self.angle >= 360.0 {
            self.angle = normalize_degrees(self.angle);
        }

        let sector = sector_at_rotation(self.angle, self.disk.sector_count());
        self.disk.set_current_sector(sector as i32);

        self.pulse_counter += 1;
        if self.pulse_counter as f64 >= 360.0 / increment {
            self.pulse_counter = 0;
            self.revolutions += 1;
            self.disk.set_index_pulse(true);
            trace!("index pulse, revolution {}", self.revolutions);
        } else if self.pulse_counter == INDEX_PULSE_TICKS {
            self.disk.set_index_pulse(false);
        }

        self.disk.set_rotation_angle(self.angle);
        trace!("tick {} ms: angle {:.1} sector {}", self.clock.now(), self.angle, sector);
    }

    /// Snapshot of everything on screen right now.
    pub fn scene(&self) -> Scene {
        Scene {
            disk: self.disk.snapshot(),
            panel: self.panel,
            disk_canvas: self.disk_canvas,
            panel_canvas: self.panel_canvas,
            profile: self.profile,
        }
    }
}
