// src/disk.rs

//! Mutable view state of the drive and the per-frame snapshot taken from it.

use log::{debug, warn};
use serde::Serialize;

use crate::disk_formats::{self, DiskFormat};
use crate::geometry::{effective_sector_count, normalize_degrees, sector_at_rotation, track_for_step};
use crate::seek::{HeadSeekAnimator, SeekEvent, ANIMATION_STEPS};

pub const DEFAULT_SECTOR_COUNT: usize = disk_formats::DD_80_TRACK.sectors_per_track;

/// Everything the renderer needs for one frame. Immutable once taken.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiskFrame {
    pub track: usize,
    pub side: usize,
    /// Track under the head: the seek step's track while animating, else `track`.
    pub head_track: usize,
    pub head_position: i32,
    pub sector: usize,
    pub sector_count: usize,
    pub rotation: f64,
    pub tracks: usize,
    pub double_density: bool,
    pub double_sided: bool,
    pub write: bool,
    pub index_pulse: bool,
    pub envelope_alpha: f64,
    pub highlight_track: bool,
    pub highlight_sector: bool,
    pub head_animating: bool,
    pub seek_step: usize,
}

impl DiskFrame {
    /// Status line text, e.g. `Track: 3  Side: 1  Sector: 7  Read  DD`.
    pub fn status_line(&self) -> String {
        format!(
            "Track: {}  Side: {}  Sector: {}  {}  {}",
            self.track,
            self.side,
            self.sector,
            if self.write { "Write" } else { "Read" },
            disk_formats::for_density(self.double_density).tag
        )
    }
}

#[derive(Debug, Clone)]
pub struct DiskModel {
    track: usize,
    side: usize,
    head_position: i32,
    write: bool,
    double_sided: bool,
    double_density: bool,
    rotation: f64,
    index_pulse: bool,
    envelope_alpha: f64,
    sector_count: usize,
    current_sector: usize,
    highlight_track: bool,
    highlight_sector: bool,
    animator: HeadSeekAnimator,
    revision: u64,
}

impl Default for DiskModel {
    fn default() -> Self {
        DiskModel::new()
    }
}

impl DiskModel {
    pub fn new() -> Self {
        DiskModel {
            track: 0,
            side: 0,
            head_position: 0,
            write: false,
            double_sided: true,
            double_density: true,
            rotation: 0.0,
            index_pulse: false,
            envelope_alpha: 1.0,
            sector_count: DEFAULT_SECTOR_COUNT,
            current_sector: 0,
            highlight_track: true,
            highlight_sector: true,
            animator: HeadSeekAnimator::new(),
            revision: 0,
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    /// Bumped on every visible change; a renderer only needs to redraw when it moves.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn format(&self) -> &'static DiskFormat {
        disk_formats::for_density(self.double_density)
    }

    pub fn num_tracks(&self) -> usize {
        self.format().tracks
    }

    /// Selects a track, clamped to the media.
    pub fn set_track(&mut self, track: i32) {
        let last = self.format().last_track();
        let clamped = track.clamp(0, last as i32) as usize;
        if clamped as i32 != track {
            warn!("track {} clamped to {}", track, clamped);
        }
        self.track = clamped;
        self.touch();
    }

    pub fn track(&self) -> usize {
        self.track
    }

    pub fn set_side(&mut self, side: i32) {
        self.side = if side > 0 { 1 } else { 0 };
        self.touch();
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn set_head_position(&mut self, position: i32) {
        self.head_position = position;
        self.touch();
    }

    pub fn head_position(&self) -> i32 {
        self.head_position
    }

    pub fn set_operation(&mut self, write: bool) {
        self.write = write;
        self.touch();
    }

    pub fn is_write(&self) -> bool {
        self.write
    }

    pub fn set_double_sided(&mut self, double_sided: bool) {
        self.double_sided = double_sided;
        self.touch();
    }

    pub fn is_double_sided(&self) -> bool {
        self.double_sided
    }

    /// Switches media density; the track is pulled in if it no longer exists.
    pub fn set_double_density(&mut self, double_density: bool) {
        self.double_density = double_density;
        self.track = self.track.min(self.format().last_track());
        debug!("media is now {}", self.format().name);
        self.touch();
    }

    pub fn is_double_density(&self) -> bool {
        self.double_density
    }

    pub fn set_rotation_angle(&mut self, angle: f64) {
        self.rotation = normalize_degrees(angle);
        self.touch();
    }

    pub fn rotation_angle(&self) -> f64 {
        self.rotation
    }

    pub fn set_index_pulse(&mut self, active: bool) {
        self.index_pulse = active;
        self.touch();
    }

    pub fn index_pulse(&self) -> bool {
        self.index_pulse
    }

    pub fn set_envelope_transparency(&mut self, alpha: f64) {
        let clamped = if alpha.is_nan() { 1.0 } else { alpha.clamp(0.0, 1.0) };
        if clamped != alpha {
            warn!("envelope transparency {} clamped to {}", alpha, clamped);
        }
        self.envelope_alpha = clamped;
        self.touch();
    }

    pub fn envelope_transparency(&self) -> f64 {
        self.envelope_alpha
    }

    /// Sets the sectors per track; zero or negative counts fall back to one.
    pub fn set_sector_count(&mut self, count: i32) {
        let effective = effective_sector_count(count);
        if effective as i32 != count {
            warn!("sector count {} coerced to {}", count, effective);
        }
        self.sector_count = effective;
        self.current_sector %= effective;
        self.touch();
    }

    pub fn sector_count(&self) -> usize {
        self.sector_count
    }

    /// Selects the current sector. Values outside the track are ignored.
    pub fn set_current_sector(&mut self, sector: i32) {
        if sector < 0 || sector as usize >= self.sector_count {
            debug!("ignoring sector {} (count {})", sector, self.sector_count);
            return;
        }
        if self.current_sector != sector as usize {
            self.current_sector = sector as usize;
            self.touch();
        }
    }

    pub fn current_sector(&self) -> usize {
        self.current_sector
    }

    pub fn set_highlight_track(&mut self, highlight: bool) {
        if self.highlight_track != highlight {
            self.highlight_track = highlight;
            self.touch();
        }
    }

    pub fn set_highlight_sector(&mut self, highlight: bool) {
        if self.highlight_sector != highlight {
            self.highlight_sector = highlight;
            self.touch();
        }
    }

    pub fn start_head_animation(&mut self, now: u64) {
        self.animator.start(now);
    }

    pub fn stop_head_animation(&mut self) {
        self.animator.stop();
    }

    /// Stops the seek and returns the head to track 0, side 0.
    pub fn reset_head_animation(&mut self) {
        self.animator.reset();
        self.track = 0;
        self.side = 0;
        self.touch();
    }

    pub fn is_head_animating(&self) -> bool {
        self.animator.is_animating()
    }

    pub fn set_animation_speed(&mut self, speed: f64, now: u64) -> bool {
        self.animator.set_speed(speed, now)
    }

    pub fn animator(&self) -> &HeadSeekAnimator {
        &self.animator
    }

    /// Runs the seek and side tasks up to `now` and applies what they produced.
    pub fn advance_to(&mut self, now: u64) -> usize {
        let events = self.animator.poll(now);
        for event in &events {
            match *event {
                SeekEvent::Step(step) => {
                    self.track = track_for_step(step, ANIMATION_STEPS, self.num_tracks());
                    let sector = sector_at_rotation(self.rotation, self.sector_count);
                    self.set_current_sector(sector as i32);
                    self.touch();
                }
                SeekEvent::FlipSide => {
                    if self.format().sides_for(self.double_sided) > 1 {
                        self.side ^= 1;
                        self.touch();
                    }
                }
            }
        }
        events.len()
    }

    /// Track the head is drawn over.
    pub fn head_track(&self) -> usize {
        let last = self.format().last_track();
        if self.animator.is_animating() {
            track_for_step(self.animator.step(), ANIMATION_STEPS, self.num_tracks()).min(last)
        } else {
            self.track.min(last)
        }
    }

    pub fn snapshot(&self) -> DiskFrame {
        DiskFrame {
            track: self.track,
            side: self.side,
            head_track: self.head_track(),
            head_position: self.head_position,
            sector: self.current_sector,
            sector_count: self.sector_count,
            rotation: self.rotation,
            tracks: self.num_tracks(),
            double_density: self.double_density,
            double_sided: self.double_sided,
            write: self.write,
            index_pulse: self.index_pulse,
            envelope_alpha: self.envelope_alpha,
            highlight_track: self.highlight_track,
            highlight_sector: self.highlight_sector,
            head_animating: self.animator.is_animating(),
            seek_step: self.animator.step(),
        }
    }
}
