// src/disk_formats/mod.rs

pub mod floppy_5_25inch;

pub use floppy_5_25inch::{for_density, DD_80_TRACK, SD_40_TRACK};

/// Physical characteristics of the media shown in the drive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiskFormat {
    pub tracks: usize,
    pub sides: usize,
    pub sectors_per_track: usize,
    pub double_density: bool,
    pub name: &'static str,
    /// Short label used in the status line.
    pub tag: &'static str,
}

impl DiskFormat {
    /// Number of usable sides given the drive's sidedness flag.
    pub fn sides_for(&self, double_sided: bool) -> usize {
        if double_sided { self.sides } else { 1 }
    }

    /// Highest valid track index.
    pub fn last_track(&self) -> usize {
        self.tracks - 1
    }
}
