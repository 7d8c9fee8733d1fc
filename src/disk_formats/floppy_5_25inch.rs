// src/disk_formats/floppy_5_25inch.rs

use super::DiskFormat;

/// Single density 5.25-inch media, 40 tracks per side.
pub const SD_40_TRACK: DiskFormat = DiskFormat {
    tracks: 40,
    sides: 2,
    sectors_per_track: 16,
    double_density: false,
    name: "5.25\" SD",
    tag: "SD",
};

/// Double density 5.25-inch media, 80 tracks per side.
pub const DD_80_TRACK: DiskFormat = DiskFormat {
    tracks: 80,
    sides: 2,
    sectors_per_track: 16,
    double_density: true,
    name: "5.25\" DD",
    tag: "DD",
};

/// Picks the media matching the density flag of the drive.
pub fn for_density(double_density: bool) -> &'static DiskFormat {
    if double_density {
        &DD_80_TRACK
    } else {
        &SD_40_TRACK
    }
}
