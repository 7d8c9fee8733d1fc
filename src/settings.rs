// src/settings.rs

//! Optional JSON settings file. Every field may be omitted.
//!
//! ```json
//! { "profile": "legacy", "sector_count": 9, "speed": 0.5,
//!   "geometry": { "track_spacing_factor": 1.18 } }
//! ```

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::disk::DEFAULT_SECTOR_COUNT;
use crate::driver::AnimationDriver;
use crate::error::VizResult;
use crate::geometry::{profile_by_name, GeometryProfile, Size};
use crate::render::{DISK_CANVAS, PANEL_SIZE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub disk_canvas: Size,
    pub panel_canvas: Size,
    /// Name of a built-in geometry profile.
    pub profile: String,
    /// Full set of geometry constants; omitted fields take the standard values.
    /// Takes precedence over `profile`.
    pub geometry: Option<GeometryProfile>,
    pub sector_count: i32,
    pub envelope_transparency: f64,
    pub highlight_track: bool,
    pub highlight_sector: bool,
    pub speed: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            disk_canvas: DISK_CANVAS,
            panel_canvas: PANEL_SIZE,
            profile: "standard".to_string(),
            geometry: None,
            sector_count: DEFAULT_SECTOR_COUNT as i32,
            envelope_transparency: 1.0,
            highlight_track: true,
            highlight_sector: true,
            speed: 1.0,
        }
    }
}

impl Settings {
    pub fn from_json(text: &str) -> VizResult<Settings> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> VizResult<Settings> {
        let text = std::fs::read_to_string(path)?;
        let settings = Settings::from_json(&text)?;
        info!("loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn geometry_profile(&self) -> VizResult<GeometryProfile> {
        match self.geometry {
            Some(profile) => Ok(profile),
            None => profile_by_name(&self.profile),
        }
    }

    /// Builds a driver configured from these settings.
    pub fn build_driver(&self) -> VizResult<AnimationDriver> {
        let mut driver = AnimationDriver::with_profile(self.geometry_profile()?);
        driver.set_canvases(self.disk_canvas, self.panel_canvas);
        driver.set_speed(self.speed)?;
        let disk = driver.disk_mut();
        disk.set_sector_count(self.sector_count);
        disk.set_envelope_transparency(self.envelope_transparency);
        disk.set_highlight_track(self.highlight_track);
        disk.set_highlight_sector(self.highlight_sector);
        Ok(driver)
    }
}
