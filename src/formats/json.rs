// src/formats/json.rs

//! JSON output: status line, scene state and the full display list.

use serde::Serialize;

use super::FrameWriter;
use crate::draw::DrawCommand;
use crate::error::VizResult;
use crate::render::Scene;

/// Dumps the frame state and its display list.
#[derive(Debug, Clone, Copy)]
pub struct JsonWriter {
    pub pretty: bool,
}

impl Default for JsonWriter {
    fn default() -> Self {
        JsonWriter { pretty: true }
    }
}

#[derive(Serialize)]
struct JsonFrame<'a> {
    status: String,
    scene: &'a Scene,
    commands: Vec<DrawCommand>,
}

impl FrameWriter for JsonWriter {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn encode(&self, scene: &Scene) -> VizResult<Vec<u8>> {
        let frame = JsonFrame {
            status: scene.disk.status_line(),
            scene,
            commands: scene.render(),
        };
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(&frame)?
        } else {
            serde_json::to_vec(&frame)?
        };
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::AnimationDriver;

    #[test]
    fn json_carries_state_and_commands() {
        let mut driver = AnimationDriver::new();
        driver.disk_mut().set_track(7);
        driver.panel_mut().set_track_register(7);
        let bytes = JsonWriter { pretty: false }.encode(&driver.scene()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["status"], "Track: 7  Side: 0  Sector: 0  Read  DD");
        assert_eq!(value["scene"]["disk"]["track"], 7);
        assert_eq!(value["scene"]["panel"]["track"], 7);
        assert_eq!(value["commands"].as_array().unwrap().len(), 2);
    }
}
