// src/formats/mod.rs

pub mod json;
pub mod svg;

use std::path::Path;

use log::info;

use crate::error::{VizError, VizResult};
use crate::render::Scene;

/// Turns a scene into the bytes of one output file.
pub trait FrameWriter {
    fn extension(&self) -> &'static str;
    fn encode(&self, scene: &Scene) -> VizResult<Vec<u8>>;

    fn write(&self, scene: &Scene, path: &Path) -> VizResult<()> {
        let bytes = self.encode(scene)?;
        std::fs::write(path, &bytes)?;
        info!("wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}

pub fn writer_for_format(name: &str) -> VizResult<Box<dyn FrameWriter>> {
    match name.to_lowercase().as_str() {
        "svg" => Ok(Box::new(svg::SvgWriter)),
        "json" => Ok(Box::new(json::JsonWriter::default())),
        other => Err(VizError::UnsupportedFormat(other.to_string())),
    }
}

/// Picks a writer from the output file's extension.
pub fn writer_for_path(path: &Path) -> VizResult<Box<dyn FrameWriter>> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| VizError::NoExtension(path.display().to_string()))?;
    writer_for_format(ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn extension_selects_writer() {
        assert_eq!(writer_for_path(&PathBuf::from("frame.SVG")).unwrap().extension(), "svg");
        assert_eq!(writer_for_path(&PathBuf::from("out/frame.json")).unwrap().extension(), "json");
        assert!(matches!(writer_for_path(&PathBuf::from("frame.png")), Err(VizError::UnsupportedFormat(_))));
        assert!(matches!(writer_for_path(&PathBuf::from("frame")), Err(VizError::NoExtension(_))));
    }
}
