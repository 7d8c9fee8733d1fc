// src/error.rs

/// Errors raised at the outer surfaces of the crate: settings, presets and frame output.
/// The visual model itself never fails, it clamps or ignores bad input instead.
#[derive(thiserror::Error, Debug)]
pub enum VizError {
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
    #[error("Output path has no file extension: {0}")]
    NoExtension(String),
    #[error("Unknown geometry profile: {0}")]
    UnknownProfile(String),
    #[error("Speed preset {0} is out of range (expected 0..={1})")]
    SpeedPresetOutOfRange(usize, usize),
    #[error("Animation speed must be positive, got {0}")]
    InvalidSpeed(f64),
    #[error("Could not parse settings: {0}")]
    Settings(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type VizResult<T> = Result<T, VizError>;
