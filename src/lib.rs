// src/lib.rs

//! # `floppyviz` library
//!
//! Animated picture of a 5.25" floppy drive and its WD1793 controller registers.
//! Nothing is read from or written to a real disk; the drive state is a handful of
//! setters, and every frame is drawn from an immutable snapshot of it.
//!
//! ## Architecture
//!
//! * `driver::AnimationDriver` owns the virtual clock, spins the platter on a ~60 Hz
//!   master tick, pulses the index sensor, and handles play/pause/reset
//! * `disk::DiskModel` holds the drive state and the `seek::HeadSeekAnimator`
//! * `render` turns a `render::Scene` into backend-neutral `draw::DrawCommand`s
//! * `formats` writes those commands out as SVG or JSON
//!
//! Time is virtual throughout, so animations are deterministic and tests never sleep.

pub mod clock;
pub mod disk;
pub mod disk_formats;
pub mod draw;
pub mod driver;
pub mod error;
pub mod formats;
pub mod geometry;
pub mod registers;
pub mod render;
pub mod seek;
pub mod settings;

pub use disk::{DiskFrame, DiskModel};
pub use driver::AnimationDriver;
pub use error::{VizError, VizResult};
pub use registers::RegisterPanel;
pub use render::Scene;
pub use settings::Settings;
