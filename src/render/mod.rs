// src/render/mod.rs

pub mod disk;
pub mod panel;

use serde::Serialize;

use crate::disk::DiskFrame;
use crate::draw::DrawCommand;
use crate::geometry::{GeometryProfile, Point, Size};
use crate::registers::RegisterPanel;

pub use disk::{head_center, render_disk};
pub use panel::{render_panel, PANEL_SIZE};

pub const DISK_CANVAS: Size = Size { width: 400.0, height: 400.0 };

/// One complete frame: the disk on the left, the register panel to its right.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub disk: DiskFrame,
    pub panel: RegisterPanel,
    pub disk_canvas: Size,
    pub panel_canvas: Size,
    #[serde(skip)]
    pub profile: GeometryProfile,
}

impl Scene {
    pub fn size(&self) -> Size {
        Size::new(
            self.disk_canvas.width + self.panel_canvas.width,
            self.disk_canvas.height.max(self.panel_canvas.height),
        )
    }

    pub fn render(&self) -> Vec<DrawCommand> {
        vec![
            DrawCommand::Group {
                offset: Point::default(),
                children: render_disk(&self.disk, self.disk_canvas, &self.profile),
            },
            DrawCommand::Group {
                offset: Point::new(self.disk_canvas.width, 0.0),
                children: render_panel(&self.panel, self.panel_canvas),
            },
        ]
    }
}
