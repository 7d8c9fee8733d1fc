// src/render/panel.rs

//! Register panel drawing: one row per register, then the INT and DRQ lamps.

use crate::draw::{Color, DrawCommand, Font, Paint, Shape, Stroke, Style};
use crate::geometry::{Point, Rect, Size};
use crate::registers::{format_binary, format_hex, RegisterPanel};

pub const PANEL_SIZE: Size = Size { width: 320.0, height: 200.0 };

const FIRST_ROW: f64 = 40.0;
const ROW_HEIGHT: f64 = 30.0;
const REGISTER_X: f64 = 10.0;
const LAMP_X: f64 = 250.0;
const LAMP_DIAMETER: f64 = 10.0;

/// Draws the WD1793 register panel: title, one row per register, and the two lamps.
pub fn render_panel(panel: &RegisterPanel, canvas: Size) -> Vec<DrawCommand> {
    let mut out = vec![
        DrawCommand::shape(Shape::Rect(Rect::new(0.0, 0.0, canvas.width, canvas.height)), Style::fill(Color::WHITE)),
        DrawCommand::text(Point::new(10.0, 20.0), "WD1793 FDC Status", Font::bold(12.0), Color::BLACK),
    ];

    for (row, (name, value)) in panel.registers().iter().enumerate() {
        let y = FIRST_ROW + row as f64 * ROW_HEIGHT;
        let font = Font::regular(10.0);
        out.push(DrawCommand::text(Point::new(REGISTER_X, y), format!("{}:", name), font, Color::BLACK));
        out.push(DrawCommand::text(Point::new(REGISTER_X + 80.0, y), format_binary(*value), font, Color::BLACK));
        out.push(DrawCommand::text(Point::new(REGISTER_X + 180.0, y), format_hex(*value), font, Color::BLACK));
    }

    for (row, (name, active)) in panel.lamps().iter().enumerate() {
        let y = FIRST_ROW + row as f64 * ROW_HEIGHT;
        out.push(DrawCommand::text(Point::new(LAMP_X, y), format!("{}:", name), Font::regular(10.0), Color::BLACK));
        let color = if *active { Color::RED } else { Color::GRAY };
        let radius = LAMP_DIAMETER / 2.0;
        out.push(DrawCommand::shape(
            Shape::Circle { center: Point::new(LAMP_X + 40.0 + radius, y - 5.0 + radius), radius },
            Style::filled_outlined(Paint::Solid(color), Stroke::solid(color, 1.0)),
        ));
    }
    out
}
