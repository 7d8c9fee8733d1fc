// src/draw.rs

//! Backend-neutral display list. Renderers emit [`DrawCommand`]s; writers in
//! `formats` turn them into files.

use serde::Serialize;

use crate::geometry::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GRAY: Color = Color::rgb(160, 160, 164);

    /// Alpha as a fraction in [0, 1].
    pub fn opacity(&self) -> f64 {
        self.a as f64 / 255.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Paint {
    Solid(Color),
    LinearGradient { from: Point, to: Point, stops: Vec<GradientStop> },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    pub dashed: bool,
}

impl Stroke {
    pub fn solid(color: Color, width: f64) -> Self {
        Stroke { color, width, dashed: false }
    }

    pub fn dashed(color: Color, width: f64) -> Self {
        Stroke { color, width, dashed: true }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Style {
    pub fill: Option<Paint>,
    pub stroke: Option<Stroke>,
}

impl Style {
    pub fn fill(color: Color) -> Self {
        Style { fill: Some(Paint::Solid(color)), stroke: None }
    }

    pub fn stroke(stroke: Stroke) -> Self {
        Style { fill: None, stroke: Some(stroke) }
    }

    pub fn filled_outlined(fill: Paint, stroke: Stroke) -> Self {
        Style { fill: Some(fill), stroke: Some(stroke) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Shape {
    Circle { center: Point, radius: f64 },
    /// Area between two concentric circles.
    Ring { center: Point, inner: f64, outer: f64 },
    Rect(Rect),
    RoundedRect { rect: Rect, radius: f64 },
    Polygon(Vec<Point>),
    Line { from: Point, to: Point },
    /// Pie slice from `start` sweeping clockwise by `sweep` degrees.
    Wedge { center: Point, radius: f64, start: f64, sweep: f64 },
    /// First part with every following part cut out of it (even-odd fill).
    Cutout(Vec<Shape>),
    /// Union of the parts; only meaningful as a clip region.
    Union(Vec<Shape>),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Font {
    pub family: &'static str,
    pub size: f64,
    pub bold: bool,
}

impl Font {
    pub const fn regular(size: f64) -> Self {
        Font { family: "Arial", size, bold: false }
    }

    pub const fn bold(size: f64) -> Self {
        Font { family: "Arial", size, bold: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    Fill { shape: Shape, style: Style },
    Text { at: Point, text: String, font: Font, color: Color },
    /// Children are only visible inside `region`.
    Clip { region: Shape, children: Vec<DrawCommand> },
    /// Children shifted by `offset`.
    Group { offset: Point, children: Vec<DrawCommand> },
}

impl DrawCommand {
    pub fn shape(shape: Shape, style: Style) -> Self {
        DrawCommand::Fill { shape, style }
    }

    pub fn text(at: Point, text: impl Into<String>, font: Font, color: Color) -> Self {
        DrawCommand::Text { at, text: text.into(), font, color }
    }

    /// Every command in this subtree, depth first.
    pub fn flatten(&self) -> Vec<&DrawCommand> {
        let mut out = vec![self];
        match self {
            DrawCommand::Clip { children, .. } | DrawCommand::Group { children, .. } => {
                for child in children {
                    out.extend(child.flatten());
                }
            }
            _ => {}
        }
        out
    }
}

/// Text of every `Text` command in a list, in drawing order.
pub fn texts(commands: &[DrawCommand]) -> Vec<&str> {
    commands
        .iter()
        .flat_map(|c| c.flatten())
        .filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect()
}
