// src/formats/svg.rs

//! SVG output. Clips and gradients go into `<defs>`; compound shapes become even-odd paths.

use std::fmt::Write;

use super::FrameWriter;
use crate::draw::{Color, DrawCommand, Paint, Shape, Stroke, Style};
use crate::error::VizResult;
use crate::geometry::{Point, Rect};
use crate::render::Scene;

/// Vector image of the scene.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgWriter;

impl FrameWriter for SvgWriter {
    fn extension(&self) -> &'static str {
        "svg"
    }

    fn encode(&self, scene: &Scene) -> VizResult<Vec<u8>> {
        let size = scene.size();
        let mut doc = SvgDocument::default();
        for command in scene.render() {
            doc.command(&command, 1);
        }
        let mut out = String::new();
        // writing into a String cannot fail
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = num(size.width),
            h = num(size.height)
        );
        let _ = writeln!(out, "<defs>\n{}</defs>", doc.defs);
        out.push_str(&doc.body);
        out.push_str("</svg>\n");
        Ok(out.into_bytes())
    }
}

#[derive(Default)]
struct SvgDocument {
    defs: String,
    body: String,
    next_id: usize,
}

impl SvgDocument {
    fn id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}{}", prefix, self.next_id)
    }

    fn command(&mut self, command: &DrawCommand, depth: usize) {
        let indent = "  ".repeat(depth);
        match command {
            DrawCommand::Fill { shape, style } => {
                let attrs = self.style_attrs(style);
                let element = shape_element(shape, &attrs);
                let _ = writeln!(self.body, "{}{}", indent, element);
            }
            DrawCommand::Text { at, text, font, color } => {
                let _ = writeln!(
                    self.body,
                    r#"{}<text x="{}" y="{}" font-family="{}" font-size="{}" font-weight="{}" {}>{}</text>"#,
                    indent,
                    num(at.x),
                    num(at.y),
                    font.family,
                    num(font.size),
                    if font.bold { "bold" } else { "normal" },
                    color_attrs("fill", *color),
                    escape(text)
                );
            }
            DrawCommand::Clip { region, children } => {
                let id = self.id("clip");
                let _ = writeln!(self.defs, r#"  <clipPath id="{}">"#, id);
                for part in clip_parts(region) {
                    let _ = writeln!(self.defs, "    {}", shape_element(part, ""));
                }
                let _ = writeln!(self.defs, "  </clipPath>");
                let _ = writeln!(self.body, r#"{}<g clip-path="url(#{})">"#, indent, id);
                for child in children {
                    self.command(child, depth + 1);
                }
                let _ = writeln!(self.body, "{}</g>", indent);
            }
            DrawCommand::Group { offset, children } => {
                let _ = writeln!(
                    self.body,
                    r#"{}<g transform="translate({},{})">"#,
                    indent,
                    num(offset.x),
                    num(offset.y)
                );
                for child in children {
                    self.command(child, depth + 1);
                }
                let _ = writeln!(self.body, "{}</g>", indent);
            }
        }
    }

    fn style_attrs(&mut self, style: &Style) -> String {
        let mut attrs = Vec::new();
        match &style.fill {
            None => attrs.push(r#"fill="none""#.to_string()),
            Some(Paint::Solid(color)) => attrs.push(color_attrs("fill", *color)),
            Some(Paint::LinearGradient { from, to, stops }) => {
                let id = self.id("grad");
                let _ = writeln!(
                    self.defs,
                    r#"  <linearGradient id="{}" gradientUnits="userSpaceOnUse" x1="{}" y1="{}" x2="{}" y2="{}">"#,
                    id,
                    num(from.x),
                    num(from.y),
                    num(to.x),
                    num(to.y)
                );
                for stop in stops {
                    let _ = writeln!(
                        self.defs,
                        r#"    <stop offset="{}" stop-color="{}" stop-opacity="{}"/>"#,
                        num(stop.offset),
                        rgb(stop.color),
                        num(stop.color.opacity())
                    );
                }
                let _ = writeln!(self.defs, "  </linearGradient>");
                attrs.push(format!(r#"fill="url(#{})""#, id));
            }
        }
        if let Some(stroke) = &style.stroke {
            attrs.push(stroke_attrs(stroke));
        }
        attrs.join(" ")
    }
}

/// Shapes making up a clip region; a union clips to any of its parts.
fn clip_parts(region: &Shape) -> Vec<&Shape> {
    match region {
        Shape::Union(parts) => parts.iter().flat_map(clip_parts).collect(),
        other => vec![other],
    }
}

fn shape_element(shape: &Shape, attrs: &str) -> String {
    match shape {
        Shape::Circle { center, radius } => format!(
            r#"<circle cx="{}" cy="{}" r="{}" {}/>"#,
            num(center.x),
            num(center.y),
            num(*radius),
            attrs
        ),
        Shape::Rect(rect) => rect_element(rect, 0.0, attrs),
        Shape::RoundedRect { rect, radius } => rect_element(rect, *radius, attrs),
        Shape::Line { from, to } => format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" {}/>"#,
            num(from.x),
            num(from.y),
            num(to.x),
            num(to.y),
            attrs
        ),
        Shape::Polygon(points) => {
            let pts: Vec<String> = points.iter().map(|p| format!("{},{}", num(p.x), num(p.y))).collect();
            format!(r#"<polygon points="{}" {}/>"#, pts.join(" "), attrs)
        }
        Shape::Ring { .. } | Shape::Wedge { .. } | Shape::Cutout(_) | Shape::Union(_) => {
            format!(r#"<path d="{}" fill-rule="evenodd" {}/>"#, path_data(shape), attrs)
        }
    }
}

fn rect_element(rect: &Rect, radius: f64, attrs: &str) -> String {
    format!(
        r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{r}" ry="{r}" {}/>"#,
        num(rect.x),
        num(rect.y),
        num(rect.width),
        num(rect.height),
        attrs,
        r = num(radius)
    )
}

/// Path data for any shape, as closed subpaths.
fn path_data(shape: &Shape) -> String {
    match shape {
        Shape::Circle { center, radius } => circle_path(*center, *radius),
        Shape::Ring { center, inner, outer } => {
            format!("{} {}", circle_path(*center, *outer), circle_path(*center, *inner))
        }
        Shape::Rect(rect) => rounded_rect_path(rect, 0.0),
        Shape::RoundedRect { rect, radius } => rounded_rect_path(rect, *radius),
        Shape::Polygon(points) => {
            let mut d = String::new();
            for (i, p) in points.iter().enumerate() {
                let _ = write!(d, "{}{} {} ", if i == 0 { "M" } else { "L" }, num(p.x), num(p.y));
            }
            d.push('Z');
            d
        }
        Shape::Line { from, to } => format!("M{} {} L{} {}", num(from.x), num(from.y), num(to.x), num(to.y)),
        Shape::Wedge { center, radius, sweep, .. } if sweep.abs() >= 360.0 => circle_path(*center, *radius),
        Shape::Wedge { center, radius, start, sweep } => {
            let a = Point::polar(*center, *radius, *start);
            let b = Point::polar(*center, *radius, start + sweep);
            let large = if sweep.abs() > 180.0 { 1 } else { 0 };
            let clockwise = if *sweep >= 0.0 { 1 } else { 0 };
            format!(
                "M{} {} L{} {} A{r} {r} 0 {} {} {} {} Z",
                num(center.x),
                num(center.y),
                num(a.x),
                num(a.y),
                large,
                clockwise,
                num(b.x),
                num(b.y),
                r = num(*radius)
            )
        }
        Shape::Cutout(parts) | Shape::Union(parts) => {
            parts.iter().map(path_data).collect::<Vec<_>>().join(" ")
        }
    }
}

fn circle_path(c: Point, r: f64) -> String {
    format!(
        "M{} {} A{r} {r} 0 1 0 {} {} A{r} {r} 0 1 0 {} {} Z",
        num(c.x - r),
        num(c.y),
        num(c.x + r),
        num(c.y),
        num(c.x - r),
        num(c.y),
        r = num(r)
    )
}

fn rounded_rect_path(rect: &Rect, radius: f64) -> String {
    let r = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
    if r == 0.0 {
        return format!(
            "M{} {} H{} V{} H{} Z",
            num(rect.x),
            num(rect.y),
            num(rect.right()),
            num(rect.bottom()),
            num(rect.x)
        );
    }
    let (x0, y0, x1, y1) = (rect.x, rect.y, rect.right(), rect.bottom());
    format!(
        "M{} {} H{} A{r} {r} 0 0 1 {} {} V{} A{r} {r} 0 0 1 {} {} H{} A{r} {r} 0 0 1 {} {} V{} A{r} {r} 0 0 1 {} {} Z",
        num(x0 + r),
        num(y0),
        num(x1 - r),
        num(x1),
        num(y0 + r),
        num(y1 - r),
        num(x1 - r),
        num(y1),
        num(x0 + r),
        num(x0),
        num(y1 - r),
        num(y0 + r),
        num(x0 + r),
        num(y0),
        r = num(r)
    )
}

fn rgb(color: Color) -> String {
    format!("rgb({},{},{})", color.r, color.g, color.b)
}

fn color_attrs(attr: &str, color: Color) -> String {
    if color.a == 255 {
        format!(r#"{}="{}""#, attr, rgb(color))
    } else {
        format!(r#"{a}="{}" {a}-opacity="{}""#, rgb(color), num(color.opacity()), a = attr)
    }
}

fn stroke_attrs(stroke: &Stroke) -> String {
    let mut s = format!(r#"{} stroke-width="{}""#, color_attrs("stroke", stroke.color), num(stroke.width));
    if stroke.dashed {
        s.push_str(r#" stroke-dasharray="4 2""#);
    }
    s
}

/// Compact number formatting: at most three decimals, no trailing zeros.
fn num(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::AnimationDriver;
    use crate::geometry::{DiskLayout, TrackLayout, STANDARD};
    use crate::render::DISK_CANVAS;

    fn render(driver: &AnimationDriver) -> String {
        String::from_utf8(SvgWriter.encode(&driver.scene()).unwrap()).unwrap()
    }

    #[test]
    fn numbers_are_compact() {
        assert_eq!(num(12.0), "12");
        assert_eq!(num(0.5), "0.5");
        assert_eq!(num(1.23456), "1.235");
        assert_eq!(num(-0.0001), "0");
    }

    #[test]
    fn document_has_frame_and_panel() {
        let mut driver = AnimationDriver::new();
        driver.panel_mut().set_status_register(0x80);
        let svg = render(&driver);
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r#"width="720" height="400""#));
        assert!(svg.contains("Track: 0  Side: 0  Sector: 0  Read  DD"));
        assert!(svg.contains("WD1793 FDC Status"));
        assert!(svg.contains(">10000000<") && svg.contains(">0x80<"));
        assert!(svg.contains(r#"transform="translate(400,0)""#));
    }

    #[test]
    fn every_clip_is_defined() {
        let svg = render(&AnimationDriver::new());
        let used = svg.matches("clip-path=\"url(#").count();
        let defined = svg.matches("<clipPath id=").count();
        assert_eq!(used, defined);
        assert!(defined >= 4);
        assert!(svg.contains("<linearGradient"));
        assert!(svg.contains(r#"stroke-dasharray="4 2""#));
    }

    #[test]
    fn wedge_path_uses_arc() {
        let d = path_data(&Shape::Wedge { center: Point::new(0.0, 0.0), radius: 10.0, start: 0.0, sweep: 90.0 });
        assert_eq!(d, "M0 0 L10 0 A10 10 0 0 1 0 10 Z");
    }

    #[test]
    fn full_turn_wedge_is_a_circle() {
        let wedge = Shape::Wedge { center: Point::new(0.0, 0.0), radius: 10.0, start: 30.0, sweep: 360.0 };
        assert_eq!(path_data(&wedge), circle_path(Point::new(0.0, 0.0), 10.0));
    }

    #[test]
    fn single_sector_highlight_covers_the_ring() {
        let mut driver = AnimationDriver::new();
        driver.disk_mut().set_sector_count(0);
        driver.set_rotation(100.0);
        let svg = render(&driver);
        let layout = DiskLayout::fit(DISK_CANVAS, &STANDARD);
        let tracks = TrackLayout::new(&layout, 80);
        let full = circle_path(layout.center, tracks.max_radius);
        assert!(svg.contains(&format!(r#"<path d="{}" fill-rule"#, full)));
    }

    #[test]
    fn text_is_escaped() {
        assert_eq!(escape("a<b & c>"), "a&lt;b &amp; c&gt;");
    }
}
