// src/render/disk.rs

//! Disk geometry drawing: jacket, platter, tracks, sectors, head and status line.
//! A pure function of one [`DiskFrame`]; the track radii are computed once up front
//! and shared by every step that needs them.

use crate::disk::DiskFrame;
use crate::draw::{Color, DrawCommand, Font, GradientStop, Paint, Shape, Stroke, Style};
use crate::geometry::{
    sector_boundary_angle, sector_span, sector_under_head, DiskLayout, GeometryProfile, Point, Rect, Size,
    TrackLayout,
};

const JACKET_PLASTIC: (u8, u8, u8) = (60, 60, 80);
const TRACK_LINE: Color = Color::rgba(100, 100, 255, 120);
const TRACK_FILL: Color = Color::rgba(0, 200, 0, 80);
const TRACK_OUTLINE: Color = Color::rgba(0, 200, 0, 180);
const SECTOR_LINE: Color = Color::rgba(255, 0, 0, 100);
const SECTOR_FILL: Color = Color::rgba(255, 0, 0, 60);
const SECTOR_TRACK_FILL: Color = Color::rgba(255, 0, 0, 180);
const INDEX_WINDOW: Color = Color::rgb(160, 160, 160);
const INDEX_WINDOW_LIT: Color = Color::rgb(255, 220, 0);
const HEAD_MOUNT: Color = Color::rgba(120, 180, 255, 90);
const HEAD_PAD: Color = Color::rgb(60, 60, 60);
const WRITE_OVERLAY: Color = Color::rgba(255, 0, 0, 120);

struct Painter<'a> {
    frame: &'a DiskFrame,
    canvas: Size,
    layout: DiskLayout,
    tracks: TrackLayout,
}

/// Draws one frame of the disk into a canvas of the given size.
pub fn render_disk(frame: &DiskFrame, canvas: Size, profile: &GeometryProfile) -> Vec<DrawCommand> {
    let layout = DiskLayout::fit(canvas, profile);
    let painter = Painter {
        frame,
        canvas,
        layout,
        tracks: TrackLayout::new(&layout, frame.tracks),
    };

    let mut out = Vec::new();
    painter.envelope(&mut out);
    painter.tracks(&mut out);
    painter.sectors(&mut out);
    painter.head(&mut out);
    painter.status(&mut out);
    out
}

/// Center of the head assembly for a frame.
pub fn head_center(frame: &DiskFrame, canvas: Size, profile: &GeometryProfile) -> Point {
    let layout = DiskLayout::fit(canvas, profile);
    let tracks = TrackLayout::new(&layout, frame.tracks);
    head_point(&layout, &tracks, frame.head_track)
}

fn head_point(layout: &DiskLayout, tracks: &TrackLayout, track: usize) -> Point {
    let r = tracks.head_radius(track);
    Point::new(
        layout.slot_rect().center().x,
        layout.center.y + r * layout.profile.head_angle.to_radians().sin(),
    )
}

impl Painter<'_> {
    fn hub(&self) -> Shape {
        Shape::Circle { center: self.layout.center, radius: self.layout.hub_radius() }
    }

    fn index_window(&self) -> Shape {
        Shape::Circle {
            center: self.layout.index_window_center(),
            radius: self.layout.index_window_radius(),
        }
    }

    fn slot(&self) -> Shape {
        let rect = self.layout.slot_rect();
        Shape::RoundedRect { rect, radius: rect.width / 2.0 }
    }

    fn jacket(&self) -> Shape {
        Shape::RoundedRect { rect: self.layout.jacket, radius: self.layout.profile.jacket_corner_px }
    }

    fn envelope(&self, out: &mut Vec<DrawCommand>) {
        let l = &self.layout;
        let notch = l.notch_rect();
        let [left_guide, right_guide] = l.guide_triangles();

        let mut body = vec![self.jacket(), self.hub(), self.index_window(), self.slot(), Shape::Rect(notch)];
        body.push(Shape::Polygon(left_guide.to_vec()));
        body.push(Shape::Polygon(right_guide.to_vec()));
        let (r, g, b) = JACKET_PLASTIC;
        let alpha = (self.frame.envelope_alpha.clamp(0.0, 1.0) * 255.0) as u8;
        out.push(DrawCommand::shape(
            Shape::Cutout(body),
            Style::filled_outlined(Paint::Solid(Color::rgba(r, g, b, alpha)), Stroke::solid(Color::BLACK, 2.0)),
        ));

        // wireframe outline, leaving the write-protect notch open
        let wire = Stroke::dashed(Color::BLACK, 1.0);
        let notch_gap = Rect::new(notch.x - 1.0, notch.y - 1.0, notch.width + 2.0, notch.height + 2.0);
        out.push(DrawCommand::shape(Shape::Cutout(vec![self.jacket(), Shape::Rect(notch_gap)]), Style::stroke(wire)));
        out.push(DrawCommand::shape(self.hub(), Style::stroke(wire)));

        let window = if self.frame.index_pulse { INDEX_WINDOW_LIT } else { INDEX_WINDOW };
        out.push(DrawCommand::shape(
            self.index_window(),
            Style::filled_outlined(Paint::Solid(window), Stroke::solid(Color::BLACK, 1.0)),
        ));
        out.push(DrawCommand::shape(self.slot(), Style::stroke(Stroke::solid(Color::BLACK, 1.0))));

        // the platter only shows through the jacket's openings
        let openings = vec![self.hub(), self.index_window(), self.slot()];
        out.push(DrawCommand::Clip {
            region: Shape::Union(openings.clone()),
            children: vec![self.platter()],
        });

        let mut sector_openings = openings;
        sector_openings.push(Shape::Rect(notch));
        let mut sectors = Vec::new();
        self.sectors(&mut sectors);
        out.push(DrawCommand::Clip {
            region: Shape::Union(sector_openings),
            children: vec![DrawCommand::Clip {
                region: Shape::Circle { center: l.center, radius: l.platter_radius() },
                children: sectors,
            }],
        });
    }

    fn platter(&self) -> DrawCommand {
        let l = &self.layout;
        DrawCommand::shape(
            Shape::Cutout(vec![
                Shape::Circle { center: l.center, radius: l.platter_radius() },
                Shape::Circle {
                    center: l.platter_hole_center(self.frame.rotation),
                    radius: l.platter_hole_radius(),
                },
            ]),
            Style::filled_outlined(Paint::Solid(Color::BLACK), Stroke::solid(Color::BLACK, 2.0)),
        )
    }

    fn tracks(&self, out: &mut Vec<DrawCommand>) {
        let center = self.layout.center;
        let scale = self.layout.scale;
        let line = Stroke::solid(TRACK_LINE, scale * 0.01);
        for i in 0..=self.tracks.tracks {
            out.push(DrawCommand::shape(
                Shape::Circle { center, radius: self.tracks.ring_radius(i) },
                Style::stroke(line),
            ));
        }

        if self.frame.highlight_track {
            let (inner, outer) = self.tracks.band(self.frame.track);
            out.push(DrawCommand::shape(Shape::Ring { center, inner, outer }, Style::fill(TRACK_FILL)));
            out.push(DrawCommand::shape(
                Shape::Circle { center, radius: self.tracks.centerline(self.frame.track) },
                Style::stroke(Stroke::solid(TRACK_OUTLINE, scale * 0.02)),
            ));
        }
    }

    fn sectors(&self, out: &mut Vec<DrawCommand>) {
        self.sector_boundaries(out);
        self.highlighted_sector(out);
    }

    fn sector_boundaries(&self, out: &mut Vec<DrawCommand>) {
        let f = self.frame;
        let center = self.layout.center;
        for i in 0..f.sector_count.max(1) {
            let angle = sector_boundary_angle(i, f.sector_count, f.rotation, &self.layout.profile);
            let stroke = if i == 0 {
                Stroke::solid(Color::WHITE, 2.0)
            } else {
                Stroke::solid(SECTOR_LINE, 1.0)
            };
            out.push(DrawCommand::shape(
                Shape::Line {
                    from: Point::polar(center, self.tracks.min_radius, angle),
                    to: Point::polar(center, self.tracks.max_radius, angle),
                },
                Style::stroke(stroke),
            ));
        }
    }

    fn highlighted_sector(&self, out: &mut Vec<DrawCommand>) {
        let f = self.frame;
        if !f.highlight_sector {
            return;
        }
        let profile = &self.layout.profile;
        let center = self.layout.center;
        let sector = sector_under_head(f.rotation, f.sector_count, profile);
        let (inner, outer) = self.tracks.band(f.track);
        out.push(DrawCommand::Clip {
            region: Shape::Wedge {
                center,
                radius: self.tracks.max_radius,
                start: sector_boundary_angle(sector, f.sector_count, f.rotation, profile),
                sweep: sector_span(f.sector_count),
            },
            children: vec![
                DrawCommand::shape(
                    Shape::Ring { center, inner: self.tracks.min_radius, outer: self.tracks.max_radius },
                    Style::fill(SECTOR_FILL),
                ),
                DrawCommand::shape(Shape::Ring { center, inner, outer }, Style::fill(SECTOR_TRACK_FILL)),
            ],
        });
    }

    fn head(&self, out: &mut Vec<DrawCommand>) {
        let slot_width = self.layout.slot_rect().width;
        let at = head_point(&self.layout, &self.tracks, self.frame.head_track);
        let outline = Stroke::solid(Color::BLACK, 1.0);

        let mount = Rect::centered(at, slot_width * 0.95, slot_width * 0.38);
        out.push(DrawCommand::shape(Shape::Rect(mount), Style::filled_outlined(Paint::Solid(HEAD_MOUNT), outline)));

        let head = Rect::centered(at, slot_width * 0.7, slot_width * 0.28);
        let corner = head.height * 0.4;
        let metal = Paint::LinearGradient {
            from: Point::new(head.x, head.y),
            to: Point::new(head.right(), head.bottom()),
            stops: vec![
                GradientStop { offset: 0.0, color: Color::rgb(220, 220, 220) },
                GradientStop { offset: 0.5, color: Color::rgb(180, 180, 180) },
                GradientStop { offset: 1.0, color: Color::rgb(120, 120, 120) },
            ],
        };
        out.push(DrawCommand::shape(
            Shape::RoundedRect { rect: head, radius: corner },
            Style::filled_outlined(metal, outline),
        ));

        let pad = Rect::centered(at, head.width * 0.24, head.height * 0.36);
        out.push(DrawCommand::shape(
            Shape::RoundedRect { rect: pad, radius: corner * 0.5 },
            Style::filled_outlined(Paint::Solid(HEAD_PAD), outline),
        ));

        if self.frame.write {
            out.push(DrawCommand::shape(
                Shape::RoundedRect { rect: head, radius: corner },
                Style::filled_outlined(Paint::Solid(WRITE_OVERLAY), outline),
            ));
        }
    }

    fn status(&self, out: &mut Vec<DrawCommand>) {
        out.push(DrawCommand::text(
            Point::new(10.0, self.canvas.height - 10.0),
            self.frame.status_line(),
            Font::regular(10.0),
            Color::BLACK,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disk::DiskModel;
    use crate::draw::texts;
    use crate::geometry::STANDARD;

    const CANVAS: Size = Size { width: 400.0, height: 400.0 };

    fn count(commands: &[DrawCommand], pred: impl Fn(&DrawCommand) -> bool) -> usize {
        commands.iter().flat_map(|c| c.flatten()).filter(|c| pred(*c)).count()
    }

    fn is_line(c: &DrawCommand) -> bool {
        matches!(c, DrawCommand::Fill { shape: Shape::Line { .. }, .. })
    }

    #[test]
    fn status_line_is_last() {
        let mut m = DiskModel::new();
        m.set_track(12);
        m.set_operation(true);
        let out = render_disk(&m.snapshot(), CANVAS, &STANDARD);
        match out.last() {
            Some(DrawCommand::Text { at, text, .. }) => {
                assert_eq!(text, "Track: 12  Side: 0  Sector: 0  Write  DD");
                assert_eq!(at.y, 390.0);
            }
            other => panic!("unexpected last command {:?}", other),
        }
    }

    #[test]
    fn sector_lines_drawn_inside_openings_and_on_top() {
        let mut m = DiskModel::new();
        m.set_sector_count(9);
        let out = render_disk(&m.snapshot(), CANVAS, &STANDARD);
        // once clipped to the jacket openings, once over the tracks
        assert_eq!(count(&out, is_line), 18);
    }

    #[test]
    fn one_ring_per_track_boundary() {
        let mut m = DiskModel::new();
        m.set_double_density(false);
        m.set_highlight_track(false);
        let out = render_disk(&m.snapshot(), CANVAS, &STANDARD);
        let rings = count(&out, |c| {
            matches!(c, DrawCommand::Fill { shape: Shape::Circle { .. }, style } if style.stroke.map(|s| s.color) == Some(TRACK_LINE))
        });
        assert_eq!(rings, 41);
    }

    #[test]
    fn index_boundary_is_white() {
        let out = render_disk(&DiskModel::new().snapshot(), CANVAS, &STANDARD);
        let white = count(&out, |c| {
            is_line(c) && matches!(c, DrawCommand::Fill { style, .. } if style.stroke.map(|s| s.color) == Some(Color::WHITE))
        });
        assert_eq!(white, 2);
    }

    #[test]
    fn highlights_can_be_turned_off() {
        let mut m = DiskModel::new();
        let on = render_disk(&m.snapshot(), CANVAS, &STANDARD);
        m.set_highlight_sector(false);
        m.set_highlight_track(false);
        let off = render_disk(&m.snapshot(), CANVAS, &STANDARD);
        let wedges = |cmds: &[DrawCommand]| {
            count(cmds, |c| matches!(c, DrawCommand::Clip { region: Shape::Wedge { .. }, .. }))
        };
        assert_eq!(wedges(&on), 2);
        assert_eq!(wedges(&off), 0);
        assert!(off.len() < on.len());
    }

    #[test]
    fn highlight_is_the_sector_under_the_head_on_the_active_track() {
        let mut m = DiskModel::new();
        m.set_track(10);
        m.set_rotation_angle(22.5);
        let frame = m.snapshot();
        let out = render_disk(&frame, CANVAS, &STANDARD);
        let band = TrackLayout::new(&DiskLayout::fit(CANVAS, &STANDARD), 80).band(10);

        let sector = sector_under_head(22.5, 16, &STANDARD);
        assert_eq!(sector, 1);
        let mut seen = 0;
        for c in out.iter().flat_map(|c| c.flatten()) {
            if let DrawCommand::Clip { region: Shape::Wedge { start, sweep, .. }, children } = c {
                assert_eq!(*start, sector_boundary_angle(sector, 16, 22.5, &STANDARD));
                assert_eq!(*start, 75.0);
                assert_eq!(*sweep, 22.5);
                match &children[1] {
                    DrawCommand::Fill { shape: Shape::Ring { inner, outer, .. }, .. } => {
                        assert_eq!((*inner, *outer), band);
                    }
                    other => panic!("expected the track ring, got {:?}", other),
                }
                seen += 1;
            }
        }
        assert_eq!(seen, 2);
    }

    #[test]
    fn head_moves_towards_hub_as_track_grows() {
        let mut m = DiskModel::new();
        let mut last_y = f64::MAX;
        for track in 0..80 {
            m.set_track(track);
            let y = head_center(&m.snapshot(), CANVAS, &STANDARD).y;
            assert!(y < last_y);
            last_y = y;
        }
        let center_y = DiskLayout::fit(CANVAS, &STANDARD).center.y;
        assert!(last_y > center_y);
    }

    #[test]
    fn head_stays_inside_slot_column() {
        let frame = DiskModel::new().snapshot();
        let layout = DiskLayout::fit(CANVAS, &STANDARD);
        let head = head_center(&frame, CANVAS, &STANDARD);
        assert_eq!(head.x, layout.slot_rect().center().x);
    }

    #[test]
    fn write_mode_adds_overlay() {
        let mut m = DiskModel::new();
        let read = render_disk(&m.snapshot(), CANVAS, &STANDARD);
        m.set_operation(true);
        let write = render_disk(&m.snapshot(), CANVAS, &STANDARD);
        assert_eq!(write.len(), read.len() + 1);
    }

    #[test]
    fn index_pulse_lights_the_window() {
        let lit = |pulse: bool| {
            let mut m = DiskModel::new();
            m.set_index_pulse(pulse);
            let out = render_disk(&m.snapshot(), CANVAS, &STANDARD);
            count(&out, |c| {
                matches!(c, DrawCommand::Fill { style, .. } if style.fill == Some(Paint::Solid(INDEX_WINDOW_LIT)))
            })
        };
        assert_eq!(lit(true), 1);
        assert_eq!(lit(false), 0);
    }

    #[test]
    fn envelope_alpha_follows_transparency() {
        let mut m = DiskModel::new();
        m.set_envelope_transparency(0.0);
        let out = render_disk(&m.snapshot(), CANVAS, &STANDARD);
        match &out[0] {
            DrawCommand::Fill { shape: Shape::Cutout(parts), style } => {
                assert_eq!(parts.len(), 7);
                assert_eq!(style.fill, Some(Paint::Solid(Color::rgba(60, 60, 80, 0))));
            }
            other => panic!("jacket should come first, got {:?}", other),
        }
        assert_eq!(texts(&out).len(), 1);
    }
}
