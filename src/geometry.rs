// src/geometry.rs

//! Disk geometry shared by the model and the renderer.
//!
//! Every absolute distance is expressed in "inches" of a 5.25" jacket and converted to
//! pixels through [`DiskLayout::scale`]. Angles are in degrees, measured clockwise on
//! screen (y grows downwards) starting at 3 o'clock.

use serde::{Deserialize, Serialize};

use crate::error::{VizError, VizResult};

/// Jacket edge length the layout square represents.
pub const JACKET_INCHES: f64 = 5.25;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Point at `radius` from `center` in direction `angle_deg`.
    pub fn polar(center: Point, radius: f64, angle_deg: f64) -> Self {
        let rad = angle_deg.to_radians();
        Point::new(center.x + radius * rad.cos(), center.y + radius * rad.sin())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect { x, y, width, height }
    }

    /// Rectangle of the given size centered on `center`.
    pub fn centered(center: Point, width: f64, height: f64) -> Self {
        Rect::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// Named constants of the drawing. Lengths are in jacket inches unless the name says
/// otherwise; `*_pct` values are fractions of the layout square's side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryProfile {
    /// Pixels left free around the layout square.
    pub margin_px: f64,
    pub jacket_corner_px: f64,
    pub hub_diameter: f64,
    pub platter_radius: f64,
    pub index_hole_angle: f64,
    pub index_hole_radial_pct: f64,
    pub index_window_radius_pct: f64,
    pub platter_hole_radius_pct: f64,
    pub slot_width: f64,
    pub slot_height: f64,
    /// Gap between the bottom of the read/write slot and the jacket's bottom edge.
    pub slot_bottom_gap: f64,
    pub notch_size: f64,
    pub notch_top: f64,
    pub guide_width: f64,
    pub guide_height: f64,
    pub guide_spacing: f64,
    pub min_track_radius: f64,
    pub max_track_radius: f64,
    /// Stretches the nominal track pitch so the rings spread across the visible media.
    pub track_spacing_factor: f64,
    /// Fixed screen angle of the read/write head.
    pub head_angle: f64,
}

pub const STANDARD: GeometryProfile = GeometryProfile {
    margin_px: 20.0,
    jacket_corner_px: 16.0,
    hub_diameter: 1.0,
    platter_radius: 2.5,
    index_hole_angle: 30.0,
    index_hole_radial_pct: 0.13,
    index_window_radius_pct: 0.018,
    platter_hole_radius_pct: 0.0095,
    slot_width: 0.45,
    slot_height: 1.7,
    slot_bottom_gap: 0.20,
    notch_size: 0.25,
    notch_top: 0.5,
    guide_width: 0.3,
    guide_height: 0.08,
    guide_spacing: 0.85,
    min_track_radius: 0.8,
    max_track_radius: 2.3,
    track_spacing_factor: 1.15,
    head_angle: 90.0,
};

/// Earlier drawing revision: tracks start further from the hub and spread wider.
pub const LEGACY: GeometryProfile = GeometryProfile {
    min_track_radius: 0.9,
    track_spacing_factor: 1.2,
    ..STANDARD
};

impl Default for GeometryProfile {
    fn default() -> Self {
        STANDARD
    }
}

/// Looks up a built-in profile by name.
pub fn profile_by_name(name: &str) -> VizResult<GeometryProfile> {
    match name.to_lowercase().as_str() {
        "standard" => Ok(STANDARD),
        "legacy" => Ok(LEGACY),
        _ => Err(VizError::UnknownProfile(name.to_string())),
    }
}

/// Wraps an angle into [0, 360). Non-finite input maps to 0.
pub fn normalize_degrees(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let mut a = angle % 360.0;
    while a < 0.0 {
        a += 360.0;
    }
    if a >= 360.0 {
        a -= 360.0;
    }
    a
}

/// Angular width of one sector.
pub fn sector_span(sector_count: usize) -> f64 {
    360.0 / sector_count.max(1) as f64
}

/// Coerces a requested sector count into a usable one (at least 1).
pub fn effective_sector_count(requested: i32) -> usize {
    if requested > 0 { requested as usize } else { 1 }
}

/// Sector derived from the rotation angle alone: `floor((angle mod 360) / span)`.
pub fn sector_at_rotation(angle: f64, sector_count: usize) -> usize {
    let count = sector_count.max(1);
    let index = (normalize_degrees(angle) / sector_span(count)).floor() as usize;
    index % count
}

/// Screen angle of sector boundary `i` after rotating the platter by `rotation`.
pub fn sector_boundary_angle(i: usize, sector_count: usize, rotation: f64, profile: &GeometryProfile) -> f64 {
    profile.index_hole_angle + i as f64 * sector_span(sector_count) + rotation
}

/// Sector currently passing under the head.
///
/// Boundaries are drawn at `+rotation`, so the head's screen angle is carried back into
/// the platter's own frame by subtracting the rotation before measuring from the index hole.
pub fn sector_under_head(rotation: f64, sector_count: usize, profile: &GeometryProfile) -> usize {
    let count = sector_count.max(1);
    let disk_angle = normalize_degrees(profile.head_angle - normalize_degrees(rotation));
    let from_index = normalize_degrees(disk_angle - profile.index_hole_angle);
    (from_index / sector_span(count)).floor() as usize % count
}

/// Maps a seek step onto a track: `floor(step / (steps - 1) * (tracks - 1))`.
pub fn track_for_step(step: usize, steps: usize, tracks: usize) -> usize {
    if steps < 2 || tracks == 0 {
        return 0;
    }
    let step = step.min(steps - 1);
    step * (tracks - 1) / (steps - 1)
}

/// Placement of the jacket inside a canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiskLayout {
    pub jacket: Rect,
    pub center: Point,
    /// Side of the layout square in pixels.
    pub side: f64,
    /// Pixels per jacket inch.
    pub scale: f64,
    pub profile: GeometryProfile,
}

impl DiskLayout {
    /// Largest centered square of the canvas, less the profile margin.
    pub fn fit(canvas: Size, profile: &GeometryProfile) -> Self {
        let side = (canvas.width.min(canvas.height) - 2.0 * profile.margin_px).max(0.0);
        let x0 = ((canvas.width - side) / 2.0).floor();
        let y0 = ((canvas.height - side) / 2.0).floor();
        let jacket = Rect::new(x0, y0, side, side);
        DiskLayout {
            jacket,
            center: jacket.center(),
            side,
            scale: side / JACKET_INCHES,
            profile: *profile,
        }
    }

    pub fn hub_radius(&self) -> f64 {
        self.scale * self.profile.hub_diameter / 2.0
    }

    pub fn platter_radius(&self) -> f64 {
        self.scale * self.profile.platter_radius
    }

    fn index_radial_distance(&self) -> f64 {
        self.side * self.profile.index_hole_radial_pct
    }

    /// Center of the jacket's index window. It never moves.
    pub fn index_window_center(&self) -> Point {
        Point::polar(self.center, self.index_radial_distance(), self.profile.index_hole_angle)
    }

    pub fn index_window_radius(&self) -> f64 {
        self.side * self.profile.index_window_radius_pct
    }

    /// Center of the platter's index hole, which turns with the platter.
    pub fn platter_hole_center(&self, rotation: f64) -> Point {
        Point::polar(
            self.center,
            self.index_radial_distance(),
            self.profile.index_hole_angle + rotation,
        )
    }

    pub fn platter_hole_radius(&self) -> f64 {
        self.side * self.profile.platter_hole_radius_pct
    }

    /// Read/write slot; its ends are fully rounded.
    pub fn slot_rect(&self) -> Rect {
        let w = self.scale * self.profile.slot_width;
        let h = self.scale * self.profile.slot_height;
        Rect::new(
            self.center.x - w / 2.0,
            self.jacket.bottom() - self.scale * self.profile.slot_bottom_gap - h,
            w,
            h,
        )
    }

    pub fn notch_rect(&self) -> Rect {
        let size = self.scale * self.profile.notch_size;
        Rect::new(
            self.jacket.right() - size,
            self.jacket.y + self.scale * self.profile.notch_top,
            size,
            size,
        )
    }

    /// The two insertion guides on the bottom edge, left one first.
    pub fn guide_triangles(&self) -> [[Point; 3]; 2] {
        let w = self.scale * self.profile.guide_width;
        let h = self.scale * self.profile.guide_height;
        let half_gap = self.scale * self.profile.guide_spacing / 2.0;
        let bottom = self.jacket.bottom();
        let guide = |cx: f64| {
            [
                Point::new(cx - w / 2.0, bottom),
                Point::new(cx + w / 2.0, bottom),
                Point::new(cx, bottom - h),
            ]
        };
        [guide(self.center.x - half_gap), guide(self.center.x + half_gap)]
    }
}

/// Radii of the concentric tracks for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackLayout {
    pub tracks: usize,
    pub min_radius: f64,
    pub max_radius: f64,
    pub spacing: f64,
}

impl TrackLayout {
    pub fn new(layout: &DiskLayout, tracks: usize) -> Self {
        let tracks = tracks.max(1);
        let min_radius = layout.scale * layout.profile.min_track_radius;
        let nominal_max = layout.scale * layout.profile.max_track_radius;
        let spacing = layout.profile.track_spacing_factor * ((nominal_max - min_radius) / tracks as f64);
        TrackLayout {
            tracks,
            min_radius,
            max_radius: min_radius + tracks as f64 * spacing,
            spacing,
        }
    }

    /// Radius of ring boundary `i`, for `i` in `0..=tracks`.
    pub fn ring_radius(&self, i: usize) -> f64 {
        self.min_radius + i as f64 * self.spacing
    }

    /// Centerline radius of a track. Track 0 is the outermost.
    pub fn centerline(&self, track: usize) -> f64 {
        let track = track.min(self.tracks - 1);
        self.min_radius + (self.tracks - track) as f64 * self.spacing
    }

    /// Inner and outer edge of the band drawn for a track.
    pub fn band(&self, track: usize) -> (f64, f64) {
        let c = self.centerline(track);
        (c - self.spacing / 2.0, c + self.spacing / 2.0)
    }

    /// Radius the head sits on, kept within the drawn tracks.
    pub fn head_radius(&self, track: usize) -> f64 {
        self.centerline(track).clamp(self.min_radius, self.max_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> DiskLayout {
        DiskLayout::fit(Size::new(400.0, 400.0), &STANDARD)
    }

    #[test]
    fn normalize_wraps_negative_and_large_angles() {
        assert_eq!(normalize_degrees(-30.0), 330.0);
        assert_eq!(normalize_degrees(720.0), 0.0);
        assert_eq!(normalize_degrees(-720.5), 359.5);
        assert_eq!(normalize_degrees(f64::NAN), 0.0);
    }

    #[test]
    fn sector_from_rotation() {
        assert_eq!(sector_at_rotation(45.0, 16), 2);
        assert_eq!(sector_at_rotation(0.0, 16), 0);
        assert_eq!(sector_at_rotation(359.999, 16), 15);
        assert_eq!(sector_at_rotation(-22.5, 16), 15);
        assert_eq!(sector_at_rotation(123.0, 1), 0);
    }

    #[test]
    fn sector_from_rotation_stays_in_range() {
        for count in 1..=32 {
            let mut angle = -720.0;
            while angle < 720.0 {
                let expected = (normalize_degrees(angle) / (360.0 / count as f64)).floor() as usize;
                let sector = sector_at_rotation(angle, count);
                assert!(sector < count);
                assert_eq!(sector, expected % count);
                angle += 7.3;
            }
        }
    }

    #[test]
    fn non_positive_sector_counts_become_one() {
        assert_eq!(effective_sector_count(0), 1);
        assert_eq!(effective_sector_count(-4), 1);
        assert_eq!(effective_sector_count(9), 9);
    }

    #[test]
    fn head_sector_inverts_rotation() {
        // Unrotated, the head at 90 deg sits in the sector spanning 75..97.5.
        assert_eq!(sector_under_head(0.0, 16, &STANDARD), 2);
        // Turning the platter one sector forward brings the previous sector under the head.
        assert_eq!(sector_under_head(22.5, 16, &STANDARD), 1);
        assert_eq!(sector_under_head(-22.5, 16, &STANDARD), 3);
        for count in [1, 9, 16, 18] {
            let mut rot = 0.0;
            while rot < 360.0 {
                let s = sector_under_head(rot, count, &STANDARD);
                assert!(s < count);
                let start = normalize_degrees(sector_boundary_angle(s, count, rot, &STANDARD));
                let offset = normalize_degrees(STANDARD.head_angle - start);
                assert!(offset < sector_span(count) + 1e-9, "rot {rot} count {count}");
                rot += 3.7;
            }
        }
    }

    #[test]
    fn step_maps_onto_tracks() {
        assert_eq!(track_for_step(40, 80, 80), 40);
        assert_eq!(track_for_step(0, 80, 80), 0);
        assert_eq!(track_for_step(79, 80, 80), 79);
        assert_eq!(track_for_step(79, 80, 40), 39);
        assert_eq!(track_for_step(40, 80, 40), 19);
    }

    #[test]
    fn layout_is_centered_square() {
        let l = DiskLayout::fit(Size::new(600.0, 400.0), &STANDARD);
        assert_eq!(l.side, 360.0);
        assert_eq!(l.jacket.x, 120.0);
        assert_eq!(l.jacket.y, 20.0);
        assert!((l.scale - 360.0 / 5.25).abs() < 1e-9);
    }

    #[test]
    fn track_radius_decreases_inwards() {
        let l = layout();
        for tracks in [40, 80] {
            let t = TrackLayout::new(&l, tracks);
            assert_eq!(t.centerline(0), t.max_radius);
            for track in 1..tracks {
                assert!(t.centerline(track) < t.centerline(track - 1));
            }
            assert!(t.centerline(tracks - 1) > t.min_radius);
        }
    }

    #[test]
    fn head_radius_is_clamped() {
        let t = TrackLayout::new(&layout(), 80);
        assert_eq!(t.head_radius(500), t.centerline(79));
        assert!(t.head_radius(0) <= t.max_radius);
    }

    #[test]
    fn openings_sit_inside_the_jacket() {
        let l = layout();
        let slot = l.slot_rect();
        assert!(l.jacket.contains(Point::new(slot.x, slot.y)));
        assert!(l.jacket.contains(Point::new(slot.right(), slot.bottom())));
        assert_eq!(l.notch_rect().right(), l.jacket.right());
        for tri in l.guide_triangles() {
            assert!(tri.iter().all(|p| l.jacket.contains(*p)));
        }
    }

    #[test]
    fn profiles_by_name() {
        assert_eq!(profile_by_name("Standard").unwrap(), STANDARD);
        assert_eq!(profile_by_name("legacy").unwrap().min_track_radius, 0.9);
        assert!(profile_by_name("rev-z").is_err());
    }
}
