//! Radial hue/shade wheel: forward layout of annular sectors and the inverse
//! mapping from a point back to a cell.
//!
//! Angles are in degrees, measured clockwise from the +x axis in screen
//! coordinates (y grows downward). Hue 0 starts straight up, so every cell's
//! start angle is offset by [`START_ANGLE`].

use crate::color::HexColor;
use crate::geometry::Point;
use crate::shades::{self, HUE_COUNT, SHADE_COUNT};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

pub const START_ANGLE: f64 = -90.0;
pub const CANVAS_SIZE: f64 = 350.0;
pub const MAX_RADIUS: f64 = 120.0;
pub const MARKER_RADIUS: f64 = 155.0; // orbit of the decorative hue dots
pub const MARKER_SIZE: f64 = 16.0;
pub const SELECTED_STROKE_WIDTH: f64 = 3.0;
pub const MARKER_STROKE_WIDTH: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WheelCell {
    pub hue_index: usize,
    pub shade_index: usize,
}

impl WheelCell {
    pub fn new(hue_index: usize, shade_index: usize) -> Self {
        Self {
            hue_index,
            shade_index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelLayout {
    pub center: Point,
    pub max_radius: f64,
    pub marker_radius: f64,
    pub marker_size: f64,
}

impl Default for WheelLayout {
    fn default() -> Self {
        Self {
            center: Point::new(CANVAS_SIZE / 2.0, CANVAS_SIZE / 2.0),
            max_radius: MAX_RADIUS,
            marker_radius: MARKER_RADIUS,
            marker_size: MARKER_SIZE,
        }
    }
}

impl WheelLayout {
    pub fn hue_count(&self) -> usize {
        HUE_COUNT
    }

    pub fn ring_count(&self) -> usize {
        SHADE_COUNT
    }

    pub fn angle_per_hue(&self) -> f64 {
        360.0 / self.hue_count() as f64
    }

    pub fn radius_step(&self) -> f64 {
        self.max_radius / self.ring_count() as f64
    }

    pub fn base_hues(&self) -> Vec<f64> {
        shades::base_hues(self.hue_count())
    }

    pub fn hue_of(&self, hue_index: usize) -> f64 {
        hue_index as f64 * self.angle_per_hue()
    }

    pub fn cells(&self) -> impl Iterator<Item = WheelCell> {
        let rings = self.ring_count();
        (0..self.hue_count())
            .flat_map(move |h| (0..rings).map(move |s| WheelCell::new(h, s)))
    }

    pub fn cell_color(&self, cell: WheelCell) -> HexColor {
        shades::shades_for_hue(self.hue_of(cell.hue_index))[cell.shade_index]
    }

    pub fn segment(&self, cell: WheelCell) -> Segment {
        let step = self.radius_step();
        let start_angle = self.hue_of(cell.hue_index) + START_ANGLE;
        Segment {
            cell,
            color: self.cell_color(cell),
            center: self.center,
            inner_radius: cell.shade_index as f64 * step,
            outer_radius: (cell.shade_index + 1) as f64 * step,
            start_angle,
            end_angle: start_angle + self.angle_per_hue(),
        }
    }

    pub fn segments(&self) -> Vec<Segment> {
        self.cells().map(|cell| self.segment(cell)).collect()
    }

    /// Maps an angle (already offset so hue 0 sits at 0°) to its hue index. 0° and 360° coincide.
    pub fn hue_index_at(&self, angle: f64) -> usize {
        let angle = angle.rem_euclid(360.0);
        (angle / self.angle_per_hue()).floor() as usize % self.hue_count()
    }

    /// Inverse of [`segment`](Self::segment). `None` when the point is outside the pickable disk.
    pub fn locate(&self, point: Point) -> Option<WheelCell> {
        let distance = self.center.distance_to(point);
        if distance.is_nan() || distance > self.max_radius {
            return None;
        }

        let hue_index = self.hue_index_at(self.center.angle_to(point) - START_ANGLE);
        // a point exactly on the rim belongs to the outermost ring
        let shade_index =
            ((distance / self.radius_step()).floor() as usize).min(self.ring_count() - 1);

        Some(WheelCell::new(hue_index, shade_index))
    }

    pub fn resolve(&self, point: Point) -> Option<(WheelCell, HexColor)> {
        self.locate(point).map(|cell| (cell, self.cell_color(cell)))
    }

    /// The cell drawn in exactly this color, if any. Free-typed colors are usually off the grid.
    pub fn cell_of_color(&self, color: HexColor) -> Option<WheelCell> {
        self.cells().find(|&cell| self.cell_color(cell) == color)
    }

    pub fn markers(&self) -> Vec<Marker> {
        (0..self.hue_count())
            .map(|i| Marker {
                center: self
                    .center
                    .polar_offset(self.marker_radius, self.hue_of(i) + START_ANGLE),
                radius: self.marker_size,
                color: shades::marker_color(self.hue_of(i)),
            })
            .collect()
    }

    /// Standalone SVG document of the wheel, outlining the cell matching `selected`.
    pub fn to_svg(&self, selected: Option<HexColor>) -> String {
        let highlighted = selected.and_then(|c| self.cell_of_color(c));
        let width = self.center.x * 2.0;
        let height = self.center.y * 2.0;

        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">\n<g>\n"
        );
        for segment in self.segments() {
            let (stroke, stroke_width) = if highlighted == Some(segment.cell) {
                ("#000", SELECTED_STROKE_WIDTH)
            } else {
                ("transparent", 0.0)
            };
            let _ = writeln!(
                svg,
                "<path d=\"{}\" fill=\"{}\" stroke=\"{stroke}\" stroke-width=\"{stroke_width}\"/>",
                segment.svg_path(),
                segment.color
            );
        }
        for marker in self.markers() {
            let _ = writeln!(
                svg,
                "<circle cx=\"{:.3}\" cy=\"{:.3}\" r=\"{}\" fill=\"{}\" stroke=\"#FFF\" stroke-width=\"{MARKER_STROKE_WIDTH}\"/>",
                marker.center.x, marker.center.y, marker.radius, marker.color
            );
        }
        svg.push_str("</g>\n</svg>\n");
        svg
    }
}

/// One annular sector of the wheel. The innermost ring is a pie slice touching the center.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub cell: WheelCell,
    pub color: HexColor,
    pub center: Point,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Segment {
    pub fn is_pie_slice(&self) -> bool {
        self.cell.shade_index == 0
    }

    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    pub fn large_arc(&self) -> bool {
        self.sweep() > 180.0
    }

    pub fn centroid(&self) -> Point {
        self.center.polar_offset(
            (self.inner_radius + self.outer_radius) / 2.0,
            (self.start_angle + self.end_angle) / 2.0,
        )
    }

    /// SVG path data: inner start, out along the start edge, clockwise outer arc,
    /// back along the end edge, counter-clockwise inner arc.
    pub fn svg_path(&self) -> String {
        let large = u8::from(self.large_arc());
        let outer_start = self.center.polar_offset(self.outer_radius, self.start_angle);
        let outer_end = self.center.polar_offset(self.outer_radius, self.end_angle);
        let ro = self.outer_radius;

        if self.is_pie_slice() {
            return format!(
                "M {:.3} {:.3} L {:.3} {:.3} A {ro:.3} {ro:.3} 0 {large} 1 {:.3} {:.3} Z",
                self.center.x, self.center.y, outer_start.x, outer_start.y, outer_end.x, outer_end.y
            );
        }

        let inner_start = self.center.polar_offset(self.inner_radius, self.start_angle);
        let inner_end = self.center.polar_offset(self.inner_radius, self.end_angle);
        let ri = self.inner_radius;
        format!(
            "M {:.3} {:.3} L {:.3} {:.3} A {ro:.3} {ro:.3} 0 {large} 1 {:.3} {:.3} L {:.3} {:.3} A {ri:.3} {ri:.3} 0 {large} 0 {:.3} {:.3} Z",
            inner_start.x,
            inner_start.y,
            outer_start.x,
            outer_start.y,
            outer_end.x,
            outer_end.y,
            inner_end.x,
            inner_end.y,
            inner_start.x,
            inner_start.y
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub center: Point,
    pub radius: f64,
    pub color: HexColor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_has_160_cells() {
        let layout = WheelLayout::default();
        assert_eq!(layout.segments().len(), 160);
        assert_eq!(layout.angle_per_hue(), 18.0);
        assert_eq!(layout.radius_step(), 15.0);
    }

    #[test]
    fn test_centroid_round_trips_for_every_cell() {
        let layout = WheelLayout::default();
        for segment in layout.segments() {
            assert_eq!(
                layout.locate(segment.centroid()),
                Some(segment.cell),
                "cell {:?}",
                segment.cell
            );
        }
    }

    #[test]
    fn test_rim_clamps_to_outer_ring() {
        let layout = WheelLayout::default();
        let rim = layout.center.polar_offset(layout.max_radius, 0.0);
        assert_eq!(layout.locate(rim).map(|c| c.shade_index), Some(7));

        let straight_down = Point::new(layout.center.x, layout.center.y + layout.max_radius);
        assert_eq!(layout.locate(straight_down), Some(WheelCell::new(10, 7)));
    }

    #[test]
    fn test_outside_disk_is_none() {
        let layout = WheelLayout::default();
        for angle in [0.0, 45.0, 200.0, 359.0] {
            let p = layout.center.polar_offset(layout.max_radius + 0.001, angle);
            assert_eq!(layout.locate(p), None);
        }
        assert_eq!(layout.locate(Point::new(0.0, 0.0)), None);
        assert_eq!(layout.locate(Point::new(f64::NAN, 10.0)), None);
    }

    #[test]
    fn test_hue_wraps_at_360() {
        let layout = WheelLayout::default();
        assert_eq!(layout.hue_index_at(0.0), 0);
        assert_eq!(layout.hue_index_at(360.0), 0);
        assert_eq!(layout.hue_index_at(-1.0), 19);
        assert_eq!(layout.hue_index_at(719.0), 19);
    }

    #[test]
    fn test_up_is_hue_zero() {
        let layout = WheelLayout::default();
        let just_right_of_up = layout.center.polar_offset(60.0, -89.0);
        let just_left_of_up = layout.center.polar_offset(60.0, -91.0);
        assert_eq!(layout.locate(just_right_of_up).map(|c| c.hue_index), Some(0));
        assert_eq!(layout.locate(just_left_of_up).map(|c| c.hue_index), Some(19));
    }

    #[test]
    fn test_center_resolves_to_innermost_ring() {
        let layout = WheelLayout::default();
        let cell = layout.locate(layout.center).unwrap();
        assert_eq!(cell.shade_index, 0);
    }

    #[test]
    fn test_resolve_first_cell_is_lightest_red() {
        let layout = WheelLayout::default();
        let centroid = layout.segment(WheelCell::new(0, 0)).centroid();
        let (cell, color) = layout.resolve(centroid).unwrap();
        assert_eq!(cell, WheelCell::new(0, 0));
        assert_eq!(color.to_string(), "#FFCCCC");
    }

    #[test]
    fn test_cell_of_color() {
        let layout = WheelLayout::default();
        let cell = WheelCell::new(3, 5);
        assert_eq!(layout.cell_of_color(layout.cell_color(cell)), Some(cell));
        assert_eq!(layout.cell_of_color(HexColor::new(0x12, 0x34, 0x56)), None);
    }

    #[test]
    fn test_svg_path_shapes() {
        let layout = WheelLayout::default();
        let pie = layout.segment(WheelCell::new(0, 0)).svg_path();
        assert!(pie.starts_with("M 175.000 175.000 L 175.000 160.000 A 15.000 15.000 0 0 1"));
        assert!(pie.ends_with(" Z"));
        assert_eq!(pie.matches(" A ").count(), 1);

        let wedge = layout.segment(WheelCell::new(0, 1)).svg_path();
        assert!(wedge.starts_with("M 175.000 160.000 L 175.000 145.000"));
        assert_eq!(wedge.matches(" A ").count(), 2);
        assert!(wedge.contains("A 15.000 15.000 0 0 0"));
    }

    #[test]
    fn test_large_arc_flag_for_wide_sectors() {
        let mut segment = WheelLayout::default().segment(WheelCell::new(0, 2));
        segment.end_angle = segment.start_angle + 270.0;
        assert!(segment.large_arc());
        assert!(segment.svg_path().contains(" 0 1 1 "));
        assert!(!WheelLayout::default().segment(WheelCell::new(0, 2)).large_arc());
    }

    #[test]
    fn test_markers_orbit_outside_the_wheel() {
        let layout = WheelLayout::default();
        let markers = layout.markers();
        assert_eq!(markers.len(), 20);
        let first = &markers[0];
        assert!((first.center.x - 175.0).abs() < 1e-9);
        assert!((first.center.y - 20.0).abs() < 1e-9);
        assert_eq!(first.color.to_string(), "#FF0000");
        for m in &markers {
            assert!((layout.center.distance_to(m.center) - MARKER_RADIUS).abs() < 1e-9);
            assert_eq!(layout.locate(m.center), None);
        }
    }

    #[test]
    fn test_svg_outlines_only_selected_cell() {
        let layout = WheelLayout::default();
        let selected = layout.cell_color(WheelCell::new(2, 3));
        let svg = layout.to_svg(Some(selected));
        assert_eq!(svg.matches("stroke=\"#000\"").count(), 1);
        assert_eq!(svg.matches("<path").count(), 160);
        assert_eq!(svg.matches("<circle").count(), 20);

        let off_grid = layout.to_svg(Some(HexColor::new(1, 2, 3)));
        assert_eq!(off_grid.matches("stroke=\"#000\"").count(), 0);
    }
}
