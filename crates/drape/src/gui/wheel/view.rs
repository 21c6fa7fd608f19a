use super::{SWATCH_BORDER_WIDTH, SWATCH_CORNER_RADIUS};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use palette::{Srgb, Srgba};
use std::f64::consts::PI;
use swatch::color::HexColor;
use swatch::picker::ColorPicker;
use swatch::wheel::{MARKER_STROKE_WIDTH, Marker, SELECTED_STROKE_WIDTH, Segment};

/// The selected wedge is always outlined in black and the hue dots in white,
/// whatever the theme, so they read the same on light and dark backgrounds.
const SELECTION_STROKE: Srgb<f64> = Srgb::new(0.0, 0.0, 0.0);
const MARKER_OUTLINE: Srgb<f64> = Srgb::new(1.0, 1.0, 1.0);

fn set_fixed_source(cr: &Context, color: Srgb<f64>) {
    cr.set_source_rgb(color.red, color.green, color.blue);
}

fn set_theme_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn set_hex_source(cr: &Context, color: HexColor) {
    let rgb = color.to_rgb_f64();
    cr.set_source_rgb(rgb.red, rgb.green, rgb.blue);
}

struct SegmentRenderer<'a> {
    segment: &'a Segment,
}

impl<'a> SegmentRenderer<'a> {
    fn new(segment: &'a Segment) -> Self {
        Self { segment }
    }

    /// Same outline as the SVG path: cairo angles grow clockwise on screen, like the layout's.
    fn trace(&self, cr: &Context) {
        let s = self.segment;
        let (cx, cy) = (s.center.x, s.center.y);
        let (start, end) = (s.start_angle.to_radians(), s.end_angle.to_radians());

        cr.new_path();
        if s.is_pie_slice() {
            cr.move_to(cx, cy);
            cr.arc(cx, cy, s.outer_radius, start, end);
        } else {
            cr.arc(cx, cy, s.outer_radius, start, end);
            cr.arc_negative(cx, cy, s.inner_radius, end, start);
        }
        cr.close_path();
    }

    fn fill(&self, cr: &Context) -> Result<(), cairo::Error> {
        self.trace(cr);
        set_hex_source(cr, self.segment.color);
        cr.fill()
    }

    fn outline(&self, cr: &Context) -> Result<(), cairo::Error> {
        self.trace(cr);
        set_fixed_source(cr, SELECTION_STROKE);
        cr.set_line_width(SELECTED_STROKE_WIDTH);
        cr.stroke()
    }
}

fn draw_marker(cr: &Context, marker: &Marker) -> Result<(), cairo::Error> {
    cr.new_path();
    cr.arc(marker.center.x, marker.center.y, marker.radius, 0.0, 2.0 * PI);
    set_hex_source(cr, marker.color);
    cr.fill_preserve()?;
    set_fixed_source(cr, MARKER_OUTLINE);
    cr.set_line_width(MARKER_STROKE_WIDTH);
    cr.stroke()
}

fn draw_backdrop(cr: &Context, picker: &ColorPicker, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let center = picker.layout().center;
    set_theme_source(cr, colors.wheel_backdrop);
    cr.new_path();
    cr.arc(center.x, center.y, center.x.min(center.y), 0.0, 2.0 * PI);
    cr.fill()
}

/// Wheel, then the selected wedge's outline on top of its neighbours, then the hue markers.
pub fn draw(cr: &Context, picker: &ColorPicker, colors: &ThemeColors) -> Result<(), cairo::Error> {
    draw_backdrop(cr, picker, colors)?;

    let layout = picker.layout();
    let segments = layout.segments();
    for segment in &segments {
        SegmentRenderer::new(segment).fill(cr)?;
    }

    if let Some(cell) = picker.highlighted_cell()
        && let Some(segment) = segments.iter().find(|s| s.cell == cell)
    {
        SegmentRenderer::new(segment).outline(cr)?;
    }

    for marker in layout.markers() {
        draw_marker(cr, &marker)?;
    }
    Ok(())
}

fn rounded_rect(cr: &Context, x: f64, y: f64, width: f64, height: f64, radius: f64) {
    let r = radius.min(width / 2.0).min(height / 2.0);
    cr.new_path();
    cr.arc(x + width - r, y + r, r, -PI / 2.0, 0.0);
    cr.arc(x + width - r, y + height - r, r, 0.0, PI / 2.0);
    cr.arc(x + r, y + height - r, r, PI / 2.0, PI);
    cr.arc(x + r, y + r, r, PI, 1.5 * PI);
    cr.close_path();
}

/// Rounded, bordered block filled with `color`.
pub fn draw_swatch(
    cr: &Context,
    color: HexColor,
    width: f64,
    height: f64,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let inset = SWATCH_BORDER_WIDTH / 2.0;
    rounded_rect(
        cr,
        inset,
        inset,
        width - SWATCH_BORDER_WIDTH,
        height - SWATCH_BORDER_WIDTH,
        SWATCH_CORNER_RADIUS,
    );
    set_hex_source(cr, color);
    cr.fill_preserve()?;
    set_theme_source(cr, colors.swatch_border);
    cr.set_line_width(SWATCH_BORDER_WIDTH);
    cr.stroke()
}

#[cfg(test)]
mod tests {
    use super::*;
    use swatch::wheel::{WheelCell, WheelLayout};

    fn pixel(surface: &mut cairo::ImageSurface, x: usize, y: usize) -> (u8, u8, u8) {
        let stride = surface.stride() as usize;
        let data = surface.data().unwrap();
        // ARGB32 words are native-endian: B, G, R, A in memory on little endian
        let i = y * stride + x * 4;
        (data[i + 2], data[i + 1], data[i])
    }

    fn is_near(actual: (u8, u8, u8), expected: (u8, u8, u8)) -> bool {
        let close = |a: u8, b: u8| a.abs_diff(b) <= 16;
        close(actual.0, expected.0) && close(actual.1, expected.1) && close(actual.2, expected.2)
    }

    #[test]
    fn test_marker_outline_is_white_on_a_dark_theme() {
        let mut surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 350, 350).unwrap();
        let dark_theme = ThemeColors {
            wheel_backdrop: Srgba::new(0.1, 0.1, 0.1, 1.0),
            swatch_border: Srgba::new(0.9, 0.9, 0.9, 1.0),
        };
        {
            let cr = Context::new(&surface).unwrap();
            draw(&cr, &ColorPicker::new(WheelLayout::default()), &dark_theme).unwrap();
        }
        surface.flush();

        // first marker is centered at (175, 20) with radius 16; its 2px outline spans y 3..5
        let outline = pixel(&mut surface, 175, 4);
        assert!(is_near(outline, (255, 255, 255)), "{outline:?}");
    }

    #[test]
    fn test_selection_outline_is_black() {
        let segment = WheelLayout::default().segment(WheelCell::new(0, 7));
        let mut surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 350, 350).unwrap();
        {
            let cr = Context::new(&surface).unwrap();
            cr.set_source_rgb(1.0, 1.0, 1.0);
            cr.paint().unwrap();
            SegmentRenderer::new(&segment).outline(&cr).unwrap();
        }
        surface.flush();

        // outer rim of the wedge just right of straight up
        let rim = pixel(&mut surface, 176, 55);
        assert!(is_near(rim, (0, 0, 0)), "{rim:?}");
        let inside = pixel(&mut surface, 190, 80);
        assert!(is_near(inside, (255, 255, 255)), "{inside:?}");
    }
}
