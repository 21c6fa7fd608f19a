use crate::color::HexColor;

pub const HUE_COUNT: usize = 20;
pub const SHADE_COUNT: usize = 8;
pub const SATURATION: f64 = 100.0;
pub const LIGHTEST: f64 = 90.0;
pub const LIGHTNESS_STEP: f64 = 10.0;
pub const MARKER_LIGHTNESS: f64 = 50.0;

/// Evenly spaced base hues starting at 0°: 20 hues gives 0, 18, ..., 342.
pub fn base_hues(count: usize) -> Vec<f64> {
    let step = 360.0 / count as f64;
    (0..count).map(|i| i as f64 * step).collect()
}

pub fn lightness_at(shade_index: usize) -> f64 {
    LIGHTEST - LIGHTNESS_STEP * shade_index as f64
}

/// Shades of one wedge, lightest (center) first.
pub fn shades_for_hue(hue: f64) -> [HexColor; SHADE_COUNT] {
    std::array::from_fn(|i| HexColor::from_hsl(hue, SATURATION, lightness_at(i)))
}

pub fn marker_color(hue: f64) -> HexColor {
    HexColor::from_hsl(hue, SATURATION, MARKER_LIGHTNESS)
}
