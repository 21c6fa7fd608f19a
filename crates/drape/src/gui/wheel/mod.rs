pub mod view;

pub use view::{draw, draw_swatch};

/// Edge length of the square drawing area hosting the wheel.
pub const CANVAS_SIZE: i32 = swatch::wheel::CANVAS_SIZE as i32;
pub const SWATCH_WIDTH: i32 = 250;
pub const SWATCH_HEIGHT: i32 = 60;
pub const SWATCH_CORNER_RADIUS: f64 = 15.0;
pub const SWATCH_BORDER_WIDTH: f64 = 3.0;
