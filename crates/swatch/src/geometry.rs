use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from `self`, `degrees` clockwise from the +x axis (screen coordinates).
    pub fn polar_offset(self, radius: f64, degrees: f64) -> Self {
        let rad = degrees.to_radians();
        Self::new(self.x + radius * rad.cos(), self.y + radius * rad.sin())
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Screen angle of `other` around `self` in degrees, in (-180, 180].
    pub fn angle_to(self, other: Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x).to_degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_polar_offset_up_is_negative_y() {
        let p = Point::new(175.0, 175.0).polar_offset(100.0, -90.0);
        assert!(close(p.x, 175.0));
        assert!(close(p.y, 75.0));
    }

    #[test]
    fn test_angle_and_distance_invert_polar_offset() {
        let center = Point::new(10.0, -4.0);
        let p = center.polar_offset(42.0, 135.0);
        assert!(close(center.distance_to(p), 42.0));
        assert!(close(center.angle_to(p), 135.0));
    }
}
