use serde::{Deserialize, Serialize};

/// A location in board space: millimetres, origin at the bottom-left corner, y up.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Returns this point moved by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(1.0, 1.0);
        let b = Point::new(4.0, 5.0);
        assert_abs_diff_eq!(a.distance_to(b), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn offset_moves_both_axes() {
        let p = Point::new(10.0, 5.0).offset(-2.5, 7.5);
        assert_abs_diff_eq!(p.x, 7.5, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 12.5, epsilon = 1e-12);
    }
}
