//! Point + bulge segment encoding.
//!
//! A segment starts at `point` and runs to the next vertex of its polyline. The bulge is
//! `tan(θ/4)` for an arc of included angle `θ`: zero is a straight line, positive curves
//! counter-clockwise relative to the direction of travel, negative clockwise.

use std::f64::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

use crate::point::Point;

/// Rotational sense of an arc segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    CounterClockwise,
    Clockwise,
}

impl Direction {
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Direction::CounterClockwise => 1.0,
            Direction::Clockwise => -1.0,
        }
    }
}

/// Bulge for a 90° counter-clockwise arc, `tan(π/8)`.
#[must_use]
pub fn quarter_turn_bulge() -> f64 {
    bulge_for_sweep(FRAC_PI_2, Direction::CounterClockwise)
}

/// Bulge for a 180° arc in `direction`, `±tan(π/4)`.
#[must_use]
pub fn half_turn_bulge(direction: Direction) -> f64 {
    bulge_for_sweep(PI, direction)
}

/// Bulge for an arc of included angle `sweep` (radians).
#[must_use]
pub fn bulge_for_sweep(sweep: f64, direction: Direction) -> f64 {
    direction.sign() * (sweep / 4.0).tan()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcSegment {
    pub point: Point,
    pub bulge: f64,
}

impl ArcSegment {
    #[must_use]
    pub fn new(point: Point, bulge: f64) -> Self {
        Self { point, bulge }
    }

    #[must_use]
    pub fn straight(point: Point) -> Self {
        Self::new(point, 0.0)
    }

    /// Arc segment sweeping `sweep` radians in `direction` towards the next vertex.
    #[must_use]
    pub fn arc(point: Point, sweep: f64, direction: Direction) -> Self {
        Self::new(point, bulge_for_sweep(sweep, direction))
    }

    #[must_use]
    pub fn is_straight(&self) -> bool {
        self.bulge == 0.0
    }

    /// Signed included angle in radians, `4·atan(bulge)`.
    #[must_use]
    pub fn sweep_angle(&self) -> f64 {
        4.0 * self.bulge.atan()
    }

    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        if self.bulge > 0.0 {
            Some(Direction::CounterClockwise)
        } else if self.bulge < 0.0 {
            Some(Direction::Clockwise)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn straight_segment_has_zero_bulge() {
        let seg = ArcSegment::straight(Point::new(3.0, 4.0));
        assert_eq!(seg.bulge, 0.0);
        assert!(seg.is_straight());
        assert_eq!(seg.direction(), None);
    }

    #[test]
    fn quarter_turn_matches_tan_pi_over_8() {
        assert_eq!(quarter_turn_bulge(), (PI / 8.0).tan());
        let seg = ArcSegment::arc(Point::default(), FRAC_PI_2, Direction::CounterClockwise);
        assert_eq!(seg.bulge, (PI / 8.0).tan());
        assert_eq!(seg.direction(), Some(Direction::CounterClockwise));
    }

    #[test]
    fn clockwise_half_turn_is_negative_tan_pi_over_4() {
        assert_eq!(half_turn_bulge(Direction::Clockwise), -(PI / 4.0).tan());
        assert_abs_diff_eq!(half_turn_bulge(Direction::Clockwise), -1.0, epsilon = 1e-12);
        let seg = ArcSegment::arc(Point::default(), PI, Direction::Clockwise);
        assert_eq!(seg.direction(), Some(Direction::Clockwise));
    }

    #[test]
    fn sweep_angle_recovers_included_angle() {
        let seg = ArcSegment::arc(Point::default(), FRAC_PI_2, Direction::Clockwise);
        assert_abs_diff_eq!(seg.sweep_angle(), -FRAC_PI_2, epsilon = 1e-12);
        let seg = ArcSegment::arc(Point::default(), PI, Direction::CounterClockwise);
        assert_abs_diff_eq!(seg.sweep_angle(), PI, epsilon = 1e-12);
    }
}
