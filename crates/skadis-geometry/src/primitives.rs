use crate::bulge::{ArcSegment, Direction, half_turn_bulge, quarter_turn_bulge};
use crate::point::Point;
use crate::polyline::ClosedPolyline;

/// Clamp a rounding radius to half the smaller side, never below zero.
#[must_use]
pub fn clamp_radius(radius: f64, width: f64, height: f64) -> f64 {
    radius.min(width / 2.0).min(height / 2.0).max(0.0)
}

/// Board outline: a `width` × `height` rectangle anchored at the origin with four rounded
/// corners.
///
/// The polyline is traversed counter-clockwise starting at the end of the top-right corner
/// arc: top edge, top-left arc, left edge, bottom-left arc, bottom edge, bottom-right arc,
/// right edge, top-right arc. It always has 8 vertices; a zero radius collapses each arc
/// onto its corner and every bulge is zero.
#[must_use]
pub fn board_outline(width: f64, height: f64, corner_radius: f64) -> ClosedPolyline {
    let (w, h) = (width, height);
    let r = clamp_radius(corner_radius, w, h);
    let b = if r > 0.0 { quarter_turn_bulge() } else { 0.0 };

    // Bulge lives on the vertex that starts the arc.
    let pts: [(f64, f64, f64); 8] = [
        (w - r, h, 0.0), // top edge
        (r, h, b),       // top-left arc
        (0.0, h - r, 0.0),
        (0.0, r, b), // bottom-left arc
        (r, 0.0, 0.0),
        (w - r, 0.0, b), // bottom-right arc
        (w, r, 0.0),
        (w, h - r, b), // top-right arc, back to start
    ];

    ClosedPolyline::new(
        pts.into_iter()
            .map(|(x, y, bulge)| ArcSegment::new(Point::new(x, y), bulge))
            .collect(),
    )
}

/// Vertical slot centred on `center`: 180° arcs across the top and bottom joined by
/// straight sides at `x ± radius`.
///
/// Vertex order is top-left, top-right, bottom-right, bottom-left. Both arcs carry a
/// clockwise half-turn bulge so they swing away from the slot centre.
#[must_use]
pub fn capsule(center: Point, width: f64, height: f64, radius: f64) -> ClosedPolyline {
    let r = clamp_radius(radius, width, height);
    let arc = if r > 0.0 {
        half_turn_bulge(Direction::Clockwise)
    } else {
        0.0
    };

    let top = center.y + height / 2.0 - r;
    let bottom = center.y - height / 2.0 + r;
    let left = center.x - r;
    let right = center.x + r;

    ClosedPolyline::new(vec![
        ArcSegment::new(Point::new(left, top), arc),
        ArcSegment::straight(Point::new(right, top)),
        ArcSegment::new(Point::new(right, bottom), arc),
        ArcSegment::straight(Point::new(left, bottom)),
    ])
}
