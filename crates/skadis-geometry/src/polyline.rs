use cavalier_contours::polyline::{PlineOrientation, PlineSource, PlineVertex, Polyline};
use serde::{Deserialize, Serialize};

use crate::bulge::ArcSegment;
use crate::point::Point;

/// Cyclic sequence of point + bulge segments. The last vertex implicitly connects back to
/// the first using the last segment's bulge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedPolyline {
    segments: Vec<ArcSegment>,
    closed: bool,
}

impl ClosedPolyline {
    #[must_use]
    pub fn new(segments: Vec<ArcSegment>) -> Self {
        Self {
            segments,
            closed: true,
        }
    }

    #[must_use]
    pub fn segments(&self) -> &[ArcSegment] {
        &self.segments
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.segments.iter().map(|s| s.point)
    }

    pub fn bulges(&self) -> impl Iterator<Item = f64> + '_ {
        self.segments.iter().map(|s| s.bulge)
    }

    /// Every segment paired with the vertex it ends on, wrapping at the end.
    pub fn edges(&self) -> impl Iterator<Item = (ArcSegment, Point)> + '_ {
        let n = self.segments.len();
        (0..n).map(move |i| (self.segments[i], self.segments[(i + 1) % n].point))
    }

    #[must_use]
    pub fn to_pline(&self) -> Polyline<f64> {
        let mut pl = Polyline::new_closed();
        for seg in &self.segments {
            pl.vertex_data
                .push(PlineVertex::new(seg.point.x, seg.point.y, seg.bulge));
        }
        pl
    }

    /// Signed enclosed area: positive for counter-clockwise traversal.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.to_pline().area()
    }

    #[must_use]
    pub fn orientation(&self) -> PlineOrientation {
        self.to_pline().orientation()
    }

    #[must_use]
    pub fn path_length(&self) -> f64 {
        self.to_pline().path_length()
    }

    /// Axis-aligned bounds including arc bulges, as `(min, max)`.
    #[must_use]
    pub fn extents(&self) -> Option<(Point, Point)> {
        self.to_pline().extents().map(|bb| {
            (
                Point::new(bb.min_x, bb.min_y),
                Point::new(bb.max_x, bb.max_y),
            )
        })
    }
}

impl From<&ClosedPolyline> for Polyline<f64> {
    fn from(value: &ClosedPolyline) -> Self {
        value.to_pline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn unit_square() -> ClosedPolyline {
        ClosedPolyline::new(vec![
            ArcSegment::straight(Point::new(0.0, 0.0)),
            ArcSegment::straight(Point::new(1.0, 0.0)),
            ArcSegment::straight(Point::new(1.0, 1.0)),
            ArcSegment::straight(Point::new(0.0, 1.0)),
        ])
    }

    #[test]
    fn square_area_and_orientation() {
        let sq = unit_square();
        assert!(sq.is_closed());
        assert_abs_diff_eq!(sq.area(), 1.0, epsilon = 1e-12);
        assert_eq!(sq.orientation(), PlineOrientation::CounterClockwise);
        assert_abs_diff_eq!(sq.path_length(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn edges_wrap_to_first_vertex() {
        let sq = unit_square();
        let edges: Vec<_> = sq.edges().collect();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[3].0.point, Point::new(0.0, 1.0));
        assert_eq!(edges[3].1, Point::new(0.0, 0.0));
    }

    #[test]
    fn pline_conversion_keeps_bulges() {
        let pl = ClosedPolyline::new(vec![
            ArcSegment::new(Point::new(-1.0, 0.0), 1.0),
            ArcSegment::new(Point::new(1.0, 0.0), 1.0),
        ])
        .to_pline();
        assert!(pl.is_closed());
        assert_eq!(pl.vertex_count(), 2);
        assert_eq!(pl.at(1).bulge, 1.0);
        assert_abs_diff_eq!(pl.area(), std::f64::consts::PI, epsilon = 1e-9);
    }
}
