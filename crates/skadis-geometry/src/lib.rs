//! 2D point + bulge geometry for pegboard outlines and slots.

pub mod bulge;
pub mod point;
pub mod polyline;
pub mod primitives;

pub use bulge::{ArcSegment, Direction, half_turn_bulge, quarter_turn_bulge};
pub use cavalier_contours::polyline::{PlineOrientation, PlineVertex, Polyline};
pub use point::Point;
pub use polyline::ClosedPolyline;
