//! Staggered slot grid.
//!
//! Columns are placed right to left starting `offset_right` in from the right edge; within
//! a column holes run top to bottom starting `offset_top` below the top edge. Odd columns
//! drop by half a row pitch. A column or row is emitted while the slot's left (bottom)
//! edge is still on the board.

use serde::{Deserialize, Serialize};
use skadis_geometry::primitives::capsule;
use skadis_geometry::{ClosedPolyline, Point};

use crate::params::Parameters;

/// Slack for the on-board guards, in millimetres.
const EDGE_EPS: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoleCenter {
    /// Column index, 0 at the right.
    pub column: usize,
    /// Row index within the column, 0 at the top.
    pub row: usize,
    pub x: f64,
    pub y: f64,
}

impl HoleCenter {
    #[must_use]
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Number of positions `start, start - pitch, start - 2·pitch, ...` whose value stays at or
/// above `margin`.
///
/// An axis whose pitch cannot advance (zero, negative, NaN) yields at most its first
/// position so the grid stays finite.
fn steps_within(start: f64, margin: f64, pitch: f64) -> usize {
    let span = start - margin;
    if !(span >= -EDGE_EPS) {
        return 0;
    }
    if !(pitch > 0.0 && pitch.is_finite()) {
        return 1;
    }
    ((span + EDGE_EPS) / pitch).floor() as usize + 1
}

/// Vertical phase of a column: odd columns sit half a row pitch lower.
fn column_phase(column: usize, v_spacing: f64) -> f64 {
    (column % 2) as f64 * (v_spacing / 2.0)
}

/// Hole centres in generation order: columns right to left, top to bottom within each.
#[must_use]
pub fn hole_centers(params: &Parameters) -> Vec<HoleCenter> {
    let x0 = params.board_width - params.offset_right;
    let columns = steps_within(x0, params.hole_width / 2.0, params.h_spacing);

    let mut out = Vec::new();
    for column in 0..columns {
        let x = x0 - column as f64 * params.h_spacing;
        let y0 = params.board_height - params.offset_top - column_phase(column, params.v_spacing);
        let rows = steps_within(y0, params.hole_height / 2.0, params.v_spacing);
        out.reserve(rows);
        for row in 0..rows {
            out.push(HoleCenter {
                column,
                row,
                x,
                y: y0 - row as f64 * params.v_spacing,
            });
        }
    }
    out
}

/// One capsule per hole centre, in the same order as [`hole_centers`].
#[must_use]
pub fn generate_holes(params: &Parameters) -> Vec<ClosedPolyline> {
    hole_centers(params)
        .into_iter()
        .map(|c| {
            capsule(
                c.point(),
                params.hole_width,
                params.hole_height,
                params.hole_radius,
            )
        })
        .collect()
}
