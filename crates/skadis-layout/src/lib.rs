//! Parametric pegboard layout: a rounded board outline plus a staggered grid of slots,
//! grouped into the layers a drawing emitter consumes.

pub mod config;
pub mod error;
pub mod holes;
pub mod params;

use serde::{Deserialize, Serialize};
use skadis_geometry::ClosedPolyline;
use skadis_geometry::primitives::board_outline;

pub use config::load_parameters;
pub use error::{ConfigError, ParamError};
pub use holes::{HoleCenter, generate_holes, hole_centers};
pub use params::Parameters;

/// Named grouping of polylines for downstream styling. Carries no geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Layer {
    Board,
    Holes,
}

impl Layer {
    pub const ALL: [Layer; 2] = [Layer::Board, Layer::Holes];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Layer::Board => "BOARD",
            Layer::Holes => "HOLES",
        }
    }

    /// AutoCAD colour index: green for the board, red for the holes.
    #[must_use]
    pub fn color_index(self) -> i16 {
        match self {
            Layer::Board => 3,
            Layer::Holes => 1,
        }
    }
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub outline: ClosedPolyline,
    pub holes: Vec<ClosedPolyline>,
}

impl Layout {
    #[must_use]
    pub fn hole_count(&self) -> usize {
        self.holes.len()
    }

    /// Layer groups in emission order: BOARD, then HOLES.
    #[must_use]
    pub fn layers(&self) -> [(Layer, &[ClosedPolyline]); 2] {
        [
            (Layer::Board, std::slice::from_ref(&self.outline)),
            (Layer::Holes, self.holes.as_slice()),
        ]
    }

    /// Every polyline tagged with its layer, in emission order.
    pub fn polylines(&self) -> impl Iterator<Item = (Layer, &ClosedPolyline)> + '_ {
        self.layers()
            .into_iter()
            .flat_map(|(layer, plines)| plines.iter().map(move |p| (layer, p)))
    }
}

/// Outline and holes for one parameter snapshot.
#[must_use]
pub fn generate_layout(params: &Parameters) -> Layout {
    let outline = board_outline(
        params.board_width,
        params.board_height,
        params.corner_radius,
    );
    let holes = generate_holes(params);
    tracing::debug!(
        board_width = params.board_width,
        board_height = params.board_height,
        corner_radius = params.effective_corner_radius(),
        holes = holes.len(),
        "generated layout"
    );
    Layout { outline, holes }
}
