//! Drawing emitters for pegboard layouts: DXF for cutting, SVG for previews.

pub mod dxf;
pub mod dxf_geom;
pub mod svg;

pub use dxf::Dxf;
pub use dxf_geom::{DxfFlavor, DxfGeomError, dxf_from_layout};
pub use svg::{PreviewOptions, SvgError, preview_svg};
