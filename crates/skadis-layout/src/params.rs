use serde::{Deserialize, Serialize};
use skadis_geometry::primitives::clamp_radius;

use crate::error::ParamError;

const INCH: f64 = 25.4;

/// Everything a layout is derived from. All lengths are millimetres.
///
/// The value is immutable per generation call; callers that edit parameters interactively
/// should hand each generation its own copy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Parameters {
    pub board_width: f64,
    pub board_height: f64,
    /// Requested board corner rounding; see [`Parameters::effective_corner_radius`].
    pub corner_radius: f64,
    pub hole_width: f64,
    pub hole_height: f64,
    /// Requested slot end rounding; see [`Parameters::effective_hole_radius`].
    pub hole_radius: f64,
    /// Column pitch, centre to centre.
    pub h_spacing: f64,
    /// Row pitch, centre to centre.
    pub v_spacing: f64,
    /// Top board edge to the first hole centre.
    pub offset_top: f64,
    /// Right board edge to the first hole centre.
    pub offset_right: f64,
}

impl Default for Parameters {
    /// A 30 × 22 inch board with the IKEA SKÅDIS slot pattern.
    fn default() -> Self {
        Self::skadis(30.0 * INCH, 22.0 * INCH, 8.0)
    }
}

impl Parameters {
    /// Board of the given size using the fixed SKÅDIS slot geometry and pitch.
    #[must_use]
    pub fn skadis(board_width: f64, board_height: f64, corner_radius: f64) -> Self {
        Self {
            board_width,
            board_height,
            corner_radius,
            hole_width: 5.0,
            hole_height: 15.0,
            hole_radius: 3.0,
            h_spacing: 20.0,
            v_spacing: 40.0,
            offset_top: 40.0,
            offset_right: 20.0,
        }
    }

    /// A fresh default parameter set.
    #[must_use]
    pub fn reset() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn effective_corner_radius(&self) -> f64 {
        clamp_radius(self.corner_radius, self.board_width, self.board_height)
    }

    #[must_use]
    pub fn effective_hole_radius(&self) -> f64 {
        clamp_radius(self.hole_radius, self.hole_width, self.hole_height)
    }

    fn fields(&self) -> [(&'static str, f64); 10] {
        [
            ("board_width", self.board_width),
            ("board_height", self.board_height),
            ("corner_radius", self.corner_radius),
            ("hole_width", self.hole_width),
            ("hole_height", self.hole_height),
            ("hole_radius", self.hole_radius),
            ("h_spacing", self.h_spacing),
            ("v_spacing", self.v_spacing),
            ("offset_top", self.offset_top),
            ("offset_right", self.offset_right),
        ]
    }

    /// Check the input contract of the generators.
    ///
    /// Dimensions and pitches must be strictly positive; radii and offsets may be zero.
    /// Out-of-range radii are not errors, they are clamped during generation.
    pub fn validate(&self) -> Result<(), ParamError> {
        for (field, value) in self.fields() {
            if !value.is_finite() {
                return Err(ParamError::NonFinite { field });
            }
            let may_be_zero = matches!(
                field,
                "corner_radius" | "hole_radius" | "offset_top" | "offset_right"
            );
            if may_be_zero {
                if value < 0.0 {
                    return Err(ParamError::Negative { field, value });
                }
            } else if value <= 0.0 {
                return Err(ParamError::NotPositive { field, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn defaults_are_the_skadis_preset() {
        let p = Parameters::default();
        assert_abs_diff_eq!(p.board_width, 762.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.board_height, 558.8, epsilon = 1e-9);
        assert_eq!(p.corner_radius, 8.0);
        assert_eq!((p.hole_width, p.hole_height, p.hole_radius), (5.0, 15.0, 3.0));
        assert_eq!((p.h_spacing, p.v_spacing), (20.0, 40.0));
        assert_eq!((p.offset_top, p.offset_right), (40.0, 20.0));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn reset_builds_a_fresh_default() {
        let mut edited = Parameters::default();
        edited.board_width = 300.0;
        assert_ne!(edited, Parameters::reset());
        assert_eq!(Parameters::reset(), Parameters::default());
    }

    #[test]
    fn radii_are_clamped_not_rejected() {
        let mut p = Parameters::skadis(200.0, 100.0, 500.0);
        p.hole_radius = 10.0;
        assert!(p.validate().is_ok());
        assert_eq!(p.effective_corner_radius(), 50.0);
        assert_eq!(p.effective_hole_radius(), 2.5);
    }

    #[test]
    fn zero_board_width_is_rejected() {
        let mut p = Parameters::default();
        p.board_width = 0.0;
        assert_eq!(
            p.validate(),
            Err(ParamError::NotPositive {
                field: "board_width",
                value: 0.0
            })
        );
    }

    #[test]
    fn zero_offsets_and_radii_are_allowed() {
        let mut p = Parameters::default();
        p.corner_radius = 0.0;
        p.hole_radius = 0.0;
        p.offset_top = 0.0;
        p.offset_right = 0.0;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn negative_offset_and_nan_spacing_are_rejected() {
        let mut p = Parameters::default();
        p.offset_right = -1.0;
        assert!(matches!(
            p.validate(),
            Err(ParamError::Negative {
                field: "offset_right",
                ..
            })
        ));

        let mut p = Parameters::default();
        p.v_spacing = f64::NAN;
        assert_eq!(
            p.validate(),
            Err(ParamError::NonFinite { field: "v_spacing" })
        );
    }
}
