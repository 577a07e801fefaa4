//! Design parameters for a flow straightener.

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// Smallest holes-across value the input form accepts.
pub const HOLES_ACROSS_MIN: u32 = 1;
/// Largest holes-across value the input form accepts.
pub const HOLES_ACROSS_MAX: u32 = 200;

/// Input to the hex-pack layout.
///
/// Lengths share one unit, chosen by the caller. Deserializes from a
/// camelCase object; missing fields fall back to [`Default`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutParameters {
    /// Outer diameter of the disk.
    pub disk_diameter: f64,
    /// Solid border kept between the hole field and the disk edge.
    pub perimeter_ring: f64,
    /// Wall thickness left between adjacent holes.
    pub ligament: f64,
    /// Number of holes spanning the widest row.
    pub holes_across: u32,
    /// Extrusion depth of the part. Not used by the layout itself.
    pub part_thickness: f64,
}

impl Default for LayoutParameters {
    /// 60 mm disk, 2 mm ring, 1 mm ligament, 6 holes across, 8 mm thick.
    fn default() -> Self {
        Self {
            disk_diameter: 60.0,
            perimeter_ring: 2.0,
            ligament: 1.0,
            holes_across: 6,
            part_thickness: 8.0,
        }
    }
}

impl LayoutParameters {
    /// Checks every field against its allowed range.
    ///
    /// A perimeter ring wider than the disk radius is not rejected here; the
    /// layout reports it as [`LayoutError::NonPositiveHoleDiameter`] or
    /// [`LayoutError::RingTooLarge`].
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidParameter`] naming the first offending field.
    pub fn validate(&self) -> Result<(), LayoutError> {
        require_positive("disk diameter", self.disk_diameter)?;
        require_non_negative("perimeter ring", self.perimeter_ring)?;
        require_non_negative("ligament", self.ligament)?;
        require_positive("part thickness", self.part_thickness)?;
        if self.holes_across < HOLES_ACROSS_MIN {
            return Err(LayoutError::InvalidParameter(format!(
                "holes across must be at least {HOLES_ACROSS_MIN}, got {}",
                self.holes_across
            )));
        }
        Ok(())
    }

    /// Checks the holes-across value against the form's spinner range.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidParameter`] when outside
    /// `HOLES_ACROSS_MIN..=HOLES_ACROSS_MAX`.
    pub fn validate_form_range(&self) -> Result<(), LayoutError> {
        if (HOLES_ACROSS_MIN..=HOLES_ACROSS_MAX).contains(&self.holes_across) {
            Ok(())
        } else {
            Err(LayoutError::InvalidParameter(format!(
                "holes across must be within {HOLES_ACROSS_MIN}..={HOLES_ACROSS_MAX}, got {}",
                self.holes_across
            )))
        }
    }
}

fn require_positive(name: &str, value: f64) -> Result<(), LayoutError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidParameter(format!(
            "{name} must be a positive finite length, got {value}"
        )))
    }
}

fn require_non_negative(name: &str, value: f64) -> Result<(), LayoutError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidParameter(format!(
            "{name} must be a non-negative finite length, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = LayoutParameters::default();
        assert!(params.validate().is_ok());
        assert!(params.validate_form_range().is_ok());
        assert_eq!(params.holes_across, 6);
    }

    #[test]
    fn zero_disk_diameter_rejected() {
        let params = LayoutParameters {
            disk_diameter: 0.0,
            ..LayoutParameters::default()
        };
        let err = params.validate();
        assert!(
            matches!(err, Err(LayoutError::InvalidParameter(ref msg)) if msg.contains("disk diameter")),
            "got {err:?}"
        );
    }

    #[test]
    fn negative_ring_rejected() {
        let params = LayoutParameters {
            perimeter_ring: -0.5,
            ..LayoutParameters::default()
        };
        assert!(matches!(
            params.validate(),
            Err(LayoutError::InvalidParameter(_))
        ));
    }

    #[test]
    fn nan_ligament_rejected() {
        let params = LayoutParameters {
            ligament: f64::NAN,
            ..LayoutParameters::default()
        };
        assert!(matches!(
            params.validate(),
            Err(LayoutError::InvalidParameter(_))
        ));
    }

    #[test]
    fn zero_ring_and_ligament_accepted() {
        let params = LayoutParameters {
            perimeter_ring: 0.0,
            ligament: 0.0,
            ..LayoutParameters::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn zero_holes_across_rejected() {
        let params = LayoutParameters {
            holes_across: 0,
            ..LayoutParameters::default()
        };
        assert!(params.validate().is_err());
        assert!(params.validate_form_range().is_err());
    }

    #[test]
    fn form_range_caps_holes_across() {
        let params = LayoutParameters {
            holes_across: HOLES_ACROSS_MAX + 1,
            ..LayoutParameters::default()
        };
        assert!(params.validate().is_ok());
        assert!(params.validate_form_range().is_err());
    }

    #[test]
    fn non_positive_thickness_rejected() {
        let params = LayoutParameters {
            part_thickness: 0.0,
            ..LayoutParameters::default()
        };
        assert!(params.validate().is_err());
    }
}
