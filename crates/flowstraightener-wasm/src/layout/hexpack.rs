//! Hexagonal hole packing inside a disk.
//!
//! The hole diameter is fixed by the widest row: `holes_across` holes plus
//! the ligaments between them plus the ring on both sides span the disk
//! diameter exactly. A triangular lattice with that pitch is then clipped to
//! the circle that keeps every hole inside the perimeter ring.

use crate::error::LayoutError;
use crate::geometry::Point;

use super::params::LayoutParameters;

/// Slack on the squared containment radius so boundary-exact centers survive
/// floating-point rounding.
pub const CENTER_TOLERANCE: f64 = 1e-9;

/// `√3 / 2`, the height of an equilateral triangle with unit side.
const ROW_PITCH_FACTOR: f64 = 0.866_025_403_784_438_6;

/// Output of the hex-pack layout.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    /// Diameter shared by every hole.
    pub hole_diameter: f64,
    /// Center spacing within a row.
    pub pitch_x: f64,
    /// Center spacing between rows.
    pub pitch_y: f64,
    /// Largest allowed distance from the disk center to a hole center.
    pub max_center_radius: f64,
    /// Hole centers in row-major order (ascending y, then ascending x).
    pub centers: Vec<Point>,
}

impl LayoutResult {
    /// Radius shared by every hole.
    pub fn hole_radius(&self) -> f64 {
        self.hole_diameter / 2.0
    }

    /// Largest number of centers found in a single row.
    pub fn widest_row_len(&self) -> usize {
        let mut widest = 0;
        let mut run = 0;
        let mut row_y: Option<f64> = None;
        for center in &self.centers {
            if row_y.is_some_and(|y| (y - center.y).abs() <= CENTER_TOLERANCE) {
                run += 1;
            } else {
                row_y = Some(center.y);
                run = 1;
            }
            widest = widest.max(run);
        }
        widest
    }
}

/// Computes the hex-packed hole layout for `params`.
///
/// # Errors
///
/// - [`LayoutError::InvalidParameter`] if a field is out of range.
/// - [`LayoutError::NonPositiveHoleDiameter`] if the ring, ligaments and hole
///   count consume the whole diameter.
/// - [`LayoutError::RingTooLarge`] if no hole center can sit inside the ring.
/// - [`LayoutError::NoHolesFit`] if the lattice places no center in the disk.
pub fn compute(params: &LayoutParameters) -> Result<LayoutResult, LayoutError> {
    params.validate()?;

    let across = f64::from(params.holes_across);
    let hole_diameter = 2.0f64.mul_add(
        -params.perimeter_ring,
        (across - 1.0).mul_add(-params.ligament, params.disk_diameter),
    ) / across;
    if hole_diameter <= 0.0 {
        return Err(LayoutError::NonPositiveHoleDiameter { hole_diameter });
    }

    let hole_radius = hole_diameter / 2.0;
    let pitch_x = hole_diameter + params.ligament;
    let pitch_y = ROW_PITCH_FACTOR * pitch_x;

    let max_center_radius = params.disk_diameter / 2.0 - params.perimeter_ring - hole_radius;
    if max_center_radius <= 0.0 {
        return Err(LayoutError::RingTooLarge { max_center_radius });
    }

    let centers = lattice_centers(max_center_radius, pitch_x, pitch_y);
    if centers.is_empty() {
        return Err(LayoutError::NoHolesFit);
    }

    Ok(LayoutResult {
        hole_diameter,
        pitch_x,
        pitch_y,
        max_center_radius,
        centers,
    })
}

/// Enumerates the triangular lattice and keeps centers within `max_radius`.
///
/// Row and column ranges extend one step past the radius so truncation never
/// drops a boundary row.
#[allow(clippy::cast_possible_truncation)]
fn lattice_centers(max_radius: f64, pitch_x: f64, pitch_y: f64) -> Vec<Point> {
    let limit = max_radius.mul_add(max_radius, CENTER_TOLERANCE);
    let max_rows = (max_radius / pitch_y).floor() as i64 + 1;
    let max_cols = ((max_radius + pitch_x) / pitch_x).floor() as i64 + 1;

    let mut centers = Vec::new();
    for j in -max_rows..=max_rows {
        #[allow(clippy::cast_precision_loss)]
        let y = j as f64 * pitch_y;
        let offset = if j % 2 == 0 { 0.0 } else { pitch_x / 2.0 };
        for i in -max_cols..=max_cols {
            #[allow(clippy::cast_precision_loss)]
            let x = (i as f64).mul_add(pitch_x, offset);
            let center = Point::new(x, y);
            if center.norm_squared() <= limit {
                centers.push(center);
            }
        }
    }
    centers
}
