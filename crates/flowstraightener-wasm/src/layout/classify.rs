//! Area-based classification of drilled face regions.
//!
//! Drawing the hole circles on the disk face splits it into one region per
//! hole plus the web left between them. A region counts as a hole when its
//! area is at most that of a circle 1.2x the hole radius, which tolerates
//! tessellation error while rejecting the much larger web.

use std::f64::consts::PI;

use crate::error::LayoutError;

use super::hexpack::LayoutResult;

/// Radius multiplier of the largest circle whose area still counts as a hole.
pub const HOLE_AREA_RADIUS_FACTOR: f64 = 1.2;

/// Largest region area classified as a hole for `hole_radius`.
pub fn hole_area_threshold(hole_radius: f64) -> f64 {
    let r = hole_radius * HOLE_AREA_RADIUS_FACTOR;
    PI * r * r
}

/// Returns `true` if a region of `area` is a hole cut-out for `hole_radius`.
///
/// Non-finite areas are never holes.
pub fn is_hole_region(area: f64, hole_radius: f64) -> bool {
    area.is_finite() && area <= hole_area_threshold(hole_radius)
}

/// Returns the indices of `areas` that are hole regions for `layout`.
///
/// # Errors
///
/// Returns [`LayoutError::NoHoleRegions`] if no region qualifies.
pub fn select_hole_regions(layout: &LayoutResult, areas: &[f64]) -> Result<Vec<usize>, LayoutError> {
    let hole_radius = layout.hole_radius();
    let holes: Vec<usize> = areas
        .iter()
        .enumerate()
        .filter(|&(_, &area)| is_hole_region(area, hole_radius))
        .map(|(idx, _)| idx)
        .collect();

    if holes.is_empty() {
        return Err(LayoutError::NoHoleRegions {
            region_count: areas.len(),
        });
    }
    Ok(holes)
}
