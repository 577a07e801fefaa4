//! Error types for the layout computation and preview tessellation.

use thiserror::Error;

/// Errors that make a requested flow-straightener layout infeasible.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// A design parameter is outside its allowed range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Ring, ligament and hole count leave no room for holes across the disk.
    #[error(
        "inputs produce non-positive hole diameter ({hole_diameter}); \
         reduce holes across, perimeter ring or ligament"
    )]
    NonPositiveHoleDiameter {
        /// The derived hole diameter.
        hole_diameter: f64,
    },

    /// The perimeter ring leaves no room for a hole center.
    #[error(
        "perimeter ring too large for the given disk and hole size \
         (max center radius {max_center_radius})"
    )]
    RingTooLarge {
        /// The derived maximum center radius.
        max_center_radius: f64,
    },

    /// The lattice places no center inside the usable area.
    #[error("no holes fit with the chosen parameters")]
    NoHolesFit,

    /// None of the measured face regions is small enough to be a hole.
    #[error("no valid hole regions found among {region_count} region(s)")]
    NoHoleRegions {
        /// Number of regions that were classified.
        region_count: usize,
    },
}

/// Errors that can occur while tessellating the preview geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// A geometry operation produced degenerate output.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// A face region could not be triangulated.
    #[error("region error: {0}")]
    RegionError(String),
}
