//! Hex-packed hole layout for a flow-straightener disk.

pub mod classify;
pub mod hexpack;
pub mod params;

pub use classify::*;
pub use hexpack::*;
pub use params::*;
