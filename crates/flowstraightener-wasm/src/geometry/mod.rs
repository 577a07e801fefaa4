//! Preview geometry types and drilled-face tessellation.

pub mod face;
pub mod types;

pub use face::*;
pub use types::*;
