//! Geometry and statistics helpers.

mod region;
pub(crate) mod statistics;

pub use region::{Dimensions, Region};
