//! Pixel accumulation primitives.
//!
//! All operations work in place on caller-owned arrays and never allocate
//! or resize them. Overlaps are computed in parent coordinates, so arrays
//! with different origins are clipped rather than rejected.

mod add_to_coadd;
mod copy_good_pixels;
mod divide;
mod edge_bits;

pub use add_to_coadd::{add_to_coadd, add_to_depth_map};
pub use copy_good_pixels::copy_good_pixels;
pub use divide::divide;
pub use edge_bits::set_coadd_edge_bits;
