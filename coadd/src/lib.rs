//! Coadd - accumulation of registered astronomical exposures.
//!
//! This library sums overlapping, pixel-registered exposures into a coadd:
//! - Weighted accumulation into a coadd plus weight or depth map
//! - Validity-filtered copies between arrays
//! - EDGE marking of pixels no input covered
//! - Normalization by the weight map
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use coadd::{Image, Region, add_to_coadd, set_coadd_edge_bits, Mask};
//!
//! let mut sum: Image<f64> = Image::from_region(Region::new(0, 0, 64, 64));
//! let mut weights: Image<f64> = Image::from_region(Region::new(0, 0, 64, 64));
//!
//! for input in &inputs {
//!     add_to_coadd(&mut sum, &mut weights, input, 0, 1.0)?;
//! }
//!
//! let mut mask = Mask::new(64, 64);
//! set_coadd_edge_bits(&mut mask, &weights)?;
//! ```

pub mod calib;
mod error;
mod image;
pub(crate) mod math;
mod ops;
mod pixel;
mod session;
mod validity;

#[cfg(test)]
pub mod testing;

pub mod prelude;

// ============================================================================
// Errors
// ============================================================================

pub use error::{Error, Result};

// ============================================================================
// Pixel types and geometry
// ============================================================================

pub use math::{Dimensions, Region};
pub use pixel::{MaskPixel, Pixel, VariancePixel};

// ============================================================================
// Containers
// ============================================================================

pub use image::{
    CoaddArray, Exposure, Image, Mask, MaskPlane, MaskPlanes, MaskedImage, MaskedPixel,
    PixelArray, make_bit_mask,
};

// ============================================================================
// Validity predicates
// ============================================================================

pub use validity::{CheckKnownValue, CheckMask, PixelValidity};

// ============================================================================
// Accumulation primitives
// ============================================================================

pub use ops::{add_to_coadd, add_to_depth_map, copy_good_pixels, divide, set_coadd_edge_bits};

// ============================================================================
// Calibration and session
// ============================================================================

pub use calib::{Calib, ZeroPointConfig, ZeroPointScaler};
pub use session::{AddedExposure, Coadd, CoaddConfig};
