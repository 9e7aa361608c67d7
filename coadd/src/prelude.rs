//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use coadd::prelude::*;
//! ```

// Containers and geometry
pub use crate::{Exposure, Image, Mask, MaskPlane, MaskedImage, MaskedPixel, Region};

// Traits needed to call the generic operations
pub use crate::{CoaddArray, Pixel, PixelArray};

// Accumulation primitives
pub use crate::{add_to_coadd, add_to_depth_map, copy_good_pixels, divide, set_coadd_edge_bits};

// Session
pub use crate::{Calib, Coadd, CoaddConfig};
