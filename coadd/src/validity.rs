//! Pixel validity predicates.
//!
//! A predicate is chosen once per call from the array kind (see
//! [`CoaddArray::Validity`](crate::CoaddArray::Validity)) and applied to every
//! pixel of the overlap.

use crate::image::MaskedPixel;
use crate::pixel::{MaskPixel, Pixel};

/// Decides whether a source pixel contributes.
pub trait PixelValidity<P> {
    fn is_valid(&self, pixel: &P) -> bool;
}

/// Good unless NaN. Infinities are good; integer pixels always are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckKnownValue;

impl<T: Pixel> PixelValidity<T> for CheckKnownValue {
    #[inline]
    fn is_valid(&self, pixel: &T) -> bool {
        !pixel.is_nan()
    }
}

/// Good when no bit of `bad_pixel_mask` is set in the pixel's mask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckMask {
    bad_pixel_mask: MaskPixel,
}

impl CheckMask {
    pub fn new(bad_pixel_mask: MaskPixel) -> Self {
        Self { bad_pixel_mask }
    }

    pub fn bad_pixel_mask(&self) -> MaskPixel {
        self.bad_pixel_mask
    }
}

impl<T> PixelValidity<MaskedPixel<T>> for CheckMask {
    #[inline]
    fn is_valid(&self, pixel: &MaskedPixel<T>) -> bool {
        pixel.mask & self.bad_pixel_mask == 0
    }
}
