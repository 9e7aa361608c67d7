//! Image, mask and variance planes addressed together.

use super::{Image, Mask, PixelArray};
use crate::error::{Result, check_dimensions};
use crate::math::{Dimensions, Region};
use crate::pixel::{MaskPixel, Pixel, VariancePixel};

/// One pixel of a [`MaskedImage`], all channels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MaskedPixel<T> {
    pub image: T,
    pub mask: MaskPixel,
    pub variance: VariancePixel,
}

impl<T> MaskedPixel<T> {
    pub fn new(image: T, mask: MaskPixel, variance: VariancePixel) -> Self {
        Self {
            image,
            mask,
            variance,
        }
    }
}

/// Compound array: image, mask and variance share dimensions and origin.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskedImage<T> {
    image: Image<T>,
    mask: Mask,
    variance: Image<VariancePixel>,
}

impl<T: Pixel> MaskedImage<T> {
    /// Zeroed planes at origin `(0, 0)`.
    pub fn new(width: usize, height: usize) -> Self {
        Self::from_region(Region::new(0, 0, width, height))
    }

    /// Zeroed planes covering `region`.
    pub fn from_region(region: Region) -> Self {
        Self {
            image: Image::from_region(region),
            mask: Mask::from_region(region),
            variance: Image::from_region(region),
        }
    }

    /// Assembles a masked image from existing planes. The mask and variance
    /// take the image's origin.
    pub fn from_planes(
        image: Image<T>,
        mut mask: Mask,
        mut variance: Image<VariancePixel>,
    ) -> Result<Self> {
        check_dimensions("MaskedImage::from_planes", image.dimensions(), mask.dimensions())?;
        check_dimensions(
            "MaskedImage::from_planes",
            image.dimensions(),
            variance.dimensions(),
        )?;
        mask.set_origin(image.x0(), image.y0());
        variance.set_origin(image.x0(), image.y0());
        Ok(Self {
            image,
            mask,
            variance,
        })
    }

    pub fn with_origin(mut self, x0: i32, y0: i32) -> Self {
        self.image.set_origin(x0, y0);
        self.mask.set_origin(x0, y0);
        self.variance.set_origin(x0, y0);
        self
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.image.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.image.height()
    }

    pub fn image(&self) -> &Image<T> {
        &self.image
    }

    /// Pixel access to the image plane. Replacing the plane wholesale must
    /// keep its dimensions and origin, or the channels stop lining up.
    pub fn image_mut(&mut self) -> &mut Image<T> {
        &mut self.image
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Pixel and plane-dictionary access to the mask; same caveat as
    /// [`image_mut`](Self::image_mut).
    pub fn mask_mut(&mut self) -> &mut Mask {
        &mut self.mask
    }

    pub fn variance(&self) -> &Image<VariancePixel> {
        &self.variance
    }

    /// Pixel access to the variance plane; same caveat as
    /// [`image_mut`](Self::image_mut).
    pub fn variance_mut(&mut self) -> &mut Image<VariancePixel> {
        &mut self.variance
    }

    /// Set every pixel of every plane to `value`.
    pub fn fill(&mut self, value: MaskedPixel<T>) {
        self.image.fill(value.image);
        self.mask.fill(value.mask);
        self.variance.fill(value.variance);
    }

    /// Multiply the image by `factor` and the variance by `factor²`.
    pub fn scale(&mut self, factor: f64) {
        for v in self.image.pixels_mut() {
            *v = T::from_f64(v.to_f64() * factor);
        }
        let variance_factor = factor * factor;
        for v in self.variance.pixels_mut() {
            *v = (*v as f64 * variance_factor) as VariancePixel;
        }
    }
}

impl<T: Pixel> PixelArray for MaskedImage<T> {
    type Pixel = MaskedPixel<T>;

    #[inline]
    fn dimensions(&self) -> Dimensions {
        self.image.dimensions()
    }

    #[inline]
    fn origin(&self) -> (i32, i32) {
        (self.image.x0(), self.image.y0())
    }

    #[inline]
    fn pixel(&self, x: usize, y: usize) -> MaskedPixel<T> {
        MaskedPixel {
            image: *self.image.get(x, y),
            mask: *self.mask.get(x, y),
            variance: *self.variance.get(x, y),
        }
    }

    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, value: MaskedPixel<T>) {
        *self.image.get_mut(x, y) = value.image;
        *self.mask.get_mut(x, y) = value.mask;
        *self.variance.get_mut(x, y) = value.variance;
    }
}
