//! Pixel containers: plain images, mask bit planes, masked images and exposures.
//!
//! Every container carries an origin `(x0, y0)` that places its pixel `(0, 0)`
//! in a shared parent coordinate frame. Local indices are always `usize`
//! offsets from that origin; parent coordinates are `i32`.

mod exposure;
mod mask;
mod masked_image;

use std::ops::{Index, IndexMut};
use std::slice;

pub use exposure::Exposure;
pub use mask::{Mask, MaskPlane, MaskPlanes, make_bit_mask};
pub use masked_image::{MaskedImage, MaskedPixel};

use crate::math::{Dimensions, Region};
use crate::pixel::{MaskPixel, Pixel, VariancePixel};
use crate::validity::{CheckKnownValue, CheckMask, PixelValidity};

/// Narrow 2-D array interface consumed by the coadd operations.
///
/// `pixel` and `set_pixel` take local coordinates, `0..width` and `0..height`.
pub trait PixelArray {
    type Pixel: Copy;

    fn dimensions(&self) -> Dimensions;

    fn origin(&self) -> (i32, i32);

    /// Footprint in parent coordinates.
    fn bbox(&self) -> Region {
        Region::from_origin(self.origin(), self.dimensions())
    }

    fn pixel(&self, x: usize, y: usize) -> Self::Pixel;

    fn set_pixel(&mut self, x: usize, y: usize, value: Self::Pixel);
}

/// Arrays that can be summed into a coadd.
///
/// The validity predicate is fixed by the array kind: plain images test for
/// NaN, masked images test mask bits against the bad pixel mask.
pub trait CoaddArray: PixelArray {
    type Validity: PixelValidity<Self::Pixel>;

    fn validity(bad_pixel_mask: MaskPixel) -> Self::Validity;

    /// `dest += src * weight`. Compound pixels scale variance by `weight²`
    /// and leave the destination mask alone.
    fn add_weighted(dest: &mut Self::Pixel, src: Self::Pixel, weight: f64);
}

/// Plain single-channel image with an origin in the parent frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    pixels: Vec<T>,
    width: usize,
    height: usize,
    x0: i32,
    y0: i32,
}

impl<T> Image<T> {
    /// Image at origin `(0, 0)` built from row-major pixels.
    pub fn new(width: usize, height: usize, pixels: Vec<T>) -> Self {
        assert_eq!(
            pixels.len(),
            width * height,
            "pixels length must equal width * height"
        );
        Self {
            pixels,
            width,
            height,
            x0: 0,
            y0: 0,
        }
    }

    pub fn with_origin(mut self, x0: i32, y0: i32) -> Self {
        self.set_origin(x0, y0);
        self
    }

    /// Planes borrowed out of a [`MaskedImage`] keep their origin; owners
    /// use [`with_origin`](Self::with_origin).
    pub(crate) fn set_origin(&mut self, x0: i32, y0: i32) {
        self.x0 = x0;
        self.y0 = y0;
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn x0(&self) -> i32 {
        self.x0
    }

    #[inline]
    pub fn y0(&self) -> i32 {
        self.y0
    }

    #[inline]
    pub fn origin(&self) -> (i32, i32) {
        (self.x0, self.y0)
    }

    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    #[inline]
    pub fn bbox(&self) -> Region {
        Region::new(self.x0, self.y0, self.width, self.height)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> &T {
        debug_assert!(x < self.width && y < self.height);
        &self.pixels[y * self.width + x]
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut T {
        debug_assert!(x < self.width && y < self.height);
        &mut self.pixels[y * self.width + x]
    }

    /// Pixel at parent coordinates, `None` outside the footprint.
    pub fn at_parent(&self, x: i32, y: i32) -> Option<&T> {
        if !self.bbox().contains(x, y) {
            return None;
        }
        Some(self.get((x - self.x0) as usize, (y - self.y0) as usize))
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[T] {
        let start = y * self.width;
        &self.pixels[start..start + self.width]
    }

    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        let start = y * self.width;
        &mut self.pixels[start..start + self.width]
    }

    #[inline]
    pub fn pixels(&self) -> &[T] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [T] {
        &mut self.pixels
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.pixels.iter()
    }

    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.pixels
    }
}

impl<T: Default + Clone> Image<T> {
    pub fn new_default(width: usize, height: usize) -> Self {
        Self::new(width, height, vec![T::default(); width * height])
    }

    /// Zeroed image covering `region`, origin included.
    pub fn from_region(region: Region) -> Self {
        let (x0, y0) = region.origin();
        Self::new_default(region.width(), region.height()).with_origin(x0, y0)
    }
}

impl<T: Clone> Image<T> {
    pub fn new_filled(width: usize, height: usize, value: T) -> Self {
        Self::new(width, height, vec![value; width * height])
    }

    #[inline]
    pub fn fill(&mut self, value: T) {
        self.pixels.fill(value);
    }
}

impl<T> Index<(usize, usize)> for Image<T> {
    type Output = T;

    #[inline]
    fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
        &self.pixels[y * self.width + x]
    }
}

impl<T> IndexMut<(usize, usize)> for Image<T> {
    #[inline]
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut Self::Output {
        &mut self.pixels[y * self.width + x]
    }
}

impl<'a, T> IntoIterator for &'a Image<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.pixels.iter()
    }
}

impl<T: Copy> PixelArray for Image<T> {
    type Pixel = T;

    #[inline]
    fn dimensions(&self) -> Dimensions {
        Image::dimensions(self)
    }

    #[inline]
    fn origin(&self) -> (i32, i32) {
        Image::origin(self)
    }

    #[inline]
    fn pixel(&self, x: usize, y: usize) -> T {
        *self.get(x, y)
    }

    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, value: T) {
        *self.get_mut(x, y) = value;
    }
}

impl<T: Pixel> CoaddArray for Image<T> {
    type Validity = CheckKnownValue;

    #[inline]
    fn validity(_bad_pixel_mask: MaskPixel) -> CheckKnownValue {
        CheckKnownValue
    }

    #[inline]
    fn add_weighted(dest: &mut T, src: T, weight: f64) {
        *dest = T::from_f64(dest.to_f64() + src.to_f64() * weight);
    }
}

impl<T: Pixel> CoaddArray for MaskedImage<T> {
    type Validity = CheckMask;

    #[inline]
    fn validity(bad_pixel_mask: MaskPixel) -> CheckMask {
        CheckMask::new(bad_pixel_mask)
    }

    #[inline]
    fn add_weighted(dest: &mut MaskedPixel<T>, src: MaskedPixel<T>, weight: f64) {
        dest.image = T::from_f64(dest.image.to_f64() + src.image.to_f64() * weight);
        dest.variance =
            (dest.variance as f64 + src.variance as f64 * weight * weight) as VariancePixel;
    }
}
