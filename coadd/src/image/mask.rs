//! Mask bit planes and the plane-name dictionary.

use std::ops::{Deref, DerefMut};

use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use super::Image;
use crate::error::{Error, Result};
use crate::math::Region;
use crate::pixel::MaskPixel;

/// Number of bits available for mask planes.
pub const MAX_MASK_PLANES: usize = MaskPixel::BITS as usize;

/// Standard mask planes, listed in bit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MaskPlane {
    /// Bad detector pixel.
    Bad,
    /// Saturated.
    Sat,
    /// Interpolated.
    Intrp,
    /// Cosmic ray.
    Cr,
    /// No input contributed to this coadd pixel.
    Edge,
    Detected,
    DetectedNegative,
    Suspect,
    NoData,
}

/// Ordered plane-name dictionary; a plane's position is its bit index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskPlanes {
    names: Vec<String>,
}

impl Default for MaskPlanes {
    fn default() -> Self {
        Self {
            names: MaskPlane::iter().map(|plane| plane.to_string()).collect(),
        }
    }
}

impl MaskPlanes {
    /// Dictionary with no planes defined.
    pub fn empty() -> Self {
        Self { names: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn plane_index(&self, name: &str) -> Option<u32> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| idx as u32)
    }

    /// Bit mask of a single named plane.
    pub fn plane_bit_mask(&self, name: &str) -> Result<MaskPixel> {
        self.plane_index(name)
            .map(|idx| 1 << idx)
            .ok_or_else(|| Error::UnknownMaskPlane(name.to_string()))
    }

    /// OR of the bit masks of several named planes.
    pub fn plane_bit_mask_for<S: AsRef<str>>(&self, names: &[S]) -> Result<MaskPixel> {
        names.iter().try_fold(0, |acc, name| {
            Ok(acc | self.plane_bit_mask(name.as_ref())?)
        })
    }

    /// Index of `name`, allocating the next free bit when it is new.
    pub fn add_plane(&mut self, name: &str) -> Result<u32> {
        if let Some(idx) = self.plane_index(name) {
            return Ok(idx);
        }
        if self.names.len() >= MAX_MASK_PLANES {
            return Err(Error::MaskPlanesExhausted(name.to_string()));
        }
        self.names.push(name.to_string());
        Ok((self.names.len() - 1) as u32)
    }

    /// Names of the planes set in `value`, in bit order.
    pub fn interpret(&self, value: MaskPixel) -> Vec<&str> {
        self.names
            .iter()
            .enumerate()
            .filter(|(idx, _)| value & (1 << idx) != 0)
            .map(|(_, name)| name.as_str())
            .collect()
    }
}

/// OR of the named planes' bits, complemented over all 32 bits when `invert`.
pub fn make_bit_mask<S: AsRef<str>>(
    planes: &MaskPlanes,
    names: &[S],
    invert: bool,
) -> Result<MaskPixel> {
    let bits = planes.plane_bit_mask_for(names)?;
    Ok(if invert { !bits } else { bits })
}

/// Bit-plane image paired with the dictionary that names its bits.
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    bits: Image<MaskPixel>,
    planes: MaskPlanes,
}

impl Mask {
    /// Cleared mask at origin `(0, 0)` with the default planes.
    pub fn new(width: usize, height: usize) -> Self {
        Self::from_image(Image::new_default(width, height))
    }

    pub fn from_region(region: Region) -> Self {
        Self::from_image(Image::from_region(region))
    }

    pub fn from_image(bits: Image<MaskPixel>) -> Self {
        Self {
            bits,
            planes: MaskPlanes::default(),
        }
    }

    pub fn with_planes(mut self, planes: MaskPlanes) -> Self {
        self.planes = planes;
        self
    }

    pub fn planes(&self) -> &MaskPlanes {
        &self.planes
    }

    pub fn planes_mut(&mut self) -> &mut MaskPlanes {
        &mut self.planes
    }

    pub fn plane_bit_mask(&self, name: &str) -> Result<MaskPixel> {
        self.planes.plane_bit_mask(name)
    }

    pub fn image(&self) -> &Image<MaskPixel> {
        &self.bits
    }

    pub fn image_mut(&mut self) -> &mut Image<MaskPixel> {
        &mut self.bits
    }

    /// Number of pixels with any of `bits` set.
    pub fn count_set(&self, bits: MaskPixel) -> usize {
        self.bits.iter().filter(|&&v| v & bits != 0).count()
    }
}

impl Deref for Mask {
    type Target = Image<MaskPixel>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.bits
    }
}

impl DerefMut for Mask {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.bits
    }
}
