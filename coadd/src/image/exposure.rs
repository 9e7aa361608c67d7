use crate::calib::Calib;
use crate::math::Region;

use super::MaskedImage;

/// Calibrated masked image, the unit a [`Coadd`](crate::Coadd) consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct Exposure {
    pub masked_image: MaskedImage<f32>,
    pub calib: Calib,
    /// Filter band name, if known.
    pub filter: Option<String>,
}

impl Exposure {
    pub fn new(masked_image: MaskedImage<f32>, calib: Calib) -> Self {
        Self {
            masked_image,
            calib,
            filter: None,
        }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn bbox(&self) -> Region {
        self.masked_image.image().bbox()
    }
}
