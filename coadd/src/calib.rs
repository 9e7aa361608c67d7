//! Photometric calibration and zero-point scaling.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::image::Exposure;

/// Default photometric zero point of a coadd, in magnitudes.
pub const DEFAULT_ZERO_POINT: f64 = 27.0;

/// Photometric calibration: the flux of a zero-magnitude source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calib {
    pub flux_mag0: f64,
}

impl Calib {
    pub fn new(flux_mag0: f64) -> Self {
        Self { flux_mag0 }
    }

    /// Calibration whose zero point is `zero_point` magnitudes:
    /// `flux_mag0 = 10^(0.4 * zero_point)`.
    pub fn from_zero_point(zero_point: f64) -> Self {
        Self::new(10f64.powf(0.4 * zero_point))
    }

    /// Flux of a source of magnitude `magnitude`.
    pub fn flux(&self, magnitude: f64) -> f64 {
        self.flux_mag0 * 10f64.powf(-0.4 * magnitude)
    }

    pub fn magnitude(&self, flux: f64) -> f64 {
        -2.5 * (flux / self.flux_mag0).log10()
    }

    pub fn zero_point(&self) -> f64 {
        self.magnitude(1.0)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !self.flux_mag0.is_finite() || self.flux_mag0 <= 0.0 {
            return Err(Error::InvalidCalib {
                flux_mag0: self.flux_mag0,
            });
        }
        Ok(())
    }
}

/// Zero point configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZeroPointConfig {
    pub zero_point: f64,
}

impl Default for ZeroPointConfig {
    fn default() -> Self {
        Self {
            zero_point: DEFAULT_ZERO_POINT,
        }
    }
}

/// Rescales exposures to a common photometric zero point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZeroPointScaler {
    zero_point: f64,
    calib: Calib,
}

impl ZeroPointScaler {
    pub fn new(zero_point: f64) -> Self {
        Self {
            zero_point,
            calib: Calib::from_zero_point(zero_point),
        }
    }

    pub fn from_config(config: &ZeroPointConfig) -> Self {
        Self::new(config.zero_point)
    }

    pub fn zero_point(&self) -> f64 {
        self.zero_point
    }

    /// Calibration of scaled exposures.
    pub fn calib(&self) -> Calib {
        self.calib
    }

    /// Factor that brings pixels calibrated by `calib` to this zero point.
    pub fn compute_scale(&self, calib: &Calib) -> Result<f64> {
        calib.validate()?;
        Ok(1.0 / calib.flux(self.zero_point))
    }

    /// Rescale `exposure` in place to this zero point and replace its
    /// calibration with [`calib`](Self::calib). Returns the factor applied.
    ///
    /// An invalid calibration leaves the exposure untouched.
    pub fn scale_exposure(&self, exposure: &mut Exposure) -> Result<f64> {
        let scale = self.compute_scale(&exposure.calib)?;
        exposure.masked_image.scale(scale);
        exposure.calib = self.calib;
        Ok(scale)
    }
}

impl Default for ZeroPointScaler {
    fn default() -> Self {
        Self::new(DEFAULT_ZERO_POINT)
    }
}
