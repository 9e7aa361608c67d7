//! Coadd session configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calib::DEFAULT_ZERO_POINT;

/// Parameters of a [`Coadd`](super::Coadd) session.
///
/// Missing fields take their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoaddConfig {
    /// Mask planes that exclude a pixel from the coadd.
    pub bad_mask_planes: Vec<String>,
    /// Photometric zero point every exposure is scaled to.
    pub coadd_zero_point: f64,
    /// Clipping threshold, in standard deviations, for the mean variance
    /// used to weight each exposure.
    pub num_sigma_clip: f64,
    /// Clipping iterations for the mean variance.
    pub num_iter: u32,
}

impl Default for CoaddConfig {
    fn default() -> Self {
        Self {
            bad_mask_planes: vec!["EDGE".to_string(), "SAT".to_string()],
            coadd_zero_point: DEFAULT_ZERO_POINT,
            num_sigma_clip: 3.0,
            num_iter: 2,
        }
    }
}

impl CoaddConfig {
    /// Load from a YAML or JSON file, chosen by extension.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let config: Self = common::serde::load_file(path)?;
        config.validate();
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        common::serde::save_file(self, path)
    }

    /// Panics on values no session can work with.
    pub fn validate(&self) {
        assert!(
            self.coadd_zero_point.is_finite(),
            "Coadd zero point must be finite"
        );
        assert!(self.num_sigma_clip > 0.0, "Sigma clip must be positive");
    }
}
