//! Coadd session: zero-point scaling, variance weighting and normalization
//! on top of the accumulation primitives.

mod config;

use std::collections::BTreeSet;

pub use config::CoaddConfig;

use crate::calib::ZeroPointScaler;
use crate::error::{Error, Result};
use crate::image::{Exposure, Image, MaskedImage};
use crate::math::Region;
use crate::math::statistics::sigma_clipped_mean;
use crate::ops::{add_to_coadd, divide, set_coadd_edge_bits};
use crate::pixel::MaskPixel;

/// Outcome of [`Coadd::add_exposure`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AddedExposure {
    /// Coadd pixels the exposure overlapped, in parent coordinates.
    pub overlap: Region,
    /// Weight the exposure was added with.
    pub weight: f64,
}

/// Running weighted sum of calibrated exposures on a fixed parent region.
///
/// Exposures must already be registered to the coadd pixel grid.
#[derive(Debug, Clone)]
pub struct Coadd {
    bbox: Region,
    bad_pixel_mask: MaskPixel,
    scaler: ZeroPointScaler,
    num_sigma_clip: f64,
    num_iter: u32,
    coadd: MaskedImage<f32>,
    weight_map: Image<f32>,
    /// Filters of the added exposures, `None` for an exposure without one.
    filters: BTreeSet<Option<String>>,
}

impl Coadd {
    /// Empty coadd covering `bbox`. Pixels with any of `bad_mask_planes` set
    /// are left out of the sum.
    pub fn new<S: AsRef<str>>(
        bbox: Region,
        bad_mask_planes: &[S],
        coadd_zero_point: f64,
    ) -> Result<Self> {
        let defaults = CoaddConfig::default();
        Self::build(
            bbox,
            bad_mask_planes,
            coadd_zero_point,
            defaults.num_sigma_clip,
            defaults.num_iter,
        )
    }

    pub fn from_config(bbox: Region, config: &CoaddConfig) -> Result<Self> {
        config.validate();
        Self::build(
            bbox,
            config.bad_mask_planes.as_slice(),
            config.coadd_zero_point,
            config.num_sigma_clip,
            config.num_iter,
        )
    }

    fn build<S: AsRef<str>>(
        bbox: Region,
        bad_mask_planes: &[S],
        coadd_zero_point: f64,
        num_sigma_clip: f64,
        num_iter: u32,
    ) -> Result<Self> {
        let coadd: MaskedImage<f32> = MaskedImage::from_region(bbox);
        let bad_pixel_mask = coadd.mask().planes().plane_bit_mask_for(bad_mask_planes)?;

        tracing::debug!(
            %bbox,
            bad_pixel_mask = format_args!("{bad_pixel_mask:#x}"),
            coadd_zero_point,
            "Created coadd"
        );

        Ok(Self {
            bbox,
            bad_pixel_mask,
            scaler: ZeroPointScaler::new(coadd_zero_point),
            num_sigma_clip,
            num_iter,
            coadd,
            weight_map: Image::from_region(bbox),
            filters: BTreeSet::new(),
        })
    }

    /// Scale `exposure` to the coadd zero point and add it with weight
    /// `weight_factor / clipped mean variance`.
    ///
    /// The variance statistic ignores pixels masked by the bad pixel mask.
    /// The input exposure is not modified.
    pub fn add_exposure(
        &mut self,
        exposure: &Exposure,
        weight_factor: f64,
    ) -> Result<AddedExposure> {
        let mut scaled = exposure.clone();
        let scale = self.scaler.scale_exposure(&mut scaled)?;

        let mean_variance = self.clipped_mean_variance(&scaled.masked_image);
        let weight = weight_factor / mean_variance;
        if !weight.is_finite() || weight <= 0.0 {
            return Err(Error::InvalidWeight {
                weight,
                mean_variance,
            });
        }

        self.filters.insert(exposure.filter.clone());

        tracing::info!(
            scale = format_args!("{scale:.3e}"),
            weight = format_args!("{weight:.3e}"),
            "Adding exposure to coadd"
        );

        let overlap = add_to_coadd(
            &mut self.coadd,
            &mut self.weight_map,
            &scaled.masked_image,
            self.bad_pixel_mask,
            weight,
        )?;

        Ok(AddedExposure { overlap, weight })
    }

    /// Normalized coadd of everything added so far.
    ///
    /// Pixels no exposure covered get the EDGE bit and a NaN value. The
    /// filter is set only when every exposure carried the same filter; an
    /// exposure without one counts as a filter of its own.
    pub fn coadd(&self) -> Result<Exposure> {
        let mut masked_image = self.coadd.clone();
        set_coadd_edge_bits(masked_image.mask_mut(), &self.weight_map)?;
        divide(&mut masked_image, &self.weight_map)?;

        let mut exposure = Exposure::new(masked_image, self.scaler.calib());
        if self.filters.len() == 1 {
            exposure.filter = self.filters.first().cloned().flatten();
        }
        Ok(exposure)
    }

    pub fn bbox(&self) -> Region {
        self.bbox
    }

    pub fn bad_pixel_mask(&self) -> MaskPixel {
        self.bad_pixel_mask
    }

    pub fn coadd_zero_point(&self) -> f64 {
        self.scaler.zero_point()
    }

    pub fn weight_map(&self) -> &Image<f32> {
        &self.weight_map
    }

    /// Distinct filter names seen so far, sorted. Exposures without a filter
    /// are not listed.
    pub fn filters(&self) -> impl Iterator<Item = &str> {
        self.filters.iter().flatten().map(String::as_str)
    }

    fn clipped_mean_variance(&self, masked_image: &MaskedImage<f32>) -> f64 {
        let mut values: Vec<f64> = masked_image
            .variance()
            .iter()
            .zip(masked_image.mask().iter())
            .filter(|&(v, &m)| m & self.bad_pixel_mask == 0 && v.is_finite())
            .map(|(&v, _)| v as f64)
            .collect();

        sigma_clipped_mean(&mut values, self.num_sigma_clip, self.num_iter).unwrap_or(f64::NAN)
    }
}

#[cfg(test)]
mod tests;
