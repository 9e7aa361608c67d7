//! Testing utilities for coadd.

#![allow(dead_code)]

use crate::calib::Calib;
use crate::image::{Exposure, MaskedImage, MaskedPixel};
use crate::math::Region;

/// Initialize tracing subscriber for tests.
/// Safe to call multiple times - will only initialize once.
/// Respects RUST_LOG env var, defaults to "info".
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Exposure covering `region` with a constant value and variance and no
/// mask bits set, calibrated to `zero_point`.
pub fn uniform_exposure(region: Region, value: f32, variance: f32, zero_point: f64) -> Exposure {
    let mut masked_image = MaskedImage::from_region(region);
    masked_image.fill(MaskedPixel::new(value, 0, variance));
    Exposure::new(masked_image, Calib::from_zero_point(zero_point))
}

/// Relative comparison for values that went through `f32` storage.
pub fn assert_close(actual: f64, expected: f64, rel_tol: f64) {
    let scale = expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= rel_tol * scale,
        "expected {expected}, got {actual} (rel_tol {rel_tol})"
    );
}
