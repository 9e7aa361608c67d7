//! Example: Coadd synthetic exposures
//!
//! Builds a handful of dithered, pixel-registered exposures with different
//! zero points and noise levels, adds them to a coadd session and reports
//! the normalized result:
//! 1. Load the session configuration (or use defaults)
//! 2. Add each exposure, scaled to the coadd zero point
//! 3. Normalize and count EDGE pixels
//!
//! # Usage
//!
//! ```bash
//! cargo run --example make_coadd -- [config.yaml]
//! ```
//!
//! Set `COADD_LOG_DIR` to also write a rolling log file there.

use std::env;
use std::path::Path;

use anyhow::Context;
use coadd::prelude::*;

const WIDTH: usize = 64;
const HEIGHT: usize = 48;
const SKY_FLUX: f64 = 250.0;

fn main() -> anyhow::Result<()> {
    match env::var_os("COADD_LOG_DIR") {
        Some(dir) => common::log_setup::setup_logging_with_file("info", Path::new(&dir))?,
        None => common::log_setup::setup_logging("info")?,
    }

    let config = match env::args().nth(1) {
        Some(path) => CoaddConfig::from_file(Path::new(&path))?,
        None => CoaddConfig::default(),
    };
    println!("Config: {config:?}");

    let bbox = Region::new(1000, 2000, WIDTH, HEIGHT);
    let mut session = Coadd::from_config(bbox, &config)?;

    // (dx, dy, zero point, variance at the coadd zero point, filter)
    let plan = [
        (0, 0, 27.0, 4.0, "r"),
        (5, -3, 26.5, 6.0, "r"),
        (-7, 4, 27.5, 3.0, "r"),
        (12, 9, 26.0, 9.0, "r"),
    ];

    for (dx, dy, zero_point, variance, filter) in plan {
        let exposure = synthetic_exposure(
            bbox,
            (dx, dy),
            zero_point,
            config.coadd_zero_point,
            variance,
            filter,
        )?;
        let added = session
            .add_exposure(&exposure, 1.0)
            .with_context(|| format!("Failed to add exposure at offset ({dx}, {dy})"))?;
        println!(
            "Added exposure offset ({dx:+}, {dy:+}) zp {zero_point}: overlap {} ({} px), weight {:.4}",
            added.overlap,
            added.overlap.area(),
            added.weight
        );
    }

    let result = session.coadd()?;
    let mask = result.masked_image.mask();
    let edge = mask.plane_bit_mask(MaskPlane::Edge.as_ref())?;

    let covered: Vec<f32> = result
        .masked_image
        .image()
        .iter()
        .zip(mask.iter())
        .filter(|&(_, &m)| m & edge == 0)
        .map(|(&v, _)| v)
        .collect();
    let mean = covered.iter().map(|&v| v as f64).sum::<f64>() / covered.len().max(1) as f64;

    println!("\nCoadd {}:", result.bbox());
    println!("  filter: {}", result.filter.as_deref().unwrap_or("(mixed)"));
    println!("  EDGE pixels: {}", mask.count_set(edge));
    println!("  mean of covered pixels: {mean:.3} (expected {SKY_FLUX})");

    Ok(())
}

/// Constant-sky exposure shifted by `(dx, dy)` and calibrated to `zero_point`,
/// with a saturated column so the bad pixel mask has something to reject.
fn synthetic_exposure(
    bbox: Region,
    (dx, dy): (i32, i32),
    zero_point: f64,
    coadd_zero_point: f64,
    variance: f64,
    filter: &str,
) -> anyhow::Result<Exposure> {
    let calib = Calib::from_zero_point(zero_point);
    let (x0, y0) = bbox.origin();
    let region = Region::new(x0 + dx, y0 + dy, WIDTH, HEIGHT);

    // Counts such that scaling to the coadd zero point gives SKY_FLUX.
    let counts_per_flux = calib.flux(coadd_zero_point);
    let mut masked_image: MaskedImage<f32> = MaskedImage::from_region(region);
    masked_image.fill(MaskedPixel::new(
        (SKY_FLUX * counts_per_flux) as f32,
        0,
        (variance * counts_per_flux * counts_per_flux) as f32,
    ));

    let sat = masked_image.mask().plane_bit_mask(MaskPlane::Sat.as_ref())?;
    let column = (WIDTH / 3 + dx.unsigned_abs() as usize) % WIDTH;
    for y in 0..HEIGHT {
        let mut pixel = masked_image.pixel(column, y);
        pixel.image = f32::MAX;
        pixel.mask |= sat;
        masked_image.set_pixel(column, y, pixel);
    }

    Ok(Exposure::new(masked_image, calib).with_filter(filter))
}
