//! Tests for the coadd session.

use super::*;
use crate::calib::Calib;
use crate::image::{MaskPlane, MaskedPixel, PixelArray};
use crate::testing::{assert_close, init_tracing, uniform_exposure};

const EDGE: MaskPixel = 1 << 4;
const SAT: MaskPixel = 1 << 1;

fn full_bbox() -> Region {
    Region::new(0, 0, 4, 4)
}

fn default_coadd(bbox: Region) -> Coadd {
    Coadd::from_config(bbox, &CoaddConfig::default()).unwrap()
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn test_new_resolves_bad_mask_planes() {
    let coadd = Coadd::new(full_bbox(), &["EDGE", "SAT"], 27.0).unwrap();
    assert_eq!(coadd.bad_pixel_mask(), EDGE | SAT);
    assert_eq!(coadd.coadd_zero_point(), 27.0);
    assert_eq!(coadd.bbox(), full_bbox());
    assert_eq!(coadd.weight_map().bbox(), full_bbox());
    assert!(coadd.weight_map().iter().all(|&w| w == 0.0));
    assert_eq!(coadd.filters().count(), 0);
}

#[test]
fn test_new_unknown_plane() {
    let err = Coadd::new(full_bbox(), &["SAT", "GHOST"], 27.0).unwrap_err();
    assert_eq!(err, Error::UnknownMaskPlane("GHOST".to_string()));
}

#[test]
fn test_from_config_bad_planes() {
    let config = CoaddConfig {
        bad_mask_planes: vec!["BAD".to_string(), "CR".to_string()],
        coadd_zero_point: 25.0,
        ..CoaddConfig::default()
    };
    let coadd = Coadd::from_config(Region::new(-3, 7, 2, 2), &config).unwrap();
    assert_eq!(coadd.bad_pixel_mask(), 0b1001);
    assert_eq!(coadd.coadd_zero_point(), 25.0);
    assert_eq!(coadd.weight_map().bbox(), Region::new(-3, 7, 2, 2));
}

// ---------------------------------------------------------------------------
// add_exposure
// ---------------------------------------------------------------------------

#[test]
fn test_weight_is_inverse_mean_variance() {
    let mut coadd = default_coadd(full_bbox());
    let exposure = uniform_exposure(full_bbox(), 10.0, 4.0, 27.0);

    let added = coadd.add_exposure(&exposure, 1.0).unwrap();
    assert_eq!(added.overlap, full_bbox());
    assert_close(added.weight, 0.25, 1e-9);

    let doubled = coadd.add_exposure(&exposure, 2.0).unwrap();
    assert_close(doubled.weight, 0.5, 1e-9);
    assert!(coadd.weight_map().iter().all(|&w| (w - 0.75).abs() < 1e-6));
}

#[test]
fn test_input_exposure_not_modified() {
    let mut coadd = default_coadd(full_bbox());
    let exposure = uniform_exposure(full_bbox(), 10.0, 4.0, 28.0);
    let before = exposure.clone();
    coadd.add_exposure(&exposure, 1.0).unwrap();
    assert_eq!(exposure, before);
}

#[test]
fn test_different_zero_points_give_same_coadd_value() {
    init_tracing();

    let mut coadd = default_coadd(full_bbox());
    let dimmer = 10f64.powf(-0.4);
    let a = uniform_exposure(full_bbox(), 100.0, 4.0, 27.0);
    let b = uniform_exposure(
        full_bbox(),
        (100.0 * dimmer) as f32,
        (4.0 * dimmer * dimmer) as f32,
        26.0,
    );

    let wa = coadd.add_exposure(&a, 1.0).unwrap().weight;
    let wb = coadd.add_exposure(&b, 1.0).unwrap().weight;
    assert_close(wa, wb, 1e-5);

    let result = coadd.coadd().unwrap();
    assert_eq!(result.calib, Calib::from_zero_point(27.0));
    for y in 0..4 {
        for x in 0..4 {
            let p = result.masked_image.pixel(x, y);
            assert_close(p.image as f64, 100.0, 1e-5);
            // Two equal-weight inputs of variance 4 average to variance 2
            assert_close(p.variance as f64, 2.0, 1e-5);
            assert_eq!(p.mask, 0);
        }
    }
}

#[test]
fn test_uncovered_pixels_get_edge_and_nan() {
    let mut coadd = default_coadd(full_bbox());
    let left_half = uniform_exposure(Region::new(0, 0, 2, 4), 5.0, 1.0, 27.0);
    let added = coadd.add_exposure(&left_half, 1.0).unwrap();
    assert_eq!(added.overlap, Region::new(0, 0, 2, 4));

    let result = coadd.coadd().unwrap();
    let edge = result
        .masked_image
        .mask()
        .plane_bit_mask(MaskPlane::Edge.as_ref())
        .unwrap();
    for y in 0..4 {
        for x in 0..4 {
            let p = result.masked_image.pixel(x, y);
            if x < 2 {
                assert_eq!(p.mask & edge, 0, "({x}, {y})");
                assert_close(p.image as f64, 5.0, 1e-6);
            } else {
                assert_eq!(p.mask & edge, edge, "({x}, {y})");
                assert!(p.image.is_nan());
            }
        }
    }
}

#[test]
fn test_coadd_does_not_consume_state() {
    let mut coadd = default_coadd(full_bbox());
    coadd
        .add_exposure(&uniform_exposure(full_bbox(), 3.0, 1.0, 27.0), 1.0)
        .unwrap();
    let first = coadd.coadd().unwrap();
    let second = coadd.coadd().unwrap();
    assert_eq!(first, second);
    // Normalizing works on a copy; the weight map is left as accumulated
    assert_eq!(coadd.weight_map()[(0, 0)], 1.0);
}

#[test]
fn test_bad_pixels_excluded_from_sum_and_weight() {
    let mut coadd = default_coadd(full_bbox());
    let mut exposure = uniform_exposure(full_bbox(), 7.0, 2.0, 27.0);
    let saturated = MaskedPixel::new(1.0e6, SAT, 1.0e9);
    exposure.masked_image.set_pixel(1, 2, saturated);

    let added = coadd.add_exposure(&exposure, 1.0).unwrap();
    // The saturated variance does not leak into the weight
    assert_close(added.weight, 0.5, 1e-9);
    assert_eq!(coadd.weight_map()[(1, 2)], 0.0);

    let result = coadd.coadd().unwrap();
    assert_ne!(result.masked_image.mask()[(1, 2)] & EDGE, 0);
    assert_close(result.masked_image.pixel(0, 0).image as f64, 7.0, 1e-6);
}

#[test]
fn test_variance_outliers_are_clipped() {
    let mut coadd = default_coadd(full_bbox());
    let mut exposure = uniform_exposure(full_bbox(), 1.0, 1.0, 27.0);
    // Slight spread so the clip has a nonzero sigma, plus one wild value
    for x in 0..4 {
        exposure.masked_image.variance_mut()[(x, 0)] = 1.1;
        exposure.masked_image.variance_mut()[(x, 1)] = 0.9;
    }
    exposure.masked_image.variance_mut()[(3, 3)] = 500.0;

    let added = coadd.add_exposure(&exposure, 1.0).unwrap();
    assert_close(added.weight, 1.0, 1e-6);
}

#[test]
fn test_zero_variance_is_invalid_weight() {
    let mut coadd = default_coadd(full_bbox());
    let exposure = uniform_exposure(full_bbox(), 1.0, 0.0, 27.0);
    let err = coadd.add_exposure(&exposure, 1.0).unwrap_err();
    assert!(matches!(err, Error::InvalidWeight { mean_variance, .. } if mean_variance == 0.0));
    assert!(coadd.weight_map().iter().all(|&w| w == 0.0));
}

#[test]
fn test_fully_masked_exposure_is_invalid_weight() {
    let mut coadd = default_coadd(full_bbox());
    let mut exposure = uniform_exposure(full_bbox(), 1.0, 1.0, 27.0);
    exposure.masked_image.mask_mut().fill(SAT);
    let err = coadd.add_exposure(&exposure, 1.0).unwrap_err();
    assert!(matches!(err, Error::InvalidWeight { mean_variance, .. } if mean_variance.is_nan()));
}

#[test]
fn test_invalid_calib() {
    let mut coadd = default_coadd(full_bbox());
    let mut exposure = uniform_exposure(full_bbox(), 1.0, 1.0, 27.0);
    exposure.calib = Calib::new(0.0);
    assert_eq!(
        coadd.add_exposure(&exposure, 1.0),
        Err(Error::InvalidCalib { flux_mag0: 0.0 })
    );
}

#[test]
fn test_disjoint_exposure_adds_nothing() {
    let mut coadd = default_coadd(full_bbox());
    let far = uniform_exposure(Region::new(50, 50, 4, 4), 1.0, 1.0, 27.0);
    let added = coadd.add_exposure(&far, 1.0).unwrap();
    assert!(added.overlap.is_empty());
    assert!(coadd.weight_map().iter().all(|&w| w == 0.0));
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

#[test]
fn test_single_filter_is_kept() {
    let mut coadd = default_coadd(full_bbox());
    for _ in 0..2 {
        let exposure = uniform_exposure(full_bbox(), 1.0, 1.0, 27.0).with_filter("r");
        coadd.add_exposure(&exposure, 1.0).unwrap();
    }
    assert_eq!(coadd.filters().collect::<Vec<_>>(), vec!["r"]);
    assert_eq!(coadd.coadd().unwrap().filter.as_deref(), Some("r"));
}

#[test]
fn test_mixed_filters_are_dropped() {
    let mut coadd = default_coadd(full_bbox());
    for band in ["r", "g", "r"] {
        let exposure = uniform_exposure(full_bbox(), 1.0, 1.0, 27.0).with_filter(band);
        coadd.add_exposure(&exposure, 1.0).unwrap();
    }
    assert_eq!(coadd.filters().collect::<Vec<_>>(), vec!["g", "r"]);
    assert_eq!(coadd.coadd().unwrap().filter, None);
}

#[test]
fn test_unfiltered_exposure_counts_as_own_filter() {
    let mut coadd = default_coadd(full_bbox());
    let r = uniform_exposure(full_bbox(), 1.0, 1.0, 27.0).with_filter("r");
    let unfiltered = uniform_exposure(full_bbox(), 1.0, 1.0, 27.0);
    coadd.add_exposure(&r, 1.0).unwrap();
    coadd.add_exposure(&unfiltered, 1.0).unwrap();

    assert_eq!(coadd.filters().collect::<Vec<_>>(), vec!["r"]);
    assert_eq!(coadd.coadd().unwrap().filter, None);
}

#[test]
fn test_added_exposure_is_scaled_to_coadd_calib() {
    let mut coadd = default_coadd(full_bbox());
    let exposure = uniform_exposure(full_bbox(), 100.0, 4.0, 28.0);
    coadd.add_exposure(&exposure, 1.0).unwrap();

    let result = coadd.coadd().unwrap();
    assert_eq!(result.calib, Calib::from_zero_point(27.0));
    assert_close(result.masked_image.pixel(2, 2).image as f64, 100.0 * 10f64.powf(-0.4), 1e-5);
}
