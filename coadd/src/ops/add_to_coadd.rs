use crate::error::{Result, check_dimensions};
use crate::image::{CoaddArray, Image};
use crate::math::Region;
use crate::pixel::{MaskPixel, Pixel};
use crate::validity::PixelValidity;

/// Add the good pixels of `input`, scaled by `weight`, into `coadd` and add
/// `weight` to the matching `weight_map` pixels.
///
/// Only the overlap of the three footprints in parent coordinates is
/// touched; that overlap is returned and may be empty. Plain images skip NaN
/// pixels and ignore `bad_pixel_mask`; masked images skip pixels whose mask
/// intersects it. Masked inputs add `variance * weight²` to the coadd
/// variance and never change the coadd mask.
///
/// `weight` is converted to the weight map type once and that value both
/// scales the input and is added to the weight map, so an integer weight map
/// truncates the weight before use. Weight sums saturate at the type's bounds.
///
/// Fails with `DimensionMismatch` before touching any pixel when `coadd`
/// and `weight_map` differ in size.
pub fn add_to_coadd<A, W>(
    coadd: &mut A,
    weight_map: &mut Image<W>,
    input: &A,
    bad_pixel_mask: MaskPixel,
    weight: f64,
) -> Result<Region>
where
    A: CoaddArray,
    W: Pixel,
{
    let weight = W::from_f64(weight);
    accumulate(
        "add_to_coadd",
        coadd,
        weight_map,
        input,
        bad_pixel_mask,
        weight.to_f64(),
        |w| *w = w.add_saturating(weight),
    )
}

/// Like [`add_to_coadd`] with a fixed weight of 1: `depth_map` counts how
/// many inputs contributed to each pixel, saturating at the type's maximum.
pub fn add_to_depth_map<A, D>(
    coadd: &mut A,
    depth_map: &mut Image<D>,
    input: &A,
    bad_pixel_mask: MaskPixel,
) -> Result<Region>
where
    A: CoaddArray,
    D: Pixel,
{
    accumulate(
        "add_to_depth_map",
        coadd,
        depth_map,
        input,
        bad_pixel_mask,
        1.0,
        |d| *d = d.add_saturating(D::one()),
    )
}

fn accumulate<A, W>(
    operation: &'static str,
    coadd: &mut A,
    weight_map: &mut Image<W>,
    input: &A,
    bad_pixel_mask: MaskPixel,
    weight: f64,
    mut bump_weight: impl FnMut(&mut W),
) -> Result<Region>
where
    A: CoaddArray,
    W: Pixel,
{
    check_dimensions(operation, coadd.dimensions(), weight_map.dimensions())?;

    let overlap = coadd
        .bbox()
        .intersection(&weight_map.bbox())
        .intersection(&input.bbox());
    if overlap.is_empty() {
        tracing::debug!(
            coadd = %coadd.bbox(),
            input = %input.bbox(),
            "{operation}: no overlap, nothing added"
        );
        return Ok(overlap);
    }

    let validity = A::validity(bad_pixel_mask);
    let (coadd_x, coadd_y) = overlap.local_start(coadd.origin());
    let (weight_x, weight_y) = overlap.local_start(weight_map.origin());
    let (input_x, input_y) = overlap.local_start(input.origin());

    for row in 0..overlap.height() {
        for col in 0..overlap.width() {
            let src = input.pixel(input_x + col, input_y + row);
            if !validity.is_valid(&src) {
                continue;
            }

            let (x, y) = (coadd_x + col, coadd_y + row);
            let mut dest = coadd.pixel(x, y);
            A::add_weighted(&mut dest, src, weight);
            coadd.set_pixel(x, y, dest);

            bump_weight(weight_map.get_mut(weight_x + col, weight_y + row));
        }
    }

    Ok(overlap)
}
