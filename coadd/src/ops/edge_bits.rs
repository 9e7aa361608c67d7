use crate::error::{Result, check_dimensions};
use crate::image::{Image, Mask, MaskPlane};
use crate::pixel::Pixel;

/// OR the EDGE bit into every `coadd_mask` pixel whose weight is exactly zero.
///
/// Both arrays are addressed 1:1 from their first pixel, so they must have
/// the same dimensions. Existing mask bits are never cleared.
pub fn set_coadd_edge_bits<W: Pixel>(coadd_mask: &mut Mask, weight_map: &Image<W>) -> Result<()> {
    check_dimensions(
        "set_coadd_edge_bits",
        coadd_mask.dimensions(),
        weight_map.dimensions(),
    )?;
    let edge = coadd_mask.plane_bit_mask(MaskPlane::Edge.as_ref())?;

    let mut marked = 0usize;
    for y in 0..weight_map.height() {
        let weights = weight_map.row(y);
        let bits = coadd_mask.row_mut(y);
        for (bit, &weight) in bits.iter_mut().zip(weights) {
            if weight == W::zero() {
                *bit |= edge;
                marked += 1;
            }
        }
    }

    tracing::debug!(marked, "set_coadd_edge_bits: flagged zero-weight pixels");
    Ok(())
}
