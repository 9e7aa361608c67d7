use crate::image::CoaddArray;
use crate::pixel::MaskPixel;
use crate::validity::PixelValidity;

/// Copy every good pixel of `src` over `dest` within their overlap.
///
/// Masked images copy all channels. Sizes and origins may differ freely;
/// a smaller overlap simply copies fewer pixels. Returns the number copied.
pub fn copy_good_pixels<A: CoaddArray>(dest: &mut A, src: &A, bad_pixel_mask: MaskPixel) -> usize {
    let overlap = dest.bbox().intersection(&src.bbox());
    if overlap.is_empty() {
        return 0;
    }

    let validity = A::validity(bad_pixel_mask);
    let (dest_x, dest_y) = overlap.local_start(dest.origin());
    let (src_x, src_y) = overlap.local_start(src.origin());

    let mut copied = 0;
    for row in 0..overlap.height() {
        for col in 0..overlap.width() {
            let value = src.pixel(src_x + col, src_y + row);
            if validity.is_valid(&value) {
                dest.set_pixel(dest_x + col, dest_y + row, value);
                copied += 1;
            }
        }
    }
    copied
}
