use crate::error::{Result, check_dimensions};
use crate::image::{Image, MaskedImage, PixelArray};
use crate::pixel::{Pixel, VariancePixel};

/// Divide `masked_image` by `divisor` pixel by pixel: image by `d`, variance
/// by `d²`, with `d` cast to the image pixel type.
///
/// Zero divisors are not special-cased for floating images and produce
/// inf or NaN. Integer images keep their value where the divisor is zero.
/// Mask bits are untouched.
pub fn divide<T, W>(masked_image: &mut MaskedImage<T>, divisor: &Image<W>) -> Result<()>
where
    T: Pixel,
    W: Pixel,
{
    check_dimensions("divide", masked_image.dimensions(), divisor.dimensions())?;

    for y in 0..divisor.height() {
        for x in 0..divisor.width() {
            let d: T = divisor.get(x, y).cast();
            let d_squared = d.to_f64() * d.to_f64();

            let value = masked_image.image_mut().get_mut(x, y);
            *value = value.div_or_keep(d);

            let variance = masked_image.variance_mut().get_mut(x, y);
            *variance = (*variance as f64 / d_squared) as VariancePixel;
        }
    }

    Ok(())
}
