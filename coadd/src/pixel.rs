//! Numeric pixel types.
//!
//! Every operation is generic over [`Pixel`], which covers the sample types
//! used for coadds, weight maps and depth maps.

use std::fmt::Debug;

use num_traits::{Num, NumAssignOps};

/// Mask plane bit pattern.
pub type MaskPixel = u32;

/// Variance channel sample type of a [`MaskedImage`](crate::MaskedImage).
pub type VariancePixel = f32;

/// Numeric sample type usable for image, weight and depth planes.
pub trait Pixel:
    Copy + Default + Debug + PartialEq + PartialOrd + Num + NumAssignOps + Send + Sync + 'static
{
    /// True for floating point NaN; integer samples are never NaN.
    fn is_nan(self) -> bool;

    fn to_f64(self) -> f64;

    /// `as`-style conversion: truncates toward zero and saturates for integers.
    fn from_f64(value: f64) -> Self;

    /// Division that never panics. Floating point types follow IEEE semantics;
    /// integer types leave the dividend unchanged for a zero divisor.
    fn div_or_keep(self, divisor: Self) -> Self;

    /// Addition that never overflows: integers clamp at their bounds.
    fn add_saturating(self, other: Self) -> Self;

    #[inline]
    fn cast<U: Pixel>(self) -> U {
        U::from_f64(self.to_f64())
    }
}

macro_rules! impl_float_pixel {
    ($($t:ty),*) => {
        $(
            impl Pixel for $t {
                #[inline]
                fn is_nan(self) -> bool {
                    <$t>::is_nan(self)
                }

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn from_f64(value: f64) -> Self {
                    value as $t
                }

                #[inline]
                fn div_or_keep(self, divisor: Self) -> Self {
                    self / divisor
                }

                #[inline]
                fn add_saturating(self, other: Self) -> Self {
                    self + other
                }
            }
        )*
    };
}

macro_rules! impl_int_pixel {
    ($($t:ty),*) => {
        $(
            impl Pixel for $t {
                #[inline]
                fn is_nan(self) -> bool {
                    false
                }

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn from_f64(value: f64) -> Self {
                    value as $t
                }

                #[inline]
                fn div_or_keep(self, divisor: Self) -> Self {
                    if divisor == 0 { self } else { self / divisor }
                }

                #[inline]
                fn add_saturating(self, other: Self) -> Self {
                    <$t>::saturating_add(self, other)
                }
            }
        )*
    };
}

impl_float_pixel!(f32, f64);
impl_int_pixel!(i32, u16, u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_only_for_floats() {
        assert!(Pixel::is_nan(f32::NAN));
        assert!(Pixel::is_nan(f64::NAN));
        assert!(!Pixel::is_nan(f64::INFINITY));
        assert!(!Pixel::is_nan(0i32));
        assert!(!Pixel::is_nan(u16::MAX));
    }

    #[test]
    fn test_cast_between_types() {
        let w: f64 = 2.75;
        assert_eq!(w.cast::<f32>(), 2.75f32);
        assert_eq!(w.cast::<i32>(), 2);
        assert_eq!(w.cast::<u16>(), 2);
        assert_eq!(7u16.cast::<f64>(), 7.0);
        // Saturating, like `as`
        assert_eq!((-3.0f64).cast::<u16>(), 0);
        assert_eq!(f64::NAN.cast::<i32>(), 0);
    }

    #[test]
    fn test_div_or_keep() {
        assert_eq!(9i32.div_or_keep(3), 3);
        assert_eq!(9i32.div_or_keep(0), 9);
        assert_eq!(10u16.div_or_keep(0), 10);
        assert!(1.0f32.div_or_keep(0.0).is_infinite());
        assert!(Pixel::is_nan(0.0f64.div_or_keep(0.0)));
    }

    #[test]
    fn test_add_saturating() {
        assert_eq!(Pixel::add_saturating(u16::MAX, 1), u16::MAX);
        assert_eq!(Pixel::add_saturating(i32::MIN, -1), i32::MIN);
        assert_eq!(Pixel::add_saturating(3u32, 4), 7);
        assert_eq!(Pixel::add_saturating(0.5f32, 0.25), 0.75);
    }
}
