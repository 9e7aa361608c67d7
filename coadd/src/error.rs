//! Error types for coadd operations.

use thiserror::Error;

use crate::math::Dimensions;

/// Errors that can occur while accumulating or normalizing a coadd.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("{operation}: dimensions differ: {expected} != {actual}")]
    DimensionMismatch {
        operation: &'static str,
        expected: Dimensions,
        actual: Dimensions,
    },

    #[error("Unknown mask plane '{0}'")]
    UnknownMaskPlane(String),

    #[error("No free mask bit for plane '{0}'")]
    MaskPlanesExhausted(String),

    #[error("Invalid photometric calibration: fluxMag0 = {flux_mag0}")]
    InvalidCalib { flux_mag0: f64 },

    #[error("Invalid exposure weight {weight} (mean variance {mean_variance})")]
    InvalidWeight { weight: f64, mean_variance: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Fails with [`Error::DimensionMismatch`] unless both shapes agree.
pub(crate) fn check_dimensions(
    operation: &'static str,
    expected: Dimensions,
    actual: Dimensions,
) -> Result<()> {
    if expected != actual {
        return Err(Error::DimensionMismatch {
            operation,
            expected,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_error_message() {
        let err = Error::DimensionMismatch {
            operation: "add_to_coadd",
            expected: Dimensions::new(10, 20),
            actual: Dimensions::new(10, 21),
        };
        let msg = err.to_string();
        assert!(msg.contains("add_to_coadd"));
        assert!(msg.contains("10x20"));
        assert!(msg.contains("10x21"));
    }

    #[test]
    fn test_check_dimensions() {
        assert!(check_dimensions("divide", Dimensions::new(3, 4), Dimensions::new(3, 4)).is_ok());
        assert_eq!(
            check_dimensions("divide", Dimensions::new(3, 4), Dimensions::new(4, 3)),
            Err(Error::DimensionMismatch {
                operation: "divide",
                expected: Dimensions::new(3, 4),
                actual: Dimensions::new(4, 3),
            })
        );
    }

    #[test]
    fn test_unknown_mask_plane_message() {
        let err = Error::UnknownMaskPlane("GHOST".to_string());
        assert_eq!(err.to_string(), "Unknown mask plane 'GHOST'");
    }
}
