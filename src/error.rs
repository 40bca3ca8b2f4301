//! Error types for the scaling engine.
//!
//! Every failure is detected synchronously before any pixel is written; the
//! engine never partially writes the target on invalid input, and there is
//! no retry semantics - an error always indicates a programming or
//! configuration mistake on the caller's side.

use thiserror::Error;

/// Errors reported by scaler construction and scaling operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScaleError {
    /// Scale factor outside the supported closed set {2, 3, 4, 5}.
    #[error("scale factor {0} is not supported, expected 2-5")]
    InvalidScaleFactor(usize),

    /// Source image has a zero dimension.
    #[error("image dimensions {width}x{height} must be positive")]
    InvalidDimensions { width: usize, height: usize },

    /// The row range is empty after clamping to the image height.
    #[error("row range [{y_first}, {y_last}) is empty after clamping")]
    EmptyRowRange { y_first: usize, y_last: usize },

    /// The source buffer holds fewer pixels than the image dimensions imply.
    #[error("source buffer holds {len} pixels but {required} are required")]
    SourceBufferTooSmall { len: usize, required: usize },

    /// The target buffer cannot hold the requested output rows.
    #[error("target buffer holds {len} pixels but {required} are required")]
    TargetBufferTooSmall { len: usize, required: usize },

    /// A configuration threshold is zero or negative.
    #[error("{name} must be positive, got {value}")]
    NonPositiveThreshold { name: &'static str, value: f64 },

    /// The packed pixel format assumes little-endian integers.
    #[error("packed pixel buffers require a little-endian platform")]
    UnsupportedPlatform,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ScaleError::InvalidScaleFactor(7).to_string(),
            "scale factor 7 is not supported, expected 2-5"
        );
        assert_eq!(
            ScaleError::TargetBufferTooSmall { len: 35, required: 36 }.to_string(),
            "target buffer holds 35 pixels but 36 are required"
        );
        assert_eq!(
            ScaleError::NonPositiveThreshold { name: "equal_color_tolerance", value: 0.0 }
                .to_string(),
            "equal_color_tolerance must be positive, got 0"
        );
    }
}
