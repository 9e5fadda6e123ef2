//! Error types for canvas2d.

use thiserror::Error;

/// Result type alias using CanvasError.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Errors that can occur in Canvas 2D operations.
///
/// Edge input the canvas contract sanctions (non-finite arguments,
/// out-of-domain property values, unrecognized enum strings) never produces
/// one of these; those are silent no-ops. An error here indicates either a
/// caller bug (negative radius, unsupported composite mode) or a
/// recoverable resource failure (image decode, color parse).
#[derive(Debug, Error)]
pub enum CanvasError {
    /// Invalid canvas dimensions (must be positive and within limits).
    #[error("invalid dimensions: width={width}, height={height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Negative radius passed to an arc, ellipse, or radial gradient.
    #[error("radii cannot be negative: {0}")]
    NegativeRadius(f32),

    /// Fill rule string that is neither "nonzero" nor "evenodd".
    #[error("invalid fill rule: {0}")]
    InvalidFillRule(String),

    /// Composite operation that is recognized but not supported.
    #[error("{0} is not a supported composite operation")]
    UnsupportedCompositeOperation(String),

    /// Gradient stop offset outside [0, 1] or non-finite.
    #[error("gradient stop offset must be between 0 and 1 inclusively, got {0}")]
    InvalidGradientStop(f32),

    /// Pattern repetition mode that is not one of the four known keywords.
    #[error("invalid pattern repetition: {0}")]
    InvalidRepetition(String),

    /// Failed to parse a color value.
    #[error("failed to parse color: {0}")]
    ColorParse(String),

    /// A flat point list with an odd number of entries.
    #[error("point list length must be even, got {0}")]
    OddPointList(usize),

    /// Matrix multiplication called with fewer than two matrices.
    #[error("matrix multiplication expected two or more matrices")]
    MatrixArity,

    /// Failed to decode encoded image bytes.
    #[error("failed to decode image: {0}")]
    ImageDecode(String),

    /// Malformed argument that is a caller bug rather than sanctioned edge
    /// input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncode(String),
}

impl From<png::EncodingError> for CanvasError {
    fn from(err: png::EncodingError) -> Self {
        CanvasError::PngEncode(err.to_string())
    }
}
