//! Error types for filter operations.

use thiserror::Error;

/// Error type for filter operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid parameter value (negative radius, percentile outside `[0, 1]`).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error raised by the pixel buffer, e.g. mismatched source and
    /// destination extents.
    #[error(transparent)]
    Core(#[from] rankfx_core::Error),
}

/// Result type for filter operations.
pub type OpsResult<T> = Result<T, OpsError>;
