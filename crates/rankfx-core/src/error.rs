//! Error types for rankfx-core operations.
//!
//! # Overview
//!
//! The [`Error`] enum covers the failure modes of the pixel buffer itself:
//! - Construction from raw data with the wrong length
//! - Checked access outside the declared extents
//! - Operations combining buffers of different extents
//!
//! # Usage
//!
//! ```rust
//! use rankfx_core::{Error, Image, Result};
//!
//! fn make() -> Result<Image> {
//!     Image::from_data(2, 2, 1, 1, vec![0.0; 4])
//! }
//! assert!(make().is_ok());
//!
//! let err = Image::from_data(2, 2, 1, 1, vec![0.0; 3]).unwrap_err();
//! assert!(matches!(err, Error::InvalidDimensions { .. }));
//! ```

use crate::image::Extent;
use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the pixel buffer.
#[derive(Debug, Error)]
pub enum Error {
    /// Sample coordinates are outside the buffer.
    #[error("sample ({x}, {y}, {t}, {c}) out of bounds for image {extent}")]
    OutOfBounds {
        /// Column
        x: usize,
        /// Row
        y: usize,
        /// Frame
        t: usize,
        /// Channel
        c: usize,
        /// Extents of the buffer that was accessed
        extent: Extent,
    },

    /// Invalid buffer dimensions.
    ///
    /// Returned when the sample count does not match the extents, or the
    /// extents overflow `usize` when multiplied together.
    #[error("invalid dimensions: {extent} ({reason})")]
    InvalidDimensions {
        /// Requested extents
        extent: Extent,
        /// Why the extents were rejected
        reason: String,
    },

    /// Two buffers that must agree in shape do not.
    #[error("dimension mismatch: {a} vs {b}")]
    DimensionMismatch {
        /// First buffer extents
        a: Extent,
        /// Second buffer extents
        b: Extent,
    },

    /// Generic error with custom message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: usize, y: usize, t: usize, c: usize, extent: Extent) -> Self {
        Self::OutOfBounds { x, y, t, c, extent }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(extent: Extent, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            extent,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::DimensionMismatch`] error.
    #[inline]
    pub fn dimension_mismatch(a: Extent, b: Extent) -> Self {
        Self::DimensionMismatch { a, b }
    }

    /// Creates an [`Error::Other`] error.
    #[inline]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }
}
