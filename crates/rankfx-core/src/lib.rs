//! # rankfx-core
//!
//! Core types for the rankfx filtering toolkit.
//!
//! - [`Image`] - Dense planar `f32` buffer addressed by `(x, y, t, c)`
//! - [`Extent`] - Width, height, frame count and channel count
//! - [`Error`] - Buffer construction and access errors
//!
//! ## Crate Structure
//!
//! ```text
//! rankfx-core (this crate)
//!    ^
//!    |
//!    +-- rankfx-ops (selection structures and rank filters)
//!    +-- rankfx-bench
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;

pub use error::*;
pub use image::*;

/// Prelude module for convenient imports.
///
/// ```
/// use rankfx_core::prelude::*;
///
/// let img = Image::new(2, 2, 1, 1);
/// assert_eq!(img.extent(), Extent::new(2, 2, 1, 1));
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::image::{Extent, Image};
}
