//! # rankfx-ops
//!
//! Sliding-window order-statistic filters over 4-D float images.
//!
//! Every filter slides a window across each scanline and keeps a selection
//! structure up to date with matched insert/remove pairs instead of
//! re-sorting the window at every pixel.
//!
//! # Modules
//!
//! - [`disk`] - Circular support profiles
//! - [`select`] - Extremum tree and order-statistic window
//! - [`extremum`] - Square-support min/max filters (in place, separable)
//! - [`percentile`] - Disk-support percentile/median filters (new buffer)
//! - [`hot_pixel`] - Four-neighbour outlier clamping
//! - [`params`] - Radius and percentile validation
//! - `parallel` - Rayon versions of the filters (feature `parallel`)
//!
//! # Example
//!
//! ```rust
//! use rankfx_core::Image;
//! use rankfx_ops::{max_filter, median_filter, min_filter, percentile_filter};
//!
//! let img = Image::filled(32, 32, 1, 3, 0.5);
//!
//! // Buffer-producing: disk support
//! let median = median_filter(&img, 4)?;
//! let dark = percentile_filter(&img, 4, 0.25)?;
//!
//! // In place: square support
//! let mut eroded = img.clone();
//! min_filter(&mut eroded, 2)?;
//! let mut dilated = img.clone();
//! max_filter(&mut dilated, 2)?;
//!
//! assert_eq!(median, img);
//! assert_eq!(dark, eroded);
//! # Ok::<(), rankfx_ops::OpsError>(())
//! ```
//!
//! # Complexity
//!
//! | filter | per pixel |
//! |--------|-----------|
//! | min/max | `O(log r)` per pass |
//! | percentile | `O(r log r²)` |

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod disk;
pub mod extremum;
pub mod hot_pixel;
pub mod params;
pub mod percentile;
pub mod select;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use error::{OpsError, OpsResult};
pub use extremum::{max_filter, min_filter};
pub use hot_pixel::hot_pixel_suppression;
pub use params::RankParams;
pub use percentile::{median_filter, percentile_filter};
