//! Square-support min and max filters.
//!
//! Both filters are separable: a pass along x over every scanline, then a
//! pass along y over every column of the partially filtered result. Each
//! pass streams one lane through an [`ExtremeTree`] and writes the window
//! extremum `radius` samples behind the read position, so the image can be
//! overwritten in place without clobbering samples still to be read.
//!
//! Samples outside the image never enter the window: edge pixels take the
//! extremum over the in-bounds part of their square.
//!
//! # Example
//!
//! ```rust
//! use rankfx_core::Image;
//! use rankfx_ops::extremum::{max_filter, min_filter};
//!
//! let mut img = Image::from_data(5, 1, 1, 1, vec![5.0, 1.0, 4.0, 2.0, 8.0]).unwrap();
//! min_filter(&mut img, 1).unwrap();
//! assert_eq!(img.data(), &[1.0, 1.0, 1.0, 2.0, 2.0]);
//!
//! let mut img = Image::from_data(5, 1, 1, 1, vec![5.0, 1.0, 4.0, 2.0, 8.0]).unwrap();
//! max_filter(&mut img, 1).unwrap();
//! assert_eq!(img.data(), &[5.0, 5.0, 4.0, 8.0, 8.0]);
//! ```

use crate::OpsResult;
use crate::params;
use crate::select::{ExtremeTree, Extremum, Max, Min};
use rankfx_core::Image;
use tracing::{debug, trace};

/// Replaces every sample with the minimum over its `(2r+1)²` square.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`](crate::OpsError::InvalidParameter) if
/// `radius` is negative; the image is left untouched.
pub fn min_filter(image: &mut Image, radius: i32) -> OpsResult<()> {
    extreme_filter::<Min>(image, radius, "min_filter")
}

/// Replaces every sample with the maximum over its `(2r+1)²` square.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`](crate::OpsError::InvalidParameter) if
/// `radius` is negative; the image is left untouched.
pub fn max_filter(image: &mut Image, radius: i32) -> OpsResult<()> {
    extreme_filter::<Max>(image, radius, "max_filter")
}

fn extreme_filter<S: Extremum>(image: &mut Image, radius: i32, op: &str) -> OpsResult<()> {
    let radius = params::radius(radius)?;
    let extent = image.extent();
    trace!(op, %extent, radius, "extreme filter");

    if radius == 0 || image.is_empty() {
        return Ok(());
    }
    let radius = params::square_radius(radius, extent);
    debug!(op, radius, window = 2 * radius + 1, "Applying separable extremum");

    let (width, height) = (extent.width, extent.height);
    let mut tree = ExtremeTree::<S>::new(radius);
    for plane in image.planes_mut() {
        extreme_plane(plane, width, height, radius, &mut tree);
    }
    Ok(())
}

/// Filters one `(t, c)` plane: every row, then every column.
pub(crate) fn extreme_plane<S: Extremum>(
    plane: &mut [f32],
    width: usize,
    height: usize,
    radius: usize,
    tree: &mut ExtremeTree<S>,
) {
    for y in 0..height {
        extreme_lane(plane, y * width, width, 1, radius, tree);
    }
    extreme_columns(plane, width, height, radius, tree);
}

/// Vertical pass over every column of a plane.
pub(crate) fn extreme_columns<S: Extremum>(
    plane: &mut [f32],
    width: usize,
    height: usize,
    radius: usize,
    tree: &mut ExtremeTree<S>,
) {
    for x in 0..width {
        extreme_lane(plane, x, height, width, radius, tree);
    }
}

/// Filters the `len` samples at `start, start + stride, ...` in place.
///
/// Sample `i` is read before the output for `i - radius` is written, so
/// every write lands on a sample the window has already consumed.
pub(crate) fn extreme_lane<S: Extremum>(
    data: &mut [f32],
    start: usize,
    len: usize,
    stride: usize,
    radius: usize,
    tree: &mut ExtremeTree<S>,
) {
    tree.reset();
    for i in 0..len + radius {
        let value = if i < len {
            data[start + i * stride]
        } else {
            S::SENTINEL
        };
        tree.push(value);

        if i >= radius {
            data[start + (i - radius) * stride] = tree.query();
        }
    }
}
