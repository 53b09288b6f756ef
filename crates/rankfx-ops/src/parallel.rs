//! Parallel filters using Rayon.
//!
//! Scanlines never share a selection structure, so each worker gets its own
//! [`ExtremeTree`] or [`RankWindow`](crate::select::RankWindow) via
//! `for_each_init` and the drivers need no locking. Output is bit-identical
//! to the serial versions.
//!
//! # Example
//!
//! ```rust
//! use rankfx_core::Image;
//! use rankfx_ops::parallel;
//!
//! let img = Image::filled(256, 256, 1, 3, 0.5);
//! let median = parallel::median_filter(&img, 3).unwrap();
//! assert_eq!(median, img);
//! ```

use crate::extremum::{extreme_columns, extreme_lane};
use crate::hot_pixel::suppress_plane;
use crate::params::{self, RankParams};
use crate::percentile::DiskScan;
use crate::select::{ExtremeTree, Extremum, Max, Min};
use crate::OpsResult;
use rankfx_core::Image;
use rayon::prelude::*;
use tracing::{debug, trace};

/// Parallel [`min_filter`](crate::extremum::min_filter).
///
/// # Example
///
/// ```rust
/// use rankfx_core::Image;
/// use rankfx_ops::parallel::min_filter;
///
/// let mut img = Image::from_data(5, 1, 1, 1, vec![5.0, 1.0, 4.0, 2.0, 8.0]).unwrap();
/// min_filter(&mut img, 1).unwrap();
/// assert_eq!(img.data(), &[1.0, 1.0, 1.0, 2.0, 2.0]);
/// ```
pub fn min_filter(image: &mut Image, radius: i32) -> OpsResult<()> {
    extreme_filter_par::<Min>(image, radius)
}

/// Parallel [`max_filter`](crate::extremum::max_filter).
pub fn max_filter(image: &mut Image, radius: i32) -> OpsResult<()> {
    extreme_filter_par::<Max>(image, radius)
}

fn extreme_filter_par<S: Extremum>(image: &mut Image, radius: i32) -> OpsResult<()> {
    let radius = params::radius(radius)?;
    let extent = image.extent();
    trace!(%extent, radius, "parallel extreme filter");

    if radius == 0 || image.is_empty() {
        return Ok(());
    }
    let radius = params::square_radius(radius, extent);
    let (width, height) = (extent.width, extent.height);

    // Horizontal pass: every scanline is independent
    image
        .data_mut()
        .par_chunks_mut(width)
        .for_each_init(
            || ExtremeTree::<S>::new(radius),
            |tree, row| extreme_lane(row, 0, width, 1, radius, tree),
        );

    // Vertical pass: columns interleave within a plane, so split by plane
    image
        .data_mut()
        .par_chunks_mut(width * height)
        .for_each_init(
            || ExtremeTree::<S>::new(radius),
            |tree, plane| extreme_columns(plane, width, height, radius, tree),
        );

    Ok(())
}

/// Parallel [`percentile_filter`](crate::percentile::percentile_filter).
///
/// # Errors
///
/// [`OpsError::InvalidParameter`](crate::OpsError::InvalidParameter) for a
/// negative radius or an out-of-range percentile.
pub fn percentile_filter(image: &Image, radius: i32, percentile: f32) -> OpsResult<Image> {
    let params = RankParams::new(radius, percentile)?;
    Ok(percentile_filter_with(image, &params))
}

/// Parallel [`median_filter`](crate::percentile::median_filter).
pub fn median_filter(image: &Image, radius: i32) -> OpsResult<Image> {
    let params = RankParams::median(radius)?;
    Ok(percentile_filter_with(image, &params))
}

/// Parallel percentile filter with pre-validated parameters.
pub fn percentile_filter_with(image: &Image, params: &RankParams) -> Image {
    let extent = image.extent();
    trace!(%extent, radius = params.radius, percentile = params.percentile, "parallel percentile_filter");

    let mut out = image.zeros_like();
    if image.is_empty() {
        return out;
    }

    let scan = DiskScan::new(params, extent);
    debug!(
        radius = scan.profile.radius(),
        disk_area = scan.profile.area(),
        rows = extent.scanlines(),
        "Applying parallel disk percentile filter"
    );

    let (width, height) = (extent.width, extent.height);
    let plane_len = image.plane_len();
    let src = image.data();

    out.data_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each_init(
            || scan.window(),
            |window, (n, out_row)| {
                let plane = &src[(n / height) * plane_len..][..plane_len];
                scan.row(plane, width, height, n % height, window, out_row);
            },
        );

    out
}

/// Parallel [`hot_pixel_suppression`](crate::hot_pixel::hot_pixel_suppression).
pub fn hot_pixel_suppression(image: &Image) -> Image {
    let extent = image.extent();
    trace!(%extent, "parallel hot_pixel_suppression");

    let mut out = image.clone();
    if image.is_empty() {
        return out;
    }
    let plane_len = image.plane_len();
    out.data_mut()
        .par_chunks_mut(plane_len)
        .zip(image.data().par_chunks(plane_len))
        .for_each(|(dst, src)| suppress_plane(src, dst, extent.width, extent.height));
    out
}
