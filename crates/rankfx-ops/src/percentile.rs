//! Disk-support percentile and median filters.
//!
//! Unlike min and max, a percentile over a disk does not decompose into 1-D
//! passes, so each scanline is scanned once with a [`RankWindow`] holding
//! the disk around the current pixel.
//!
//! # Slot addressing
//!
//! Disk row `i` owns slots `i * d .. (i + 1) * d` where `d = 2r + 1`, and the
//! sample at column `x` of that row lives in slot `i * d + x % d`. A disk row
//! never spans more than `d` consecutive columns, so sliding the disk one
//! pixel right costs exactly one remove (the column leaving each row) and one
//! insert (the column entering it): `O(r)` window updates per pixel instead
//! of rebuilding `O(r²)` members.
//!
//! Columns and rows outside the image are simply never inserted, so border
//! pixels rank over the in-bounds part of their disk.
//!
//! # Example
//!
//! ```rust
//! use rankfx_core::Image;
//! use rankfx_ops::percentile::median_filter;
//!
//! let mut img = Image::filled(5, 5, 1, 1, 0.5);
//! img.set(2, 2, 0, 0, 10.0); // hot pixel
//! let out = median_filter(&img, 1).unwrap();
//! assert_eq!(out.get(2, 2, 0, 0), 0.5);
//! ```

use crate::disk::DiskProfile;
use crate::params::{disk_radius, RankParams};
use crate::select::RankWindow;
use crate::OpsResult;
use rankfx_core::{Extent, Image};
use tracing::{debug, trace};

/// Returns a new image where every sample is the given percentile of its
/// disk neighbourhood.
///
/// `percentile` is in `[0, 1]`: `0` selects the minimum, `0.5` the median
/// and `1` (clamped to [`MAX_PERCENTILE`](crate::params::MAX_PERCENTILE))
/// the maximum.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`](crate::OpsError::InvalidParameter) for a
/// negative radius or an out-of-range percentile.
pub fn percentile_filter(image: &Image, radius: i32, percentile: f32) -> OpsResult<Image> {
    let params = RankParams::new(radius, percentile)?;
    Ok(percentile_filter_with(image, &params))
}

/// Median over a disk of the given radius.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`](crate::OpsError::InvalidParameter) for a
/// negative radius.
pub fn median_filter(image: &Image, radius: i32) -> OpsResult<Image> {
    let params = RankParams::median(radius)?;
    Ok(percentile_filter_with(image, &params))
}

/// Percentile filter with pre-validated parameters.
pub fn percentile_filter_with(image: &Image, params: &RankParams) -> Image {
    let mut out = image.zeros_like();
    filter_planes(image, &mut out, params);
    out
}

/// Percentile filter writing into an existing buffer of the same extents.
///
/// # Errors
///
/// [`OpsError::Core`](crate::OpsError::Core) if `dst` does not match the
/// extents of `src`.
pub fn percentile_filter_into(src: &Image, dst: &mut Image, params: &RankParams) -> OpsResult<()> {
    src.ensure_same_extent(dst)?;
    filter_planes(src, dst, params);
    Ok(())
}

fn filter_planes(src: &Image, dst: &mut Image, params: &RankParams) {
    let extent = src.extent();
    trace!(%extent, radius = params.radius, percentile = params.percentile, "percentile_filter");
    if src.is_empty() {
        return;
    }

    let scan = DiskScan::new(params, extent);
    debug!(
        radius = scan.profile.radius(),
        percentile = params.percentile,
        disk_area = scan.profile.area(),
        "Applying disk percentile filter"
    );

    let (width, height) = (extent.width, extent.height);
    let mut window = scan.window();
    for (src_plane, dst_plane) in src.planes().zip(dst.planes_mut()) {
        for (y, out_row) in dst_plane.chunks_mut(width).enumerate() {
            scan.row(src_plane, width, height, y, &mut window, out_row);
        }
    }
}

/// Disk profile plus the rank to extract, shared by every scanline.
pub(crate) struct DiskScan {
    pub(crate) profile: DiskProfile,
    percentile: f32,
}

impl DiskScan {
    /// The disk radius is capped to the image diagonal, see
    /// [`disk_radius`].
    pub(crate) fn new(params: &RankParams, extent: Extent) -> Self {
        Self {
            profile: DiskProfile::new(disk_radius(params.radius, extent)),
            percentile: params.percentile,
        }
    }

    /// A window large enough for the slot scheme, `d * d` slots.
    pub(crate) fn window(&self) -> RankWindow {
        let d = self.profile.diameter();
        RankWindow::new(d * d)
    }

    /// Filters scanline `y` of `plane` into `out`.
    ///
    /// `window` must come from [`DiskScan::window`]; it is cleared first.
    pub(crate) fn row(
        &self,
        plane: &[f32],
        width: usize,
        height: usize,
        y: usize,
        window: &mut RankWindow,
        out: &mut [f32],
    ) {
        let r = self.profile.radius();
        let d = self.profile.diameter();
        let half_widths = self.profile.half_widths();

        // Disk rows whose image row y + i - r exists
        let first = r.saturating_sub(y);
        let last = d.min(height + r - y);
        let source = |i: usize| {
            let yy = y + i - r;
            &plane[yy * width..(yy + 1) * width]
        };

        window.clear();
        for i in first..last {
            let src = source(i);
            for x in 0..=half_widths[i].min(width - 1) {
                window.insert(i * d + x, src[x]);
            }
        }

        for x in 0..width {
            window.rebalance(self.percentile);
            // The centre pixel is always a member, so the pivot exists.
            if let Some(value) = window.pivot() {
                out[x] = value;
            }

            for i in first..last {
                let hw = half_widths[i];
                let src = source(i);
                if x >= hw {
                    window.remove(i * d + (x - hw) % d);
                }
                let incoming = x + hw + 1;
                if incoming < width {
                    window.insert(i * d + incoming % d, src[incoming]);
                }
            }
        }
    }
}
