//! Validated filter parameters.
//!
//! Radii arrive as signed integers from callers that parse user input, so
//! validation lives here rather than in the type system. Everything is
//! checked before any selection structure is allocated.
//!
//! # Example
//!
//! ```rust
//! use rankfx_ops::params::{RankParams, MAX_PERCENTILE};
//!
//! let p = RankParams::new(3, 1.0).unwrap();
//! assert_eq!(p.radius, 3);
//! assert_eq!(p.percentile, MAX_PERCENTILE);
//!
//! assert!(RankParams::new(-1, 0.5).is_err());
//! assert!(RankParams::new(2, 1.5).is_err());
//! ```

use crate::{OpsError, OpsResult};
use rankfx_core::Extent;

/// Largest percentile handed to the rank window; `1.0` is clamped to this so
/// the high partition is never forced empty by rounding.
pub const MAX_PERCENTILE: f32 = 0.999;

/// Radius and percentile for a disk-support rank filter.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankParams {
    /// Disk radius in pixels.
    pub radius: usize,
    /// Rank in `[0, MAX_PERCENTILE]`: 0 = min, 0.5 = median.
    pub percentile: f32,
}

impl RankParams {
    /// Validates a radius and percentile.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidParameter`] for a negative radius or a percentile
    /// outside `[0, 1]` (including NaN).
    pub fn new(radius: i32, percentile: f32) -> OpsResult<Self> {
        let radius = self::radius(radius)?;
        if !(0.0..=1.0).contains(&percentile) {
            return Err(OpsError::InvalidParameter(format!(
                "percentile must be between zero and one, got {percentile}"
            )));
        }
        Ok(Self {
            radius,
            percentile: percentile.min(MAX_PERCENTILE),
        })
    }

    /// Median filter parameters.
    pub fn median(radius: i32) -> OpsResult<Self> {
        Self::new(radius, 0.5)
    }
}

/// Validates a filter radius.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] if `radius` is negative.
pub fn radius(radius: i32) -> OpsResult<usize> {
    usize::try_from(radius).map_err(|_| {
        OpsError::InvalidParameter(format!("radius must be non-negative, got {radius}"))
    })
}

/// Caps a square-filter radius at `max(width, height)`.
///
/// A lane window of `2r + 1` samples with `r` at the cap already spans the
/// whole lane, so larger radii produce the same output.
pub(crate) fn square_radius(radius: usize, extent: Extent) -> usize {
    radius.min(extent.width.max(extent.height))
}

/// Caps a disk radius one past the image diagonal.
///
/// Every in-image offset lies inside a disk of that radius, so larger radii
/// see the same members. The extra pixel keeps offsets on the diagonal
/// inside the disk despite `f32` rounding in [`DiskProfile`](crate::disk::DiskProfile).
pub(crate) fn disk_radius(radius: usize, extent: Extent) -> usize {
    let dx = extent.width.saturating_sub(1) as f64;
    let dy = extent.height.saturating_sub(1) as f64;
    radius.min(dx.hypot(dy).ceil() as usize + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_valid_params() {
        let p = RankParams::new(4, 0.25).unwrap();
        assert_eq!(p.radius, 4);
        assert_relative_eq!(p.percentile, 0.25);
        assert_relative_eq!(RankParams::median(0).unwrap().percentile, 0.5);
    }

    #[test]
    fn test_percentile_one_is_clamped() {
        assert_eq!(RankParams::new(1, 1.0).unwrap().percentile, MAX_PERCENTILE);
        assert_eq!(RankParams::new(1, 0.0).unwrap().percentile, 0.0);
    }

    #[test]
    fn test_rejects_bad_percentile() {
        for p in [-0.01, 1.01, f32::NAN, f32::INFINITY] {
            let err = RankParams::new(1, p).unwrap_err();
            assert!(matches!(err, OpsError::InvalidParameter(_)));
        }
    }

    #[test]
    fn test_rejects_negative_radius() {
        let err = radius(-3).unwrap_err();
        assert!(err.to_string().contains("-3"));
        assert!(RankParams::median(-1).is_err());
        assert_eq!(radius(0).unwrap(), 0);
    }

    #[test]
    fn test_square_radius_caps_at_longest_side() {
        let extent = Extent::new(7, 3, 1, 1);
        assert_eq!(square_radius(2, extent), 2);
        assert_eq!(square_radius(7, extent), 7);
        assert_eq!(square_radius(i32::MAX as usize, extent), 7);
    }

    #[test]
    fn test_disk_radius_covers_every_offset() {
        for (w, h) in [(1, 1), (2, 2), (5, 3), (17, 40), (300, 7)] {
            let extent = Extent::new(w, h, 1, 1);
            let r = disk_radius(usize::MAX, extent);
            let disk = crate::disk::DiskProfile::new(r);
            for dy in -(h as isize - 1)..h as isize {
                for dx in -(w as isize - 1)..w as isize {
                    assert!(disk.contains(dx, dy), "{w}x{h} offset ({dx}, {dy})");
                }
            }
        }
        assert_eq!(disk_radius(3, Extent::new(100, 100, 1, 1)), 3);
    }
}
