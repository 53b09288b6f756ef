//! Disk-shaped support profiles.
//!
//! A [`DiskProfile`] describes a circular support of integer radius `r` as a
//! table of per-row half-widths: row offset `dy` in `[-r, r]` spans columns
//! `[-w, w]` with `w = floor(sqrt(r² - dy²) + 1e-4)`.
//!
//! The profile is computed once per filter invocation and shared by every
//! scanline, frame and channel.
//!
//! # Example
//!
//! ```rust
//! use rankfx_ops::disk::DiskProfile;
//!
//! let disk = DiskProfile::new(2);
//! assert_eq!(disk.half_widths(), &[0, 1, 2, 1, 0]);
//! assert_eq!(disk.area(), 13);
//! ```

/// Slack added before truncation so exact squares are not lost to rounding.
const EDGE_EPSILON: f32 = 1e-4;

/// Per-row half-widths of a disk of integer radius.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskProfile {
    radius: usize,
    half_widths: Vec<usize>,
}

impl DiskProfile {
    /// Builds the profile for `radius`.
    pub fn new(radius: usize) -> Self {
        let r = radius as f32;
        let half_widths = (0..2 * radius + 1)
            .map(|i| {
                let dy = i as f32 - r;
                ((r * r - dy * dy).sqrt() + EDGE_EPSILON) as usize
            })
            .collect();
        Self {
            radius,
            half_widths,
        }
    }

    /// Radius the profile was built for.
    #[inline]
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Width of the bounding square, `2 * radius + 1`.
    #[inline]
    pub fn diameter(&self) -> usize {
        self.half_widths.len()
    }

    /// Half-widths indexed by row, top row first.
    #[inline]
    pub fn half_widths(&self) -> &[usize] {
        &self.half_widths
    }

    /// Half-width of row `i` (`0..diameter`), whose offset is `i - radius`.
    #[inline]
    pub fn half_width(&self, i: usize) -> usize {
        self.half_widths[i]
    }

    /// Iterates `(row offset, half-width)` pairs from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = (isize, usize)> + '_ {
        let r = self.radius as isize;
        self.half_widths
            .iter()
            .enumerate()
            .map(move |(i, &w)| (i as isize - r, w))
    }

    /// Number of pixels covered by the disk.
    pub fn area(&self) -> usize {
        self.half_widths.iter().map(|w| 2 * w + 1).sum()
    }

    /// Returns `true` if offset `(dx, dy)` lies inside the disk.
    pub fn contains(&self, dx: isize, dy: isize) -> bool {
        let r = self.radius as isize;
        if dy < -r || dy > r {
            return false;
        }
        let w = self.half_widths[(dy + r) as usize] as isize;
        -w <= dx && dx <= w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_zero() {
        let disk = DiskProfile::new(0);
        assert_eq!(disk.half_widths(), &[0]);
        assert_eq!(disk.diameter(), 1);
        assert_eq!(disk.area(), 1);
        assert!(disk.contains(0, 0));
        assert!(!disk.contains(1, 0));
    }

    #[test]
    fn test_radius_one_is_a_plus() {
        let disk = DiskProfile::new(1);
        assert_eq!(disk.half_widths(), &[0, 1, 0]);
        assert_eq!(disk.area(), 5);
        assert!(!disk.contains(1, 1));
        assert!(disk.contains(0, -1));
    }

    #[test]
    fn test_exact_squares_survive_rounding() {
        // 5² - 3² = 4², 5² - 4² = 3²
        let disk = DiskProfile::new(5);
        assert_eq!(disk.half_width(5 + 3), 4);
        assert_eq!(disk.half_width(5 - 4), 3);
        assert_eq!(disk.half_width(5), 5);
        assert_eq!(disk.half_width(0), 0);
    }

    #[test]
    fn test_profile_is_symmetric() {
        for radius in 0..12 {
            let disk = DiskProfile::new(radius);
            let w = disk.half_widths();
            assert!(w.iter().eq(w.iter().rev()), "radius {radius}");
            assert_eq!(disk.rows().count(), 2 * radius + 1);
            assert!(disk.rows().all(|(dy, hw)| hw <= radius && dy.unsigned_abs() <= radius));
        }
    }

    #[test]
    fn test_area_matches_contains() {
        let disk = DiskProfile::new(7);
        let r = 7isize;
        let counted = (-r..=r)
            .flat_map(|dy| (-r..=r).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| disk.contains(dx, dy))
            .count();
        assert_eq!(counted, disk.area());
    }
}
