//! Hot-pixel suppression.
//!
//! Clamps every interior sample into the range spanned by its four
//! edge-adjacent neighbours, which removes isolated salt-and-pepper outliers
//! while leaving edges and gradients alone.

use rankfx_core::Image;
use tracing::trace;

/// Returns a copy of `image` with isolated outliers clamped to their
/// neighbours.
///
/// The first and last row and column of each plane are copied unchanged.
/// Borders are kept rather than zeroed, so the output has no dark frame.
///
/// # Example
///
/// ```rust
/// use rankfx_core::Image;
/// use rankfx_ops::hot_pixel::hot_pixel_suppression;
///
/// let mut img = Image::filled(3, 3, 1, 1, 0.2);
/// img.set(1, 1, 0, 0, 100.0);
/// let out = hot_pixel_suppression(&img);
/// assert_eq!(out.get(1, 1, 0, 0), 0.2);
/// ```
pub fn hot_pixel_suppression(image: &Image) -> Image {
    let extent = image.extent();
    trace!(%extent, "hot_pixel_suppression");

    let mut out = image.clone();
    for (src, dst) in image.planes().zip(out.planes_mut()) {
        suppress_plane(src, dst, extent.width, extent.height);
    }
    out
}

/// Clamps the interior of one plane. `dst` must already hold a copy of `src`.
pub(crate) fn suppress_plane(src: &[f32], dst: &mut [f32], width: usize, height: usize) {
    if width < 3 || height < 3 {
        return;
    }
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let i = y * width + x;
            let (left, right) = (src[i - 1], src[i + 1]);
            let (up, down) = (src[i - width], src[i + width]);
            let hi = left.max(right).max(up.max(down));
            let lo = left.min(right).min(up.min(down));
            // f32::clamp panics on NaN bounds
            dst[i] = src[i].min(hi).max(lo);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spike_and_pit_are_clamped() {
        let mut img = Image::filled(5, 5, 1, 1, 1.0);
        img.set(1, 1, 0, 0, 9.0);
        img.set(3, 3, 0, 0, -9.0);
        let out = hot_pixel_suppression(&img);
        assert_eq!(out.get(1, 1, 0, 0), 1.0);
        assert_eq!(out.get(3, 3, 0, 0), 1.0);
    }

    #[test]
    fn test_gradient_untouched() {
        let data: Vec<f32> = (0..36).map(|i| (i % 6 + i / 6) as f32).collect();
        let img = Image::from_data(6, 6, 1, 1, data).unwrap();
        assert_eq!(hot_pixel_suppression(&img), img);
    }

    #[test]
    fn test_border_copied() {
        let mut img = Image::new(4, 4, 2, 1);
        img.set(0, 2, 1, 0, 5.0);
        img.set(3, 0, 0, 0, -5.0);
        let out = hot_pixel_suppression(&img);
        assert_eq!(out.get(0, 2, 1, 0), 5.0);
        assert_eq!(out.get(3, 0, 0, 0), -5.0);
    }

    #[test]
    fn test_thin_image_is_copied() {
        let img = Image::from_data(2, 3, 1, 1, vec![1.0, 9.0, 2.0, 8.0, 3.0, 7.0]).unwrap();
        assert_eq!(hot_pixel_suppression(&img), img);
    }
}
