//! Shared fixtures for the rankfx benchmarks.

use rankfx_core::Image;

/// Deterministic pseudo-random single-frame image with samples in `[0, 1)`.
pub fn test_image(width: usize, height: usize, channels: usize) -> Image {
    let len = width * height * channels;
    let data = (0..len)
        .map(|i| ((i as u64).wrapping_mul(2_654_435_761) % 4096) as f32 / 4096.0)
        .collect();
    Image::from_data(width, height, 1, channels, data).expect("fixture extents are consistent")
}
