//! Dense 4-D float image buffer.
//!
//! [`Image`] stores `f32` samples addressed by `(x, y, t, c)`: column, row,
//! frame and channel.
//!
//! # Memory Layout
//!
//! Samples are **planar**: every channel holds all of its frames, every frame
//! holds all of its rows, and every row is `width` contiguous samples.
//!
//! ```text
//! index = ((c * frames + t) * height + y) * width + x
//!
//! Memory: [row 0 | row 1 | ... | row h-1]   <- plane (t=0, c=0)
//!         [row 0 | row 1 | ... | row h-1]   <- plane (t=1, c=0)
//!         ...
//! ```
//!
//! Because scanlines and planes are contiguous, filters can hand rows or
//! planes to independent workers as plain slices.
//!
//! # Usage
//!
//! ```rust
//! use rankfx_core::Image;
//!
//! let mut img = Image::new(4, 3, 1, 2);
//! img.set(1, 2, 0, 1, 0.5);
//! assert_eq!(img.get(1, 2, 0, 1), 0.5);
//! assert_eq!(img[(1, 2, 0, 1)], 0.5);
//! assert_eq!(img.row(2, 0, 1), &[0.0, 0.5, 0.0, 0.0]);
//! ```

use crate::{Error, Result};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Extents of a 4-D buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Extent {
    /// Columns per row
    pub width: usize,
    /// Rows per frame
    pub height: usize,
    /// Frames per channel
    pub frames: usize,
    /// Number of channels
    pub channels: usize,
}

impl Extent {
    /// Creates an extent.
    #[inline]
    pub const fn new(width: usize, height: usize, frames: usize, channels: usize) -> Self {
        Self {
            width,
            height,
            frames,
            channels,
        }
    }

    /// Total number of samples, or `None` on overflow.
    #[inline]
    pub fn checked_len(&self) -> Option<usize> {
        self.width
            .checked_mul(self.height)?
            .checked_mul(self.frames)?
            .checked_mul(self.channels)
    }

    /// Number of scanlines (`height * frames * channels`).
    #[inline]
    pub fn scanlines(&self) -> usize {
        self.height * self.frames * self.channels
    }

    /// Number of `(t, c)` planes.
    #[inline]
    pub fn planes(&self) -> usize {
        self.frames * self.channels
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}x{}x{}",
            self.width, self.height, self.frames, self.channels
        )
    }
}

/// Owned planar `f32` buffer addressed by `(x, y, t, c)`.
///
/// # Example
///
/// ```rust
/// use rankfx_core::Image;
///
/// let img = Image::filled(8, 8, 2, 3, 0.25);
/// assert_eq!(img.len(), 8 * 8 * 2 * 3);
/// assert!(img.data().iter().all(|&v| v == 0.25));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    data: Vec<f32>,
    extent: Extent,
}

impl Image {
    /// Creates a zero-filled image.
    ///
    /// # Panics
    ///
    /// Panics if the extents overflow `usize`.
    pub fn new(width: usize, height: usize, frames: usize, channels: usize) -> Self {
        Self::filled(width, height, frames, channels, 0.0)
    }

    /// Creates an image with every sample set to `value`.
    ///
    /// # Panics
    ///
    /// Panics if the extents overflow `usize`.
    pub fn filled(width: usize, height: usize, frames: usize, channels: usize, value: f32) -> Self {
        let extent = Extent::new(width, height, frames, channels);
        let len = extent.checked_len().unwrap_or_else(|| {
            panic!("image extents {extent} overflow usize");
        });
        Self {
            data: vec![value; len],
            extent,
        }
    }

    /// Creates an image from existing planar sample data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the extents overflow or the
    /// data length does not match them.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rankfx_core::Image;
    ///
    /// let img = Image::from_data(3, 1, 1, 1, vec![1.0, 2.0, 3.0]).unwrap();
    /// assert_eq!(img.get(2, 0, 0, 0), 3.0);
    /// ```
    pub fn from_data(
        width: usize,
        height: usize,
        frames: usize,
        channels: usize,
        data: Vec<f32>,
    ) -> Result<Self> {
        let extent = Extent::new(width, height, frames, channels);
        let expected = extent
            .checked_len()
            .ok_or_else(|| Error::invalid_dimensions(extent, "sample count overflows usize"))?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                extent,
                format!("expected {} samples, got {}", expected, data.len()),
            ));
        }
        Ok(Self { data, extent })
    }

    /// Creates a zero-filled image with the same extents as `self`.
    pub fn zeros_like(&self) -> Self {
        Self {
            data: vec![0.0; self.data.len()],
            extent: self.extent,
        }
    }

    /// Columns per row.
    #[inline]
    pub fn width(&self) -> usize {
        self.extent.width
    }

    /// Rows per frame.
    #[inline]
    pub fn height(&self) -> usize {
        self.extent.height
    }

    /// Frames per channel.
    #[inline]
    pub fn frames(&self) -> usize {
        self.extent.frames
    }

    /// Number of channels.
    #[inline]
    pub fn channels(&self) -> usize {
        self.extent.channels
    }

    /// All four extents.
    #[inline]
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Total number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if any extent is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if both images have identical extents.
    #[inline]
    pub fn same_extent(&self, other: &Image) -> bool {
        self.extent == other.extent
    }

    /// Fails with [`Error::DimensionMismatch`] unless extents agree.
    pub fn ensure_same_extent(&self, other: &Image) -> Result<()> {
        if self.same_extent(other) {
            Ok(())
        } else {
            Err(Error::dimension_mismatch(self.extent, other.extent))
        }
    }

    /// Raw planar samples.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Mutable raw planar samples.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Consumes the image and returns its samples.
    #[inline]
    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    #[inline]
    fn offset(&self, x: usize, y: usize, t: usize, c: usize) -> usize {
        let e = &self.extent;
        ((c * e.frames + t) * e.height + y) * e.width + x
    }

    #[inline]
    fn contains(&self, x: usize, y: usize, t: usize, c: usize) -> bool {
        let e = &self.extent;
        x < e.width && y < e.height && t < e.frames && c < e.channels
    }

    /// Returns the sample at `(x, y, t, c)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize, t: usize, c: usize) -> f32 {
        debug_assert!(self.contains(x, y, t, c), "sample out of bounds");
        self.data[self.offset(x, y, t, c)]
    }

    /// Writes the sample at `(x, y, t, c)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, t: usize, c: usize, value: f32) {
        debug_assert!(self.contains(x, y, t, c), "sample out of bounds");
        let offset = self.offset(x, y, t, c);
        self.data[offset] = value;
    }

    /// Returns the sample at `(x, y, t, c)`, or `None` if out of bounds.
    #[inline]
    pub fn try_get(&self, x: usize, y: usize, t: usize, c: usize) -> Option<f32> {
        self.contains(x, y, t, c)
            .then(|| self.data[self.offset(x, y, t, c)])
    }

    /// Writes the sample at `(x, y, t, c)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if the coordinates are outside the image.
    pub fn try_set(&mut self, x: usize, y: usize, t: usize, c: usize, value: f32) -> Result<()> {
        if !self.contains(x, y, t, c) {
            return Err(Error::out_of_bounds(x, y, t, c, self.extent));
        }
        let offset = self.offset(x, y, t, c);
        self.data[offset] = value;
        Ok(())
    }

    /// Scanline `y` of frame `t`, channel `c`.
    #[inline]
    pub fn row(&self, y: usize, t: usize, c: usize) -> &[f32] {
        let start = self.offset(0, y, t, c);
        &self.data[start..start + self.extent.width]
    }

    /// Mutable scanline `y` of frame `t`, channel `c`.
    #[inline]
    pub fn row_mut(&mut self, y: usize, t: usize, c: usize) -> &mut [f32] {
        let start = self.offset(0, y, t, c);
        let width = self.extent.width;
        &mut self.data[start..start + width]
    }

    /// The `width * height` plane of frame `t`, channel `c`.
    #[inline]
    pub fn plane(&self, t: usize, c: usize) -> &[f32] {
        let start = self.offset(0, 0, t, c);
        &self.data[start..start + self.plane_len()]
    }

    /// Mutable plane of frame `t`, channel `c`.
    #[inline]
    pub fn plane_mut(&mut self, t: usize, c: usize) -> &mut [f32] {
        let start = self.offset(0, 0, t, c);
        let len = self.plane_len();
        &mut self.data[start..start + len]
    }

    /// Samples per plane.
    #[inline]
    pub fn plane_len(&self) -> usize {
        self.extent.width * self.extent.height
    }

    /// Iterates scanlines in storage order.
    ///
    /// The `n`-th row belongs to `y = n % height`, `t = (n / height) % frames`,
    /// `c = n / (height * frames)`.
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        // chunks() rejects a zero chunk size
        self.data.chunks(self.extent.width.max(1))
    }

    /// Iterates mutable scanlines in storage order.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [f32]> {
        let width = self.extent.width.max(1);
        self.data.chunks_mut(width)
    }

    /// Iterates `(t, c)` planes in storage order (`t` fastest).
    pub fn planes(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks(self.plane_len().max(1))
    }

    /// Iterates mutable `(t, c)` planes in storage order.
    pub fn planes_mut(&mut self) -> impl Iterator<Item = &mut [f32]> {
        let len = self.plane_len().max(1);
        self.data.chunks_mut(len)
    }
}

impl Index<(usize, usize, usize, usize)> for Image {
    type Output = f32;

    #[inline]
    fn index(&self, (x, y, t, c): (usize, usize, usize, usize)) -> &f32 {
        debug_assert!(self.contains(x, y, t, c), "sample out of bounds");
        &self.data[self.offset(x, y, t, c)]
    }
}

impl IndexMut<(usize, usize, usize, usize)> for Image {
    #[inline]
    fn index_mut(&mut self, (x, y, t, c): (usize, usize, usize, usize)) -> &mut f32 {
        debug_assert!(self.contains(x, y, t, c), "sample out of bounds");
        let offset = self.offset(x, y, t, c);
        &mut self.data[offset]
    }
}
