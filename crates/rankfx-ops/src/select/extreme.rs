//! Sliding-window extremum tree.
//!
//! [`ExtremeTree`] keeps the last `2 * radius + 1` pushed values in the
//! leaves of a flat binary tree that doubles as a circular buffer. Every
//! internal node caches the extremum of its two children, so after a push
//! only the path from the written leaf to the root is refreshed and the
//! window extremum is always available at the root.
//!
//! ```text
//! nodes: [ root | internal ... | leaf leaf ... leaf ]
//!          0      1 .. 2r-1     2r  ...       4r
//! children of p: 2p+1, 2p+2
//! ```
//!
//! Empty leaves hold the policy's sentinel (`+inf` for [`Min`], `-inf` for
//! [`Max`]), which never wins a comparison against a real sample.
//!
//! # Example
//!
//! ```rust
//! use rankfx_ops::select::{ExtremeTree, Min};
//!
//! let mut tree = ExtremeTree::<Min>::new(1); // window of 3
//! for v in [5.0, 1.0, 4.0, 2.0] {
//!     tree.push(v);
//! }
//! assert_eq!(tree.query(), 1.0); // min of [1, 4, 2]
//! tree.push(8.0);
//! assert_eq!(tree.query(), 2.0); // min of [4, 2, 8]
//! ```

use std::fmt;
use std::marker::PhantomData;

/// Selection policy for an [`ExtremeTree`].
pub trait Extremum: Send + Sync + 'static {
    /// Value of an empty slot; loses every comparison.
    const SENTINEL: f32;

    /// Picks the winner of two candidates.
    fn select(a: f32, b: f32) -> f32;
}

/// Minimum-selection policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Min;

/// Maximum-selection policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Max;

impl Extremum for Min {
    const SENTINEL: f32 = f32::INFINITY;

    #[inline]
    fn select(a: f32, b: f32) -> f32 {
        a.min(b)
    }
}

impl Extremum for Max {
    const SENTINEL: f32 = f32::NEG_INFINITY;

    #[inline]
    fn select(a: f32, b: f32) -> f32 {
        a.max(b)
    }
}

/// Fixed-capacity extremum over the most recent `2 * radius + 1` values.
pub struct ExtremeTree<S: Extremum> {
    nodes: Vec<f32>,
    /// Index of the first leaf, `2 * radius`.
    first_leaf: usize,
    /// Next leaf to overwrite.
    pos: usize,
    _policy: PhantomData<S>,
}

impl<S: Extremum> ExtremeTree<S> {
    /// Creates a tree whose window spans `2 * radius + 1` values.
    pub fn new(radius: usize) -> Self {
        let first_leaf = 2 * radius;
        Self {
            nodes: vec![S::SENTINEL; 4 * radius + 1],
            first_leaf,
            pos: first_leaf,
            _policy: PhantomData,
        }
    }

    /// Number of values the window spans.
    #[inline]
    pub fn window(&self) -> usize {
        self.nodes.len() - self.first_leaf
    }

    /// Empties the window.
    pub fn reset(&mut self) {
        self.nodes.fill(S::SENTINEL);
        self.pos = self.first_leaf;
    }

    /// Pushes `value`, evicting the oldest value once the window is full.
    pub fn push(&mut self, value: f32) {
        let mut p = self.pos;
        self.nodes[p] = value;
        while p > 0 {
            p = (p - 1) / 2;
            self.nodes[p] = S::select(self.nodes[2 * p + 1], self.nodes[2 * p + 2]);
        }

        self.pos += 1;
        if self.pos == self.nodes.len() {
            self.pos = self.first_leaf;
        }
    }

    /// Extremum of the window, or the sentinel if nothing was pushed.
    #[inline]
    pub fn query(&self) -> f32 {
        self.nodes[0]
    }
}

impl<S: Extremum> fmt::Debug for ExtremeTree<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtremeTree")
            .field("window", &self.window())
            .field("query", &self.query())
            .finish()
    }
}
