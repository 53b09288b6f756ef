//! Incrementally updatable selection structures.
//!
//! - [`ExtremeTree`] - min or max of the last `2r + 1` pushed values
//! - [`RankWindow`] - arbitrary percentile of an explicitly managed member set
//!
//! Both are flat arrays of fixed size addressed with `2p + 1` / `2p + 2`
//! child arithmetic; neither allocates after construction.

pub mod extreme;
pub mod rank;

pub use extreme::{ExtremeTree, Extremum, Max, Min};
pub use rank::RankWindow;
