//! Order-statistic window over a fixed set of slots.
//!
//! [`RankWindow`] answers "which value sits at percentile `p` among the
//! active members" while members are inserted and removed one slot at a
//! time. Values live in a flat slot buffer; two tournament trees over those
//! slots split the active members into a disjoint pair of partitions:
//!
//! - the **low** partition holds the smaller values and tracks its maximum,
//! - the **high** partition holds the larger values and tracks its minimum.
//!
//! Every node of either tree stores the slot of the winning member below it
//! and the number of active members below it. The maximum of the low
//! partition is the *pivot*. Inserts compare against the pivot so that
//! `max(low) <= min(high)` always holds; [`RankWindow::rebalance`] then only
//! has to shift members across the boundary until the partition sizes put
//! the requested rank at the pivot.
//!
//! Insert, remove and each rebalance step cost `O(log capacity)`.
//!
//! # Example
//!
//! ```rust
//! use rankfx_ops::select::RankWindow;
//!
//! let mut window = RankWindow::new(8);
//! for (slot, v) in [3.0, 9.0, 1.0, 7.0, 5.0].into_iter().enumerate() {
//!     window.insert(slot, v);
//! }
//! window.rebalance(0.5);
//! assert_eq!(window.pivot(), Some(5.0));
//!
//! window.remove(1); // drop the 9
//! window.rebalance(1.0);
//! assert_eq!(window.pivot(), Some(7.0));
//! ```

/// Tree node: winning slot and number of active members in the subtree.
///
/// With `count == 0` the slot is meaningless.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Node {
    slot: u32,
    count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Low,
    High,
}

/// Dual-partition order-statistic structure with a fixed number of slots.
#[derive(Debug, Clone)]
pub struct RankWindow {
    values: Vec<f32>,
    /// Max-tree over the low partition.
    low: Vec<Node>,
    /// Min-tree over the high partition.
    high: Vec<Node>,
}

impl RankWindow {
    /// Creates an empty window with `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or does not fit in `u32`.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "rank window needs at least one slot");
        assert!(
            u32::try_from(capacity).is_ok(),
            "rank window capacity {capacity} exceeds u32"
        );
        let mut window = Self {
            values: vec![0.0; capacity],
            low: vec![Node::default(); 2 * capacity - 1],
            high: vec![Node::default(); 2 * capacity - 1],
        };
        window.clear();
        window
    }

    /// Number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.values.len()
    }

    /// Makes every slot inactive.
    pub fn clear(&mut self) {
        let first_leaf = self.first_leaf();
        for tree in [&mut self.low, &mut self.high] {
            tree.fill(Node::default());
            for (slot, leaf) in tree[first_leaf..].iter_mut().enumerate() {
                leaf.slot = slot as u32;
            }
        }
    }

    /// Number of active members.
    #[inline]
    pub fn len(&self) -> usize {
        (self.low[0].count + self.high[0].count) as usize
    }

    /// Returns `true` if no slot is active.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of members in the low partition.
    #[inline]
    pub fn low_len(&self) -> usize {
        self.low[0].count as usize
    }

    /// Number of members in the high partition.
    #[inline]
    pub fn high_len(&self) -> usize {
        self.high[0].count as usize
    }

    /// Returns `true` if `slot` currently holds a member.
    #[inline]
    pub fn is_active(&self, slot: usize) -> bool {
        let leaf = self.leaf(slot);
        self.low[leaf].count + self.high[leaf].count != 0
    }

    /// The maximum of the low partition, or `None` if it is empty.
    ///
    /// After [`rebalance`](Self::rebalance) on a non-empty window this is the
    /// requested percentile.
    #[inline]
    pub fn pivot(&self) -> Option<f32> {
        let root = self.low[0];
        (root.count != 0).then(|| self.values[root.slot as usize])
    }

    /// Activates `slot` with `value`.
    ///
    /// The slot must be inactive.
    pub fn insert(&mut self, slot: usize, value: f32) {
        debug_assert!(!self.is_active(slot), "slot {slot} is already active");
        let side = match self.pivot() {
            Some(pivot) if value < pivot => Side::Low,
            Some(_) => Side::High,
            // Anything may join the low side of an empty window; with only
            // high members present the ordering forces the high side.
            None if self.is_empty() => Side::Low,
            None => Side::High,
        };
        self.values[slot] = value;
        self.assign(self.leaf(slot), Some(side));
    }

    /// Deactivates `slot`.
    pub fn remove(&mut self, slot: usize) {
        debug_assert!(self.is_active(slot), "slot {slot} is not active");
        self.assign(self.leaf(slot), None);
    }

    /// Moves members between partitions so the pivot sits at `percentile`.
    ///
    /// The high partition is sized `floor(len * (1 - percentile))`, clamped
    /// so the low partition keeps at least one member. `0.0` selects the
    /// minimum, `0.5` the median and `1.0` the maximum.
    pub fn rebalance(&mut self, percentile: f32) {
        let total = self.len();
        if total == 0 {
            return;
        }
        let desired = ((total as f32 * (1.0 - percentile)) as usize).min(total - 1);

        while self.high_len() > desired {
            let leaf = self.leaf(self.high[0].slot as usize);
            self.assign(leaf, Some(Side::Low));
        }
        while self.high_len() < desired {
            let leaf = self.leaf(self.low[0].slot as usize);
            self.assign(leaf, Some(Side::High));
        }
    }

    #[inline]
    fn first_leaf(&self) -> usize {
        self.values.len() - 1
    }

    #[inline]
    fn leaf(&self, slot: usize) -> usize {
        debug_assert!(slot < self.values.len(), "slot {slot} out of range");
        slot + self.first_leaf()
    }

    /// Sets the membership of one leaf and refreshes both trees above it.
    fn assign(&mut self, leaf: usize, side: Option<Side>) {
        self.low[leaf].count = u32::from(side == Some(Side::Low));
        self.high[leaf].count = u32::from(side == Some(Side::High));
        propagate(&mut self.low, &self.values, leaf, |a, b| a > b);
        propagate(&mut self.high, &self.values, leaf, |a, b| a < b);
    }
}

/// Walks from `leaf` to the root, stopping early once a node is unchanged.
///
/// `wins(a, b)` is true when the left candidate beats the right one; ties go
/// to the right child.
fn propagate(tree: &mut [Node], values: &[f32], leaf: usize, wins: impl Fn(f32, f32) -> bool) {
    let mut p = leaf;
    while p > 0 {
        p = (p - 1) / 2;
        let a = tree[2 * p + 1];
        let b = tree[2 * p + 2];
        let slot = match (a.count, b.count) {
            (_, 0) => a.slot,
            (0, _) => b.slot,
            _ if wins(values[a.slot as usize], values[b.slot as usize]) => a.slot,
            _ => b.slot,
        };
        let parent = Node {
            slot,
            count: a.count + b.count,
        };
        if tree[p] == parent {
            break;
        }
        tree[p] = parent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Reference: sort the active members and pick the same rank.
    fn brute(active: &[Option<f32>], percentile: f32) -> Option<f32> {
        let mut members: Vec<f32> = active.iter().flatten().copied().collect();
        if members.is_empty() {
            return None;
        }
        members.sort_by(|a, b| b.total_cmp(a));
        let total = members.len();
        let rank = ((total as f32 * (1.0 - percentile)) as usize).min(total - 1);
        Some(members[rank])
    }

    #[test]
    fn test_empty_window() {
        let mut window = RankWindow::new(4);
        assert!(window.is_empty());
        assert_eq!(window.pivot(), None);
        window.rebalance(0.5);
        assert_eq!(window.pivot(), None);
    }

    #[test]
    fn test_single_member_any_percentile() {
        let mut window = RankWindow::new(1);
        window.insert(0, 42.0);
        for p in [0.0, 0.3, 0.5, 0.999, 1.0] {
            window.rebalance(p);
            assert_eq!(window.pivot(), Some(42.0));
            assert_eq!(window.low_len(), 1);
        }
    }

    #[test]
    fn test_min_median_max() {
        let mut window = RankWindow::new(16);
        let values = [12.0, 3.0, 8.0, 15.0, 1.0, 9.0, 4.0];
        for (slot, v) in values.into_iter().enumerate() {
            window.insert(slot * 2, v);
        }
        window.rebalance(0.0);
        assert_eq!(window.pivot(), Some(1.0));
        window.rebalance(0.5);
        assert_eq!(window.pivot(), Some(8.0));
        window.rebalance(0.999);
        assert_eq!(window.pivot(), Some(15.0));
        assert_eq!(window.len(), 7);
    }

    #[test]
    fn test_partition_sizes_after_rebalance() {
        let mut window = RankWindow::new(32);
        for slot in 0..25 {
            window.insert(slot, slot as f32);
        }
        window.rebalance(0.5);
        assert_eq!(window.high_len(), 12);
        assert_eq!(window.low_len(), 13);
        window.rebalance(0.0);
        assert_eq!(window.high_len(), 24);
        window.rebalance(1.0);
        assert_eq!(window.high_len(), 0);
    }

    #[test]
    fn test_remove_and_reinsert_slot() {
        let mut window = RankWindow::new(3);
        window.insert(0, 1.0);
        window.insert(1, 2.0);
        window.insert(2, 3.0);
        window.remove(2);
        assert!(!window.is_active(2));
        window.insert(2, -5.0);
        window.rebalance(0.0);
        assert_eq!(window.pivot(), Some(-5.0));
    }

    #[test]
    fn test_clear() {
        let mut window = RankWindow::new(5);
        for slot in 0..5 {
            window.insert(slot, slot as f32);
        }
        window.clear();
        assert!(window.is_empty());
        assert!((0..5).all(|slot| !window.is_active(slot)));
        window.insert(3, 7.0);
        window.rebalance(0.5);
        assert_eq!(window.pivot(), Some(7.0));
    }

    #[test]
    fn test_ties() {
        let mut window = RankWindow::new(6);
        for (slot, v) in [2.0, 2.0, 1.0, 2.0, 3.0, 2.0].into_iter().enumerate() {
            window.insert(slot, v);
        }
        window.rebalance(0.5);
        assert_eq!(window.pivot(), Some(2.0));
        window.rebalance(0.0);
        assert_eq!(window.pivot(), Some(1.0));
    }

    #[test]
    fn test_random_operations_match_sort() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for capacity in [1usize, 2, 3, 7, 16, 49] {
            let mut window = RankWindow::new(capacity);
            let mut active = vec![None; capacity];
            for _ in 0..600 {
                let slot = rng.gen_range(0..capacity);
                match active[slot] {
                    Some(_) => {
                        window.remove(slot);
                        active[slot] = None;
                    }
                    None => {
                        // Coarse values force plenty of ties
                        let v = rng.gen_range(0..20) as f32;
                        window.insert(slot, v);
                        active[slot] = Some(v);
                    }
                }
                if rng.gen_bool(0.3) {
                    let p = rng.gen_range(0.0f32..1.0);
                    window.rebalance(p);
                    assert_eq!(window.pivot(), brute(&active, p), "capacity {capacity}");
                }
            }
        }
    }

    #[test]
    fn test_pivot_monotonic_in_percentile() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut window = RankWindow::new(40);
        for slot in 0..40 {
            window.insert(slot, rng.gen_range(-1.0f32..1.0));
        }
        let mut last = f32::NEG_INFINITY;
        for step in 0..=100 {
            window.rebalance(step as f32 / 100.0);
            let pivot = window.pivot().unwrap();
            assert!(pivot >= last);
            last = pivot;
        }
    }
}
