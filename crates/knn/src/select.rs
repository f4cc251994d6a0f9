//! Neighbor ranking and top-k selection.

use std::cmp::Ordering;

use crate::distance::Neighbor;

/// Total order on neighbors: ascending distance, ties by training index.
///
/// Distances compare with [`f32::total_cmp`], so NaN distances have a fixed
/// place (positive NaN after `+inf`) and every input has exactly one
/// ranking.
#[inline]
fn by_distance_then_index(a: &Neighbor, b: &Neighbor) -> Ordering {
    a.distance
        .total_cmp(&b.distance)
        .then_with(|| a.index.cmp(&b.index))
}

/// Sorts all neighbors into ascending-distance order.
///
/// Equal distances keep their original training-index order. The output
/// has the same length as the input and is identical across runs.
pub fn rank_neighbors(neighbors: &mut [Neighbor]) {
    neighbors.sort_unstable_by(by_distance_then_index);
}

/// Ranks only the `k` nearest neighbors and returns them in order.
///
/// Partitions with `select_nth_unstable_by` and sorts the `k`-prefix, so the
/// cost is `O(n + k log k)` instead of a full sort. Because the ordering is
/// total, the returned prefix equals the first `k` elements of
/// [`rank_neighbors`]. `k` is clamped to `neighbors.len()`; the tail beyond
/// the prefix is left in unspecified order.
pub fn rank_nearest(neighbors: &mut [Neighbor], k: usize) -> &[Neighbor] {
    let k = k.min(neighbors.len());
    if k == 0 {
        return &[];
    }
    if k < neighbors.len() {
        neighbors.select_nth_unstable_by(k - 1, by_distance_then_index);
    }
    let prefix = &mut neighbors[..k];
    prefix.sort_unstable_by(by_distance_then_index);
    prefix
}
