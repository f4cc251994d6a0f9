//! Weighted label voting over ranked neighbors.
//!
//! Both entry points accumulate in the same order (ascending rank) so the
//! batched form reproduces the single-k form bit for bit.

use crate::config::{KRange, WeightParams};
use crate::distance::Neighbor;
use crate::training::TrainingSet;

/// Index of the first maximal element.
///
/// Scans low to high and only moves on a strictly greater value, so ties
/// resolve to the lowest index and NaN entries are never selected unless
/// they sit at index 0. Returns 0 for an empty slice.
pub fn argmax(values: &[f32]) -> usize {
    let Some((&first, rest)) = values.split_first() else {
        return 0;
    };
    let mut best = 0;
    let mut best_value = first;
    for (i, &v) in rest.iter().enumerate() {
        if v > best_value {
            best = i + 1;
            best_value = v;
        }
    }
    best
}

/// Scores classes from the first `min(k, ranked.len())` neighbors.
///
/// Each neighbor's one-hot label is scaled by its weight and summed into
/// `out`, which is then divided by the total weight. Returns the argmax of
/// the resulting score vector.
///
/// # Panics
///
/// Debug-asserts that `out.len() == train.n_classes()`.
pub fn predict(
    ranked: &[Neighbor],
    train: &TrainingSet<'_>,
    k: usize,
    weights: WeightParams,
    out: &mut [f32],
) -> usize {
    debug_assert_eq!(out.len(), train.n_classes());
    out.fill(0.0);

    let mut weight_sum = 0.0f32;
    for neighbor in ranked.iter().take(k) {
        let w = weights.weight(neighbor.distance);
        weight_sum += w;
        accumulate(out, train.label(neighbor.index), w);
    }
    for o in out.iter_mut() {
        *o /= weight_sum;
    }
    argmax(out)
}

/// Scores classes for every `k` in `k_range` from a single pass over `ranked`.
///
/// Bucket `j` (for `k = k_range.min() + j`) receives the neighbors at ranks
/// `0..k`; a neighbor at rank `r` is therefore added to every bucket whose
/// `k > r`. Buffers are laid out as:
///
/// - `scores`: `[k_range.count() × n_classes]`, normalised scores per bucket
/// - `weight_sums`: `[k_range.count()]`
/// - `classes`: `[k_range.count()]`, argmax per bucket
///
/// # Panics
///
/// Debug-asserts the buffer lengths above.
#[allow(clippy::too_many_arguments)]
pub fn predict_range(
    ranked: &[Neighbor],
    train: &TrainingSet<'_>,
    k_range: KRange,
    weights: WeightParams,
    scores: &mut [f32],
    weight_sums: &mut [f32],
    classes: &mut [usize],
) {
    let n_classes = train.n_classes();
    let count = k_range.count();
    debug_assert_eq!(scores.len(), count * n_classes);
    debug_assert_eq!(weight_sums.len(), count);
    debug_assert_eq!(classes.len(), count);

    scores.fill(0.0);
    weight_sums.fill(0.0);

    for (rank, neighbor) in ranked.iter().take(k_range.max()).enumerate() {
        let w = weights.weight(neighbor.distance);
        let label = train.label(neighbor.index);
        // First bucket with k > rank.
        let first = (rank + 1).saturating_sub(k_range.min());
        for bucket in first..count {
            weight_sums[bucket] += w;
            accumulate(
                &mut scores[bucket * n_classes..(bucket + 1) * n_classes],
                label,
                w,
            );
        }
    }

    for (bucket, (row, &weight_sum)) in scores
        .chunks_exact_mut(n_classes)
        .zip(weight_sums.iter())
        .enumerate()
    {
        for o in row.iter_mut() {
            *o /= weight_sum;
        }
        classes[bucket] = argmax(row);
    }
}

#[inline]
fn accumulate(out: &mut [f32], label: &[f32], w: f32) {
    for (o, &l) in out.iter_mut().zip(label) {
        *o += l * w;
    }
}
