//! Thresholded power distance computation.

use crate::training::TrainingSet;

/// A training row paired with its distance to the current query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Row index into the training set.
    pub index: usize,
    /// Thresholded distance from the query.
    pub distance: f32,
}

/// Computes thresholded power distances from `query` to every training row.
///
/// For each training row `t`:
/// ```text
/// d = Σᵢ |query[i] − t[i]|^exponent   over all i with |query[i] − t[i]| > threshold
/// ```
///
/// Differences at or below `threshold` contribute nothing. Degenerate
/// parameters are not special-cased: `exponent = 0` makes every surviving
/// dimension contribute 1, and a threshold at or above the largest possible
/// difference yields 0 for every row.
///
/// `out` is cleared and refilled with one [`Neighbor`] per training row, in
/// training order.
///
/// Dispatches to specialised kernels for `exponent` 1 and 2.
///
/// # Panics
///
/// Debug-asserts that `query.len() == train.n_dims()`.
pub fn neighbor_distances(
    query: &[f32],
    train: &TrainingSet<'_>,
    threshold: f32,
    exponent: f32,
    out: &mut Vec<Neighbor>,
) {
    debug_assert_eq!(query.len(), train.n_dims());
    out.clear();
    out.reserve(train.len());

    if exponent == 1.0 {
        fill(query, train, threshold, out, |d| d);
    } else if exponent == 2.0 {
        fill(query, train, threshold, out, |d| d * d);
    } else {
        fill(query, train, threshold, out, |d| d.powf(exponent));
    }
}

#[inline]
fn fill(
    query: &[f32],
    train: &TrainingSet<'_>,
    threshold: f32,
    out: &mut Vec<Neighbor>,
    contribution: impl Fn(f32) -> f32,
) {
    let rows = train.inputs().chunks_exact(train.n_dims());
    out.extend(rows.enumerate().map(|(index, row)| Neighbor {
        index,
        distance: thresholded_distance(query, row, threshold, &contribution),
    }));
}

#[inline]
fn thresholded_distance(
    query: &[f32],
    row: &[f32],
    threshold: f32,
    contribution: &impl Fn(f32) -> f32,
) -> f32 {
    let mut acc = 0.0f32;
    for (&q, &t) in query.iter().zip(row) {
        let diff = (q - t).abs();
        if diff <= threshold {
            continue;
        }
        acc += contribution(diff);
    }
    acc
}
