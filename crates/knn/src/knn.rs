//! KNN classification entry points and scratch buffer management.

use crate::config::{KRange, KnnConfig};
use crate::distance::{Neighbor, neighbor_distances};
use crate::error::KnnError;
use crate::predict::{predict, predict_range};
use crate::result::Prediction;
use crate::select::rank_nearest;
use crate::training::TrainingSet;

/// Pre-allocated scratch buffers for KNN classification.
///
/// Reuse across calls to [`classify_with_scratch`] and
/// [`classify_range_with_scratch`] to avoid heap allocation in the hot loop
/// (one call per test query, many thousands per sweep combination).
///
/// # Example
///
/// ```
/// use knnsweep_knn::KnnScratch;
///
/// let mut scratch = KnnScratch::new(1000);
/// // Use with classify_range_with_scratch() in a loop...
/// ```
#[derive(Debug, Clone)]
pub struct KnnScratch {
    /// One entry per training row.
    pub(crate) neighbors: Vec<Neighbor>,
    /// Score rows, one per k bucket.
    pub(crate) scores: Vec<f32>,
    /// Total vote weight per k bucket.
    pub(crate) weight_sums: Vec<f32>,
    /// Predicted class per k bucket.
    pub(crate) classes: Vec<usize>,
}

impl KnnScratch {
    /// Creates scratch buffers with capacity for `max_train` training rows.
    pub fn new(max_train: usize) -> Self {
        Self {
            neighbors: Vec::with_capacity(max_train),
            scores: Vec::new(),
            weight_sums: Vec::new(),
            classes: Vec::new(),
        }
    }

    /// Creates scratch buffers sized for `max_train` rows and batches of up to
    /// `max_k_count` k values over `n_classes` classes.
    pub fn with_k_capacity(max_train: usize, max_k_count: usize, n_classes: usize) -> Self {
        Self {
            neighbors: Vec::with_capacity(max_train),
            scores: Vec::with_capacity(max_k_count * n_classes),
            weight_sums: Vec::with_capacity(max_k_count),
            classes: Vec::with_capacity(max_k_count),
        }
    }

    /// Sizes the per-bucket buffers for `count` buckets of `n_classes` each.
    fn prepare_buckets(&mut self, count: usize, n_classes: usize) {
        self.scores.clear();
        self.scores.resize(count * n_classes, 0.0);
        self.weight_sums.clear();
        self.weight_sums.resize(count, 0.0);
        self.classes.clear();
        self.classes.resize(count, 0);
    }
}

/// Validates the query against the training set and configuration.
fn validate_query(
    query: &[f32],
    train: &TrainingSet<'_>,
    config: &KnnConfig,
) -> Result<(), KnnError> {
    config.validate()?;
    if query.len() != train.n_dims() {
        return Err(KnnError::QueryDimensionMismatch {
            query: query.len(),
            n_dims: train.n_dims(),
        });
    }
    Ok(())
}

/// Single-k classification assuming validated inputs.
fn classify_inner(
    query: &[f32],
    train: &TrainingSet<'_>,
    k: usize,
    config: &KnnConfig,
    scratch: &mut KnnScratch,
) -> Prediction {
    scratch.prepare_buckets(1, train.n_classes());

    // Step 1: Thresholded distances to every training row
    neighbor_distances(
        query,
        train,
        config.threshold(),
        config.exponent(),
        &mut scratch.neighbors,
    );

    // Step 2: Rank the k nearest
    let ranked = rank_nearest(&mut scratch.neighbors, k);

    // Step 3: Weighted vote
    let class = predict(
        ranked,
        train,
        k,
        config.weight_params(),
        &mut scratch.scores,
    );

    Prediction::new(class, scratch.scores.clone())
}

/// Classifies `query` with a single `k`, allocating scratch buffers internally.
///
/// This is the simple entry point. For hot loops, use
/// [`classify_with_scratch`] or [`classify_range_with_scratch`].
///
/// # Arguments
///
/// * `query` — feature vector `[n_dims]`
/// * `train` — validated training set view
/// * `k` — number of neighbors (clamped to the training set size)
/// * `config` — distance and weighting parameters
///
/// # Errors
///
/// Returns [`KnnError`] if `k` is zero, the configuration is invalid, or the
/// query length does not match the training dimensionality.
pub fn classify(
    query: &[f32],
    train: &TrainingSet<'_>,
    k: usize,
    config: &KnnConfig,
) -> Result<Prediction, KnnError> {
    let mut scratch = KnnScratch::new(train.len());
    classify_with_scratch(query, train, k, config, &mut scratch)
}

/// Classifies `query` with a single `k`, reusing pre-allocated scratch buffers.
///
/// Identical to [`classify`] but avoids reallocating the neighbor buffer.
///
/// # Errors
///
/// Returns [`KnnError`] if inputs are invalid.
pub fn classify_with_scratch(
    query: &[f32],
    train: &TrainingSet<'_>,
    k: usize,
    config: &KnnConfig,
    scratch: &mut KnnScratch,
) -> Result<Prediction, KnnError> {
    KRange::single(k).validate()?;
    validate_query(query, train, config)?;
    Ok(classify_inner(query, train, k, config, scratch))
}

/// Classifies `query` for every k in `k_range` from one ranking pass.
///
/// Distances are computed once, only the `k_range.max()` nearest are
/// ranked, and a single sweep over them fills one vote bucket per k.
/// Returns the predicted class for each k in ascending k order; the slice
/// borrows `scratch` and is valid until its next use.
///
/// # Errors
///
/// Returns [`KnnError`] if the range is invalid, the configuration is
/// invalid, or the query length does not match the training dimensionality.
pub fn classify_range_with_scratch<'s>(
    query: &[f32],
    train: &TrainingSet<'_>,
    k_range: KRange,
    config: &KnnConfig,
    scratch: &'s mut KnnScratch,
) -> Result<&'s [usize], KnnError> {
    k_range.validate()?;
    validate_query(query, train, config)?;

    scratch.prepare_buckets(k_range.count(), train.n_classes());
    neighbor_distances(
        query,
        train,
        config.threshold(),
        config.exponent(),
        &mut scratch.neighbors,
    );
    let ranked = rank_nearest(&mut scratch.neighbors, k_range.max());
    predict_range(
        ranked,
        train,
        k_range,
        config.weight_params(),
        &mut scratch.scores,
        &mut scratch.weight_sums,
        &mut scratch.classes,
    );
    Ok(&scratch.classes)
}
