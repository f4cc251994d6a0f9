//! Per-combination evaluation over the whole test split.

use knnsweep_dataset::Dataset;
use knnsweep_knn::{KnnConfig, KnnScratch, TrainingSet, classify_range_with_scratch};

use crate::error::SweepError;
use crate::grid::SweepParameters;

/// Per-worker buffers reused across combinations.
#[derive(Debug, Clone)]
pub struct EvalScratch {
    knn: KnnScratch,
    /// Correct count per k in the current combination's range.
    correct: Vec<usize>,
}

impl EvalScratch {
    /// Sizes buffers for `n_train` training rows and batches of up to
    /// `max_k_count` k values over `n_classes` classes.
    pub fn new(n_train: usize, max_k_count: usize, n_classes: usize) -> Self {
        Self {
            knn: KnnScratch::with_k_capacity(n_train, max_k_count, n_classes),
            correct: Vec::with_capacity(max_k_count),
        }
    }

    /// Sizes buffers for every combination of a sweep over `dataset`.
    pub fn for_dataset(dataset: &Dataset, max_k_count: usize) -> Self {
        Self::new(dataset.train().len(), max_k_count, dataset.n_classes())
    }
}

/// Borrowed classifier view of the training split.
///
/// # Errors
///
/// Returns [`SweepError::Knn`] if the training split is empty.
pub fn training_set(dataset: &Dataset) -> Result<TrainingSet<'_>, SweepError> {
    let train = dataset.train();
    Ok(TrainingSet::new(
        train.inputs(),
        train.labels(),
        train.n_dims(),
        train.n_classes(),
    )?)
}

/// Counts correct test predictions for every k in `params.k_range()`.
///
/// Test examples are visited in index order. Entry `j` of the returned slice
/// is the count for `k = params.k_range().min() + j`; the slice borrows
/// `scratch` and is valid until its next use.
///
/// # Errors
///
/// Returns [`SweepError::Knn`] if the combination's threshold or exponent is
/// not finite, or the k range is invalid.
pub fn evaluate<'s>(
    train: &TrainingSet<'_>,
    dataset: &Dataset,
    params: &SweepParameters,
    base: &KnnConfig,
    scratch: &'s mut EvalScratch,
) -> Result<&'s [usize], SweepError> {
    let config = params.knn_config(base);
    let k_range = params.k_range();

    scratch.correct.clear();
    scratch.correct.resize(k_range.count(), 0);

    for (query, truth) in dataset.test().examples() {
        let classes =
            classify_range_with_scratch(query, train, k_range, &config, &mut scratch.knn)?;
        for (count, &class) in scratch.correct.iter_mut().zip(classes) {
            if class == truth {
                *count += 1;
            }
        }
    }
    Ok(&scratch.correct)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::KSweep;
    use knnsweep_dataset::Split;

    /// Two well separated 1-D clusters, test points drawn from each.
    fn clusters() -> Dataset {
        let train = Split::from_classes(
            vec![0.0, 0.05, 0.1, 0.9, 0.95, 1.0],
            vec![0, 0, 0, 1, 1, 1],
            1,
            2,
        )
        .unwrap();
        let test = Split::from_classes(vec![0.02, 0.97, 0.08, 0.6], vec![0, 1, 0, 1], 1, 2).unwrap();
        Dataset::new(train, test).unwrap()
    }

    #[test]
    fn test_counts_per_k() {
        let dataset = clusters();
        let train = training_set(&dataset).unwrap();
        let mut scratch = EvalScratch::for_dataset(&dataset, 6);
        let params = SweepParameters::new(KSweep::new(1, 6, 1), 0.0, 2.0);
        let counts = evaluate(&train, &dataset, &params, &KnnConfig::new(), &mut scratch).unwrap();
        assert_eq!(counts.len(), 6);
        // Every test point sits nearest its own cluster.
        assert_eq!(counts[0], 4);
        assert!(counts.iter().all(|&c| c <= 4));
    }

    #[test]
    fn test_batched_matches_single() {
        let dataset = clusters();
        let train = training_set(&dataset).unwrap();
        let base = KnnConfig::new();
        let mut scratch = EvalScratch::for_dataset(&dataset, 6);
        let batched = evaluate(
            &train,
            &dataset,
            &SweepParameters::new(KSweep::new(1, 6, 1), 0.01, 1.5),
            &base,
            &mut scratch,
        )
        .unwrap()
        .to_vec();
        for k in 1..=6 {
            let single = evaluate(
                &train,
                &dataset,
                &SweepParameters::new(KSweep::single(k), 0.01, 1.5),
                &base,
                &mut scratch,
            )
            .unwrap();
            assert_eq!(single, &[batched[k - 1]], "k={k}");
        }
    }

    #[test]
    fn test_threshold_one_zeroes_distances() {
        let dataset = clusters();
        let train = training_set(&dataset).unwrap();
        let mut scratch = EvalScratch::for_dataset(&dataset, 1);
        // All distances 0: k=1 picks training row 0 (class 0) for every query.
        let params = SweepParameters::new(KSweep::single(1), 1.0, 2.0);
        let counts = evaluate(&train, &dataset, &params, &KnnConfig::new(), &mut scratch).unwrap();
        assert_eq!(counts, &[2]);
    }

    #[test]
    fn test_non_finite_exponent_is_error() {
        let dataset = clusters();
        let train = training_set(&dataset).unwrap();
        let mut scratch = EvalScratch::for_dataset(&dataset, 1);
        let params = SweepParameters::new(KSweep::single(1), 0.0, f32::NAN);
        let result = evaluate(&train, &dataset, &params, &KnnConfig::new(), &mut scratch);
        assert!(matches!(result, Err(SweepError::Knn(_))));
    }
}
