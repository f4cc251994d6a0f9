//! Edge case integration tests.

use knnsweep_knn::{
    KRange, KnnConfig, KnnScratch, TrainingSet, classify, classify_range_with_scratch,
};

/// Single training row: always predicted.
#[test]
fn single_training_row() {
    let inputs = [0.3, 0.7];
    let labels = [0.0, 0.0, 1.0];
    let train = TrainingSet::new(&inputs, &labels, 2, 3).unwrap();
    let p = classify(&[0.9, 0.1], &train, 10, &KnnConfig::new()).unwrap();
    assert_eq!(p.class(), 2);
}

/// Exact match: epsilon keeps the weight finite and the match dominates.
#[test]
fn exact_match_dominates() {
    let inputs = [0.5, 0.5, 0.4, 0.4, 0.6, 0.6];
    let labels = [1.0, 0.0, 0.0, 1.0, 0.0, 1.0];
    let train = TrainingSet::new(&inputs, &labels, 2, 2).unwrap();
    let p = classify(&[0.5, 0.5], &train, 3, &KnnConfig::new()).unwrap();
    assert_eq!(p.class(), 0);
    assert!(p.scores().iter().all(|s| s.is_finite()));
}

/// Threshold >= 1 zeroes every distance; all neighbors weigh the same.
#[test]
fn threshold_one_degenerates_to_majority() {
    let inputs = [0.0, 0.2, 0.4, 0.6, 0.8];
    let labels = [0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0];
    let train = TrainingSet::new(&inputs, &labels, 1, 2).unwrap();
    let config = KnnConfig::new().with_threshold(1.0);
    let p = classify(&[0.0], &train, 5, &config).unwrap();
    // classes: 1, 0, 1, 1, 0 -> three votes for class 1
    assert_eq!(p.class(), 1);
    assert!((p.scores()[1] - 0.6).abs() < 1e-6);
}

/// Exponent 0: every surviving dimension contributes 1.
#[test]
fn exponent_zero_counts_differing_dimensions() {
    // row 0 differs from the query in 3 dims, row 1 in 1 dim
    let inputs = [0.9, 0.9, 0.9, 0.0, 0.0, 0.5, 0.0, 0.0];
    let labels = [1.0, 0.0, 0.0, 1.0];
    let train = TrainingSet::new(&inputs, &labels, 4, 2).unwrap();
    let config = KnnConfig::new().with_exponent(0.0);
    let p = classify(&[0.0, 0.0, 0.0, 0.0], &train, 1, &config).unwrap();
    assert_eq!(p.class(), 1);
}

/// Negative exponent with a kept zero difference produces infinity; the
/// result propagates silently rather than failing.
#[test]
fn negative_exponent_propagates_without_error() {
    let inputs = [0.5, 0.2];
    let labels = [1.0, 0.0, 0.0, 1.0];
    let train = TrainingSet::new(&inputs, &labels, 1, 2).unwrap();
    let config = KnnConfig::new().with_threshold(-1.0).with_exponent(-1.0);
    let p = classify(&[0.5], &train, 2, &config).unwrap();
    assert!(p.class() < 2);
}

/// k range extending beyond the training set: tail buckets use every row.
#[test]
fn range_beyond_training_size() {
    let inputs = [0.0, 1.0, 2.0];
    let labels = [1.0, 0.0, 0.0, 1.0, 0.0, 1.0];
    let train = TrainingSet::new(&inputs, &labels, 1, 2).unwrap();
    let config = KnnConfig::new().with_exponent(1.0);
    let mut scratch = KnnScratch::new(3);
    let classes =
        classify_range_with_scratch(&[0.0], &train, KRange::new(1, 8), &config, &mut scratch)
            .unwrap()
            .to_vec();
    assert_eq!(classes.len(), 8);
    assert_eq!(classes[0], 0);
    // k >= 3 all see the same three rows.
    assert!(classes[2..].iter().all(|&c| c == classes[2]));
}
