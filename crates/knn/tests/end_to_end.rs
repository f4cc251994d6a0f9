//! Hand-checked classification scenarios.

use approx::assert_abs_diff_eq;
use knnsweep_knn::{KnnConfig, Neighbor, TrainingSet, classify, neighbor_distances};

/// Unit square: (0,0)->0, (1,0)->1, (0,1)->0, (1,1)->1.
fn square() -> (Vec<f32>, Vec<f32>) {
    (
        vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0],
        vec![1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0],
    )
}

/// Squared-Euclidean reciprocal KNN: threshold 0, exponent 2.
fn euclidean() -> KnnConfig {
    KnnConfig::new().with_threshold(0.0).with_exponent(2.0)
}

#[test]
fn nearest_neighbor_is_origin() {
    let (inputs, labels) = square();
    let train = TrainingSet::new(&inputs, &labels, 2, 2).unwrap();
    let p = classify(&[0.1, 0.1], &train, 1, &euclidean()).unwrap();
    assert_eq!(p.class(), 0);
    assert_abs_diff_eq!(p.scores()[0], 1.0, epsilon = 1e-6);
}

#[test]
fn three_nearest_resolve_to_class_zero() {
    let (inputs, labels) = square();
    let train = TrainingSet::new(&inputs, &labels, 2, 2).unwrap();
    let p = classify(&[0.1, 0.1], &train, 3, &euclidean()).unwrap();
    assert_eq!(p.class(), 0);

    // Neighbors: (0,0) d=0.02, (1,0) d=0.82, (0,1) d=0.82.
    let w0 = 1.0 / (0.02f32 + 1e-7);
    let w1 = 1.0 / (0.82f32 + 1e-7);
    let total = w0 + 2.0 * w1;
    assert_abs_diff_eq!(p.scores()[0], (w0 + w1) / total, epsilon = 1e-4);
    assert_abs_diff_eq!(p.scores()[1], w1 / total, epsilon = 1e-4);
}

#[test]
fn squared_euclidean_distances_match_hand_computation() {
    let (inputs, labels) = square();
    let train = TrainingSet::new(&inputs, &labels, 2, 2).unwrap();
    let mut out: Vec<Neighbor> = Vec::new();
    neighbor_distances(&[0.1, 0.1], &train, 0.0, 2.0, &mut out);
    let expected = [0.02, 0.82, 0.82, 1.62];
    for (n, want) in out.iter().zip(expected) {
        assert_abs_diff_eq!(n.distance, want, epsilon = 1e-6);
    }
}

#[test]
fn all_four_neighbors_split_by_weight() {
    let (inputs, labels) = square();
    let train = TrainingSet::new(&inputs, &labels, 2, 2).unwrap();
    // Query near (1,1): class 1 has both the nearest and the farthest.
    let p = classify(&[0.8, 0.9], &train, 4, &euclidean()).unwrap();
    assert_eq!(p.class(), 1);
    assert_abs_diff_eq!(p.scores().iter().sum::<f32>(), 1.0, epsilon = 1e-5);
}
