//! Integration tests for KnnScratch reuse.

use knnsweep_knn::{
    KRange, KnnConfig, KnnScratch, TrainingSet, classify, classify_range_with_scratch,
    classify_with_scratch,
};

/// 1-D training set of `n` evenly spaced points, alternating classes.
fn line(n: usize) -> (Vec<f32>, Vec<f32>) {
    let inputs: Vec<f32> = (0..n).map(|i| i as f32 / n as f32).collect();
    let mut labels = vec![0.0; n * 2];
    for i in 0..n {
        labels[i * 2 + i % 2] = 1.0;
    }
    (inputs, labels)
}

/// Scratch version produces identical results to the allocating version.
#[test]
fn scratch_matches_non_scratch() {
    let (inputs, labels) = line(30);
    let train = TrainingSet::new(&inputs, &labels, 1, 2).unwrap();
    let config = KnnConfig::new().with_exponent(1.0);
    let mut scratch = KnnScratch::new(30);

    for q in 0..30 {
        let query = [q as f32 / 30.0 + 0.001];
        let a = classify(&query, &train, 5, &config).unwrap();
        let b = classify_with_scratch(&query, &train, 5, &config, &mut scratch).unwrap();
        assert_eq!(a, b);
    }
}

/// Many queries through one scratch, alternating between training sets of
/// different sizes and k ranges of different widths.
#[test]
fn reuse_across_varying_sizes() {
    let (small_in, small_lab) = line(5);
    let (large_in, large_lab) = line(200);
    let small = TrainingSet::new(&small_in, &small_lab, 1, 2).unwrap();
    let large = TrainingSet::new(&large_in, &large_lab, 1, 2).unwrap();
    let config = KnnConfig::new();
    let mut scratch = KnnScratch::with_k_capacity(5, 3, 2);

    for step in 0..100u32 {
        let query = [(step % 10) as f32 / 10.0];
        let (train, k_range) = if step % 2 == 0 {
            (&large, KRange::new(1, 20))
        } else {
            (&small, KRange::new(2, 4))
        };
        let classes =
            classify_range_with_scratch(&query, train, k_range, &config, &mut scratch).unwrap();
        assert_eq!(classes.len(), k_range.count());
        assert!(classes.iter().all(|&c| c < 2));
    }
}

/// Results after a large call are unaffected by leftover buffer contents.
#[test]
fn large_then_small_is_clean() {
    let (large_in, large_lab) = line(200);
    let (small_in, small_lab) = line(4);
    let large = TrainingSet::new(&large_in, &large_lab, 1, 2).unwrap();
    let small = TrainingSet::new(&small_in, &small_lab, 1, 2).unwrap();
    let config = KnnConfig::new();

    let mut reused = KnnScratch::new(1);
    classify_range_with_scratch(&[0.5], &large, KRange::new(1, 50), &config, &mut reused)
        .unwrap();
    let after_large = classify_range_with_scratch(
        &[0.3],
        &small,
        KRange::new(1, 4),
        &config,
        &mut reused,
    )
    .unwrap()
    .to_vec();

    let mut fresh = KnnScratch::new(4);
    let baseline =
        classify_range_with_scratch(&[0.3], &small, KRange::new(1, 4), &config, &mut fresh)
            .unwrap()
            .to_vec();

    assert_eq!(after_large, baseline);
}
