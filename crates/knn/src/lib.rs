//! Thresholded-distance weighted k-nearest-neighbor classification.
//!
//! The distance between a query `q` and a training row `t` is
//!
//! ```text
//! d(q, t) = Σᵢ |qᵢ − tᵢ|^exponent   over dimensions with |qᵢ − tᵢ| > threshold
//! ```
//!
//! and each of the `k` nearest rows votes with its one-hot label scaled by a
//! weight derived from its distance:
//!
//! | Weighting | Formula | Notes |
//! |-----------|---------|-------|
//! | Uniform | `1` | Plain majority vote |
//! | Reciprocal | `1 / (d + ε)` | Default |
//! | ReciprocalRooted | `1 / (d^(1/exponent) + ε)` | Vote on the rooted distance |
//!
//! # Quick start
//!
//! ```
//! use knnsweep_knn::{KnnConfig, TrainingSet, classify};
//!
//! let inputs = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0];
//! let labels = [1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0];
//! let train = TrainingSet::new(&inputs, &labels, 2, 2).unwrap();
//!
//! let prediction = classify(&[0.1, 0.1], &train, 3, &KnnConfig::new()).unwrap();
//! assert_eq!(prediction.class(), 0);
//! ```
//!
//! # Architecture
//!
//! ```text
//! classify_range_with_scratch()
//!   ├─ validate inputs
//!   ├─ neighbor_distances()   (distance.rs)
//!   ├─ rank_nearest()         (select.rs)
//!   └─ predict_range()        (predict.rs)
//! ```
//!
//! The batched path ranks once and scores every k in a [`KRange`] in a single
//! pass, so sweeping many k values costs one sort per query. For hot loops,
//! reuse a [`KnnScratch`] to avoid per-call heap allocation.

pub mod config;
pub mod distance;
pub mod error;
pub mod knn;
pub mod predict;
pub mod result;
pub mod select;
pub mod training;

pub use config::{DEFAULT_EPSILON, KRange, KnnConfig, WeightParams, Weighting};
pub use distance::{Neighbor, neighbor_distances};
pub use error::KnnError;
pub use knn::{KnnScratch, classify, classify_range_with_scratch, classify_with_scratch};
pub use predict::{argmax, predict, predict_range};
pub use result::Prediction;
pub use select::{rank_nearest, rank_neighbors};
pub use training::TrainingSet;
