//! Output type for single-k classification.

/// Result of a single-k classification query.
///
/// Contains the predicted class and the normalised per-class score vector it
/// was taken from.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Argmax of `scores`, lowest index on ties.
    class: usize,
    /// Weighted label average over the k nearest neighbors, length `n_classes`.
    scores: Vec<f32>,
}

impl Prediction {
    /// Creates a new `Prediction`.
    pub(crate) fn new(class: usize, scores: Vec<f32>) -> Self {
        Self { class, scores }
    }

    /// Returns the predicted class.
    pub fn class(&self) -> usize {
        self.class
    }

    /// Returns the per-class scores.
    pub fn scores(&self) -> &[f32] {
        &self.scores
    }
}
