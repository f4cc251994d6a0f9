//! Borrowed view over a labeled training set.

use crate::error::KnnError;

/// Row-major training inputs and one-hot labels, validated once.
///
/// `inputs` is `[n_rows × n_dims]` and `labels` is `[n_rows × n_classes]`.
/// The view never copies; it is cheap to construct and `Copy`, so it can be
/// shared across worker threads by value.
#[derive(Debug, Clone, Copy)]
pub struct TrainingSet<'a> {
    inputs: &'a [f32],
    labels: &'a [f32],
    n_dims: usize,
    n_classes: usize,
    n_rows: usize,
}

impl<'a> TrainingSet<'a> {
    /// Creates a validated view.
    ///
    /// # Errors
    ///
    /// Returns [`KnnError`] if the inputs are empty, either slice does not
    /// divide evenly into rows, or the two slices disagree on the row count.
    pub fn new(
        inputs: &'a [f32],
        labels: &'a [f32],
        n_dims: usize,
        n_classes: usize,
    ) -> Result<Self, KnnError> {
        if n_dims == 0 || !inputs.len().is_multiple_of(n_dims) {
            return Err(KnnError::InputsShapeMismatch {
                len: inputs.len(),
                n_dims,
            });
        }
        if n_classes == 0 || !labels.len().is_multiple_of(n_classes) {
            return Err(KnnError::LabelsShapeMismatch {
                len: labels.len(),
                n_classes,
            });
        }
        if inputs.is_empty() {
            return Err(KnnError::EmptyTrainingSet);
        }
        let n_rows = inputs.len() / n_dims;
        let label_rows = labels.len() / n_classes;
        if n_rows != label_rows {
            return Err(KnnError::RowCountMismatch {
                inputs: n_rows,
                labels: label_rows,
            });
        }
        Ok(Self {
            inputs,
            labels,
            n_dims,
            n_classes,
            n_rows,
        })
    }

    /// Number of training rows.
    pub fn len(&self) -> usize {
        self.n_rows
    }

    /// Always `false`: construction rejects empty training sets.
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    /// Feature dimensionality `D`.
    pub fn n_dims(&self) -> usize {
        self.n_dims
    }

    /// Number of classes `C`.
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// The flat input matrix.
    pub fn inputs(&self) -> &'a [f32] {
        self.inputs
    }

    /// Feature vector of row `i`.
    #[inline]
    pub fn input(&self, i: usize) -> &'a [f32] {
        &self.inputs[i * self.n_dims..(i + 1) * self.n_dims]
    }

    /// One-hot label vector of row `i`.
    #[inline]
    pub fn label(&self, i: usize) -> &'a [f32] {
        &self.labels[i * self.n_classes..(i + 1) * self.n_classes]
    }
}
