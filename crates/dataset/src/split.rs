//! Labeled example containers.

use crate::error::DataError;

/// One set of labeled examples stored as flat row-major buffers.
///
/// Holds `len()` feature vectors of `n_dims` values, their one-hot label
/// vectors of `n_classes` values, and the cached integer class of each
/// example.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    /// Feature vectors, `[len × n_dims]`.
    inputs: Vec<f32>,
    /// One-hot label vectors, `[len × n_classes]`.
    labels: Vec<f32>,
    /// Class index of each example.
    classes: Vec<usize>,
    /// Feature dimensionality.
    n_dims: usize,
    /// Number of classes.
    n_classes: usize,
}

impl Split {
    /// Creates a new `Split` from feature and one-hot label buffers.
    ///
    /// # Errors
    ///
    /// - [`DataError::InvalidConfig`] if `n_dims` or `n_classes` is zero
    /// - [`DataError::ShapeMismatch`] if a buffer length is not a multiple of
    ///   its row width, or the two buffers hold different row counts
    /// - [`DataError::NotOneHot`] if a label row is not exactly one `1.0`
    ///   with every other entry `0.0`
    pub fn new(
        inputs: Vec<f32>,
        labels: Vec<f32>,
        n_dims: usize,
        n_classes: usize,
    ) -> Result<Self, DataError> {
        check_widths(n_dims, n_classes)?;
        let n_rows = rows_of("inputs", inputs.len(), n_dims)?;
        let label_rows = rows_of("labels", labels.len(), n_classes)?;
        if label_rows != n_rows {
            return Err(DataError::ShapeMismatch {
                name: "labels",
                len: labels.len(),
                width: n_classes,
            });
        }

        let classes = labels
            .chunks_exact(n_classes)
            .enumerate()
            .map(|(row, label)| one_hot_class(label).ok_or(DataError::NotOneHot { row }))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            inputs,
            labels,
            classes,
            n_dims,
            n_classes,
        })
    }

    /// Creates a new `Split` from feature vectors and integer classes,
    /// expanding each class into a one-hot label vector.
    ///
    /// # Errors
    ///
    /// - [`DataError::InvalidConfig`] if `n_dims` or `n_classes` is zero
    /// - [`DataError::ShapeMismatch`] if `inputs` is not `classes.len()` rows
    /// - [`DataError::InvalidLabel`] if a class is `>= n_classes`
    pub fn from_classes(
        inputs: Vec<f32>,
        classes: Vec<usize>,
        n_dims: usize,
        n_classes: usize,
    ) -> Result<Self, DataError> {
        check_widths(n_dims, n_classes)?;
        let n_rows = rows_of("inputs", inputs.len(), n_dims)?;
        if n_rows != classes.len() {
            return Err(DataError::ShapeMismatch {
                name: "inputs",
                len: inputs.len(),
                width: n_dims,
            });
        }

        let mut labels = vec![0.0; n_rows * n_classes];
        for (row, &class) in classes.iter().enumerate() {
            if class >= n_classes {
                return Err(DataError::InvalidLabel {
                    row: row + 1,
                    label: i64::try_from(class).unwrap_or(i64::MAX),
                    n_classes,
                });
            }
            labels[row * n_classes + class] = 1.0;
        }

        Ok(Self {
            inputs,
            labels,
            classes,
            n_dims,
            n_classes,
        })
    }

    /// Returns the number of examples.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns `true` if the split holds no examples.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Returns the feature dimensionality.
    pub fn n_dims(&self) -> usize {
        self.n_dims
    }

    /// Returns the number of classes.
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Returns the flat feature buffer.
    pub fn inputs(&self) -> &[f32] {
        &self.inputs
    }

    /// Returns the flat one-hot label buffer.
    pub fn labels(&self) -> &[f32] {
        &self.labels
    }

    /// Returns the cached class of every example.
    pub fn classes(&self) -> &[usize] {
        &self.classes
    }

    /// Returns the feature vector of example `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= len()`.
    pub fn input(&self, i: usize) -> &[f32] {
        &self.inputs[i * self.n_dims..(i + 1) * self.n_dims]
    }

    /// Iterates over `(feature vector, class)` pairs in example order.
    pub fn examples(&self) -> impl Iterator<Item = (&[f32], usize)> + '_ {
        self.inputs
            .chunks_exact(self.n_dims)
            .zip(self.classes.iter().copied())
    }
}

/// A training split and a test split sharing `n_dims` and `n_classes`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    train: Split,
    test: Split,
}

impl Dataset {
    /// Pairs a training and a test split.
    ///
    /// # Errors
    ///
    /// - [`DataError::EmptySplit`] if `train` is empty
    /// - [`DataError::DimensionMismatch`] if the splits disagree on `n_dims`
    ///   or `n_classes`
    pub fn new(train: Split, test: Split) -> Result<Self, DataError> {
        if train.is_empty() {
            return Err(DataError::EmptySplit { name: "train" });
        }
        if train.n_dims() != test.n_dims() {
            return Err(DataError::DimensionMismatch {
                name: "n_dims",
                train: train.n_dims(),
                test: test.n_dims(),
            });
        }
        if train.n_classes() != test.n_classes() {
            return Err(DataError::DimensionMismatch {
                name: "n_classes",
                train: train.n_classes(),
                test: test.n_classes(),
            });
        }
        Ok(Self { train, test })
    }

    /// Returns the training split.
    pub fn train(&self) -> &Split {
        &self.train
    }

    /// Returns the test split.
    pub fn test(&self) -> &Split {
        &self.test
    }

    /// Returns the shared feature dimensionality.
    pub fn n_dims(&self) -> usize {
        self.train.n_dims()
    }

    /// Returns the shared number of classes.
    pub fn n_classes(&self) -> usize {
        self.train.n_classes()
    }
}

fn check_widths(n_dims: usize, n_classes: usize) -> Result<(), DataError> {
    if n_dims == 0 {
        return Err(DataError::InvalidConfig {
            reason: "n_dims must be at least 1".into(),
        });
    }
    if n_classes == 0 {
        return Err(DataError::InvalidConfig {
            reason: "n_classes must be at least 1".into(),
        });
    }
    Ok(())
}

fn rows_of(name: &'static str, len: usize, width: usize) -> Result<usize, DataError> {
    if !len.is_multiple_of(width) {
        return Err(DataError::ShapeMismatch { name, len, width });
    }
    Ok(len / width)
}

/// Position of the single `1.0` in a one-hot row, `None` otherwise.
fn one_hot_class(label: &[f32]) -> Option<usize> {
    let mut class = None;
    for (i, &v) in label.iter().enumerate() {
        if v == 1.0 {
            if class.is_some() {
                return None;
            }
            class = Some(i);
        } else if v != 0.0 {
            return None;
        }
    }
    class
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> Split {
        Split::new(vec![0.0, 0.5, 1.0, 0.25], vec![0.0, 1.0, 1.0, 0.0], 2, 2).unwrap()
    }

    #[test]
    fn caches_classes() {
        let s = two_by_two();
        assert_eq!(s.len(), 2);
        assert_eq!(s.classes(), &[1, 0]);
        assert_eq!(s.input(1), &[1.0, 0.25]);
    }

    #[test]
    fn examples_pairs_rows_with_classes() {
        let s = two_by_two();
        let pairs: Vec<(&[f32], usize)> = s.examples().collect();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0, &[0.0, 0.5]);
        assert_eq!(pairs[1].1, 0);
    }

    #[test]
    fn rejects_two_hot() {
        let err = Split::new(vec![0.0, 0.0], vec![1.0, 1.0], 2, 2).unwrap_err();
        assert!(matches!(err, DataError::NotOneHot { row: 0 }));
    }

    #[test]
    fn rejects_all_zero_label() {
        let err = Split::new(vec![0.0, 0.0], vec![0.0, 0.0], 2, 2).unwrap_err();
        assert!(matches!(err, DataError::NotOneHot { row: 0 }));
    }

    #[test]
    fn rejects_fractional_label() {
        let err = Split::new(vec![0.0], vec![0.5, 0.5], 1, 2).unwrap_err();
        assert!(matches!(err, DataError::NotOneHot { row: 0 }));
    }

    #[test]
    fn rejects_row_count_mismatch() {
        let err = Split::new(vec![0.0, 0.0, 0.0], vec![1.0, 0.0], 1, 2).unwrap_err();
        assert!(matches!(err, DataError::ShapeMismatch { name: "labels", .. }));
    }

    #[test]
    fn rejects_ragged_inputs() {
        let err = Split::new(vec![0.0, 0.0, 0.0], vec![1.0, 0.0], 2, 2).unwrap_err();
        assert!(matches!(err, DataError::ShapeMismatch { name: "inputs", .. }));
    }

    #[test]
    fn from_classes_builds_one_hot() {
        let s = Split::from_classes(vec![0.1, 0.2, 0.3], vec![2, 0, 1], 1, 3).unwrap();
        assert_eq!(
            s.labels(),
            &[0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
        );
        assert_eq!(s.classes(), &[2, 0, 1]);
    }

    #[test]
    fn from_classes_rejects_out_of_range() {
        let err = Split::from_classes(vec![0.1], vec![3], 1, 3).unwrap_err();
        assert!(matches!(err, DataError::InvalidLabel { row: 1, label: 3, .. }));
    }

    #[test]
    fn empty_split_is_allowed() {
        let s = Split::new(Vec::new(), Vec::new(), 4, 2).unwrap();
        assert!(s.is_empty());
    }

    #[test]
    fn dataset_rejects_empty_train() {
        let empty = Split::new(Vec::new(), Vec::new(), 2, 2).unwrap();
        let err = Dataset::new(empty, two_by_two()).unwrap_err();
        assert!(matches!(err, DataError::EmptySplit { name: "train" }));
    }

    #[test]
    fn dataset_rejects_dim_mismatch() {
        let test = Split::from_classes(vec![0.0; 3], vec![0], 3, 2).unwrap();
        let err = Dataset::new(two_by_two(), test).unwrap_err();
        assert!(matches!(
            err,
            DataError::DimensionMismatch {
                name: "n_dims",
                train: 2,
                test: 3
            }
        ));
    }

    #[test]
    fn dataset_rejects_class_mismatch() {
        let test = Split::from_classes(vec![0.0; 2], vec![0], 2, 3).unwrap();
        let err = Dataset::new(two_by_two(), test).unwrap_err();
        assert!(matches!(
            err,
            DataError::DimensionMismatch {
                name: "n_classes",
                ..
            }
        ));
    }
}
