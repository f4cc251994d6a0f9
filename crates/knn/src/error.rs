//! Error types for the knnsweep-knn crate.

/// Error type for all fallible operations in the knnsweep-knn crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum KnnError {
    /// Returned when the training set has no rows.
    #[error("training set is empty")]
    EmptyTrainingSet,

    /// Returned when k is zero.
    #[error("k must be >= 1, got {k}")]
    InvalidK {
        /// The invalid k value.
        k: usize,
    },

    /// Returned when a k range has its bounds reversed.
    #[error("k range is empty: min {min} > max {max}")]
    InvalidKRange {
        /// Lower bound of the range.
        min: usize,
        /// Upper bound of the range.
        max: usize,
    },

    /// Returned when epsilon is non-finite or non-positive.
    #[error("epsilon must be finite and positive, got {epsilon}")]
    InvalidEpsilon {
        /// The invalid epsilon value.
        epsilon: f32,
    },

    /// Returned when the distance threshold or exponent is NaN or infinite.
    #[error("{name} must be finite, got {value}")]
    NonFiniteParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// The invalid value.
        value: f32,
    },

    /// Returned when the query length does not match the feature dimensionality.
    #[error("query length {query} does not match n_dims {n_dims}")]
    QueryDimensionMismatch {
        /// Length of the query slice.
        query: usize,
        /// Expected number of dimensions.
        n_dims: usize,
    },

    /// Returned when the inputs slice length is not divisible by n_dims.
    #[error("inputs length {len} is not divisible by n_dims {n_dims}")]
    InputsShapeMismatch {
        /// Length of the inputs slice.
        len: usize,
        /// Expected number of dimensions.
        n_dims: usize,
    },

    /// Returned when the labels slice length is not divisible by n_classes.
    #[error("labels length {len} is not divisible by n_classes {n_classes}")]
    LabelsShapeMismatch {
        /// Length of the labels slice.
        len: usize,
        /// Expected number of classes.
        n_classes: usize,
    },

    /// Returned when inputs and labels describe different numbers of rows.
    #[error("inputs have {inputs} rows but labels have {labels}")]
    RowCountMismatch {
        /// Rows implied by the inputs slice.
        inputs: usize,
        /// Rows implied by the labels slice.
        labels: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_empty_training_set() {
        let e = KnnError::EmptyTrainingSet;
        assert_eq!(e.to_string(), "training set is empty");
    }

    #[test]
    fn error_invalid_k() {
        let e = KnnError::InvalidK { k: 0 };
        assert_eq!(e.to_string(), "k must be >= 1, got 0");
    }

    #[test]
    fn error_invalid_k_range() {
        let e = KnnError::InvalidKRange { min: 5, max: 2 };
        assert_eq!(e.to_string(), "k range is empty: min 5 > max 2");
    }

    #[test]
    fn error_invalid_epsilon() {
        let e = KnnError::InvalidEpsilon { epsilon: -0.5 };
        assert_eq!(
            e.to_string(),
            "epsilon must be finite and positive, got -0.5"
        );
    }

    #[test]
    fn error_non_finite_parameter() {
        let e = KnnError::NonFiniteParameter {
            name: "exponent",
            value: f32::INFINITY,
        };
        assert_eq!(e.to_string(), "exponent must be finite, got inf");
    }

    #[test]
    fn error_query_dimension_mismatch() {
        let e = KnnError::QueryDimensionMismatch {
            query: 3,
            n_dims: 784,
        };
        assert_eq!(e.to_string(), "query length 3 does not match n_dims 784");
    }

    #[test]
    fn error_shape_mismatches() {
        let e = KnnError::InputsShapeMismatch { len: 10, n_dims: 3 };
        assert_eq!(
            e.to_string(),
            "inputs length 10 is not divisible by n_dims 3"
        );
        let e = KnnError::LabelsShapeMismatch {
            len: 7,
            n_classes: 2,
        };
        assert_eq!(
            e.to_string(),
            "labels length 7 is not divisible by n_classes 2"
        );
        let e = KnnError::RowCountMismatch {
            inputs: 4,
            labels: 5,
        };
        assert_eq!(e.to_string(), "inputs have 4 rows but labels have 5");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<KnnError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<KnnError>();
    }
}
