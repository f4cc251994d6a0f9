//! Error types for knnsweep-dataset.

use std::path::PathBuf;

/// Error type for all fallible operations in the knnsweep-dataset crate.
///
/// Row numbers are 1-based and count data rows only (the header row is not
/// counted).
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// Returned when the dataset file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Returned when the file cannot be opened or read.
    #[error("i/o error: {reason}")]
    Io {
        /// Description of the underlying I/O failure.
        reason: String,
    },

    /// Wraps a format error originating from the CSV reader.
    #[error("csv error: {reason}")]
    Csv {
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// Returned when the file holds no data rows and no row count was requested.
    #[error("dataset contains no data rows")]
    EmptyFile,

    /// Returned when a row does not have exactly `n_dims + 1` fields.
    #[error("row {row}: expected {expected} fields, got {got}")]
    FieldCount {
        /// 1-based data row number.
        row: usize,
        /// Expected field count (`n_dims + 1`).
        expected: usize,
        /// Actual field count.
        got: usize,
    },

    /// Returned when a field cannot be parsed as a number.
    #[error("row {row}, column {column}: cannot parse '{value}' as a number")]
    InvalidField {
        /// 1-based data row number.
        row: usize,
        /// 0-based column index (0 is the label column).
        column: usize,
        /// Raw field text.
        value: String,
    },

    /// Returned when a class label falls outside `[0, n_classes)`.
    #[error("row {row}: label {label} outside [0, {n_classes})")]
    InvalidLabel {
        /// 1-based data row number.
        row: usize,
        /// Parsed label value.
        label: i64,
        /// Number of classes.
        n_classes: usize,
    },

    /// Returned when the file ends before the requested number of rows.
    #[error("expected {expected} rows, file has {got}")]
    TooFewRows {
        /// Requested row count.
        expected: usize,
        /// Rows actually present.
        got: usize,
    },

    /// Returned when a flat buffer length is not a multiple of its row width.
    #[error("{name} has length {len}, not a multiple of {width}")]
    ShapeMismatch {
        /// Buffer name (`"inputs"`, `"labels"`, `"classes"`).
        name: &'static str,
        /// Buffer length.
        len: usize,
        /// Expected row width.
        width: usize,
    },

    /// Returned when a label row is not a one-hot vector.
    #[error("label row {row} is not one-hot")]
    NotOneHot {
        /// 0-based example index.
        row: usize,
    },

    /// Returned when a loader or split parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the invalid parameter.
        reason: String,
    },

    /// Returned when train and test splits disagree on a dimension.
    #[error("{name} mismatch: train has {train}, test has {test}")]
    DimensionMismatch {
        /// Dimension name (`"n_dims"` or `"n_classes"`).
        name: &'static str,
        /// Train split value.
        train: usize,
        /// Test split value.
        test: usize,
    },

    /// Returned when a split that must hold examples is empty.
    #[error("{name} split is empty")]
    EmptySplit {
        /// Split name (`"train"`).
        name: &'static str,
    },
}

impl From<csv::Error> for DataError {
    fn from(e: csv::Error) -> Self {
        if e.is_io_error() {
            DataError::Io {
                reason: e.to_string(),
            }
        } else {
            DataError::Csv {
                reason: e.to_string(),
            }
        }
    }
}
