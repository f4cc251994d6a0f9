//! Error types for knnsweep-sweep.

use knnsweep_knn::KnnError;

/// Error type for all fallible operations in the knnsweep-sweep crate.
#[derive(Debug, thiserror::Error)]
pub enum SweepError {
    /// Returned when a sweep axis has invalid bounds or step.
    #[error("invalid {axis} range: {reason}")]
    InvalidRange {
        /// Axis name (`"k"`, `"threshold"`, `"exponent"`).
        axis: &'static str,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a sweep or pool parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the invalid parameter.
        reason: String,
    },

    /// Wraps an error from the classifier core.
    #[error(transparent)]
    Knn(#[from] KnnError),

    /// Returned when writing or flushing results fails.
    #[error("results sink error: {reason}")]
    Sink {
        /// Description of the underlying write failure.
        reason: String,
    },

    /// Returned when a worker panicked while holding the sink lock.
    #[error("results sink lock poisoned")]
    SinkPoisoned,

    /// Returned when the worker thread pool cannot be created.
    #[error("thread pool error: {reason}")]
    ThreadPool {
        /// Description of the build failure.
        reason: String,
    },
}

impl From<csv::Error> for SweepError {
    fn from(e: csv::Error) -> Self {
        SweepError::Sink {
            reason: e.to_string(),
        }
    }
}

impl From<std::io::Error> for SweepError {
    fn from(e: std::io::Error) -> Self {
        SweepError::Sink {
            reason: e.to_string(),
        }
    }
}
