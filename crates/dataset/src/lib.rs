//! # knnsweep-dataset
//!
//! Labeled image-vector datasets for the knnsweep classifier sweep. A
//! [`Split`] holds feature vectors, one-hot labels, and cached class indices
//! in flat row-major buffers; a [`Dataset`] pairs a training and a test split
//! of matching shape. [`read_csv`] loads a split from the usual
//! `label,pixel0,pixel1,...` CSV layout, scaling raw intensities into `[0, 1]`.

mod csv_read;
mod error;
mod split;

pub use csv_read::{CsvConfig, DEFAULT_SCALE, parse_csv, read_csv};
pub use error::DataError;
pub use split::{Dataset, Split};
