//! CSV dataset loader.
//!
//! Expected layout: one header row (skipped), then one example per row whose
//! first field is the integer class label and whose remaining `n_dims` fields
//! are raw pixel intensities.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::error::DataError;
use crate::split::Split;

/// Divisor applied to raw 8-bit intensities.
pub const DEFAULT_SCALE: f32 = 255.0;

// ---------------------------------------------------------------------------
// CsvConfig
// ---------------------------------------------------------------------------

/// Configuration for reading a labeled CSV file.
///
/// `n_dims` and `n_classes` are required; the builder methods adjust the
/// row limit, intensity scale, and delimiter.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvConfig {
    /// Feature fields per row (excluding the label).
    n_dims: usize,
    /// Number of classes; labels must lie in `[0, n_classes)`.
    n_classes: usize,
    /// Number of rows to read, or `None` for every row.
    max_rows: Option<usize>,
    /// Raw intensities are divided by this value.
    scale: f32,
    /// Field delimiter byte.
    delimiter: u8,
}

impl CsvConfig {
    /// Creates a config for rows of `n_dims` features over `n_classes` classes.
    pub fn new(n_dims: usize, n_classes: usize) -> Self {
        Self {
            n_dims,
            n_classes,
            max_rows: None,
            scale: DEFAULT_SCALE,
            delimiter: b',',
        }
    }

    /// Read exactly `rows` data rows; `None` reads the whole file.
    pub fn with_max_rows(mut self, rows: Option<usize>) -> Self {
        self.max_rows = rows;
        self
    }

    /// Set the intensity divisor.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Returns the feature dimensionality.
    pub fn n_dims(&self) -> usize {
        self.n_dims
    }

    /// Returns the number of classes.
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Returns the requested row count.
    pub fn max_rows(&self) -> Option<usize> {
        self.max_rows
    }

    /// Validate that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::InvalidConfig`] if `n_dims` or `n_classes` is
    /// zero or `scale` is not finite and positive.
    pub fn validate(&self) -> Result<(), DataError> {
        if self.n_dims == 0 {
            return Err(DataError::InvalidConfig {
                reason: "n_dims must be at least 1".into(),
            });
        }
        if self.n_classes == 0 {
            return Err(DataError::InvalidConfig {
                reason: "n_classes must be at least 1".into(),
            });
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(DataError::InvalidConfig {
                reason: format!("scale must be finite and positive, got {}", self.scale),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// read_csv
// ---------------------------------------------------------------------------

/// Read a labeled split from a CSV file.
///
/// # Errors
///
/// Returns [`DataError::FileNotFound`] if `path` does not exist,
/// [`DataError::Io`] if it cannot be opened or read, plus every error
/// [`parse_csv`] can return.
pub fn read_csv(path: &Path, config: &CsvConfig) -> Result<Split, DataError> {
    config.validate()?;
    if !path.exists() {
        return Err(DataError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|e| DataError::Io {
        reason: format!("{}: {e}", path.display()),
    })?;

    let split = parse_csv(file, config)?;
    info!(
        path = %path.display(),
        rows = split.len(),
        n_dims = split.n_dims(),
        "loaded dataset"
    );
    Ok(split)
}

/// Parse a labeled split from any CSV byte stream.
///
/// The header row is skipped. When `max_rows` is set, exactly that many rows
/// are read and any further rows are ignored.
///
/// # Errors
///
/// - [`DataError::InvalidConfig`] if the config is invalid
/// - [`DataError::FieldCount`] if a row does not have `n_dims + 1` fields
/// - [`DataError::InvalidField`] if a field is not a number
/// - [`DataError::InvalidLabel`] if a label is outside `[0, n_classes)`
/// - [`DataError::TooFewRows`] if the stream ends before `max_rows` rows
/// - [`DataError::EmptyFile`] if no row limit is set and there are no rows
/// - [`DataError::Csv`] on malformed CSV
/// - [`DataError::Io`] if reading the stream fails
pub fn parse_csv<R: Read>(reader: R, config: &CsvConfig) -> Result<Split, DataError> {
    config.validate()?;

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(config.delimiter)
        .from_reader(reader);

    let expected_fields = config.n_dims + 1;
    let capacity = config.max_rows.unwrap_or(0);
    let mut inputs = Vec::with_capacity(capacity * config.n_dims);
    let mut classes = Vec::with_capacity(capacity);

    let mut record = csv::StringRecord::new();
    while config.max_rows.is_none_or(|max| classes.len() < max) {
        if !csv_reader.read_record(&mut record)? {
            break;
        }
        let row = classes.len() + 1;
        if record.len() != expected_fields {
            return Err(DataError::FieldCount {
                row,
                expected: expected_fields,
                got: record.len(),
            });
        }

        classes.push(parse_label(&record[0], row, config.n_classes)?);
        for (column, field) in record.iter().enumerate().skip(1) {
            let raw: f32 = field.trim().parse().map_err(|_| DataError::InvalidField {
                row,
                column,
                value: field.to_owned(),
            })?;
            inputs.push(raw / config.scale);
        }
    }

    match config.max_rows {
        Some(expected) if classes.len() < expected => {
            return Err(DataError::TooFewRows {
                expected,
                got: classes.len(),
            });
        }
        None if classes.is_empty() => return Err(DataError::EmptyFile),
        _ => {}
    }

    debug!(rows = classes.len(), "parsed csv rows");
    Split::from_classes(inputs, classes, config.n_dims, config.n_classes)
}

fn parse_label(field: &str, row: usize, n_classes: usize) -> Result<usize, DataError> {
    let label: i64 = field.trim().parse().map_err(|_| DataError::InvalidField {
        row,
        column: 0,
        value: field.to_owned(),
    })?;
    usize::try_from(label)
        .ok()
        .filter(|&class| class < n_classes)
        .ok_or(DataError::InvalidLabel {
            row,
            label,
            n_classes,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn parse(text: &str, config: &CsvConfig) -> Result<Split, DataError> {
        parse_csv(text.as_bytes(), config)
    }

    #[test]
    fn test_normalizes_and_skips_header() {
        let text = "label,p0,p1\n3,0,255\n1,51,102\n";
        let split = parse(text, &CsvConfig::new(2, 10)).unwrap();
        assert_eq!(split.len(), 2);
        assert_eq!(split.classes(), &[3, 1]);
        assert_abs_diff_eq!(split.input(0)[1], 1.0);
        assert_abs_diff_eq!(split.input(1)[0], 0.2, epsilon = 1e-6);
        assert_abs_diff_eq!(split.input(1)[1], 0.4, epsilon = 1e-6);
    }

    #[test]
    fn test_labels_are_one_hot() {
        let split = parse("h,a\n2,0\n", &CsvConfig::new(1, 3)).unwrap();
        assert_eq!(split.labels(), &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_max_rows_ignores_extra() {
        let text = "h,a\n0,1\n1,2\n0,3\n";
        let config = CsvConfig::new(1, 2).with_max_rows(Some(2));
        let split = parse(text, &config).unwrap();
        assert_eq!(split.len(), 2);
        assert_eq!(split.classes(), &[0, 1]);
    }

    #[test]
    fn test_too_few_rows() {
        let config = CsvConfig::new(1, 2).with_max_rows(Some(5));
        let err = parse("h,a\n0,1\n1,2\n", &config).unwrap_err();
        assert!(matches!(
            err,
            DataError::TooFewRows {
                expected: 5,
                got: 2
            }
        ));
    }

    #[test]
    fn test_label_out_of_range() {
        let err = parse("h,a\n0,1\n10,2\n", &CsvConfig::new(1, 10)).unwrap_err();
        assert!(matches!(
            err,
            DataError::InvalidLabel {
                row: 2,
                label: 10,
                n_classes: 10
            }
        ));
    }

    #[test]
    fn test_negative_label() {
        let err = parse("h,a\n-1,1\n", &CsvConfig::new(1, 10)).unwrap_err();
        assert!(matches!(err, DataError::InvalidLabel { label: -1, .. }));
    }

    #[test]
    fn test_wrong_field_count() {
        let err = parse("h,a,b\n0,1,2\n1,2\n", &CsvConfig::new(2, 2)).unwrap_err();
        assert!(matches!(
            err,
            DataError::FieldCount {
                row: 2,
                expected: 3,
                got: 2
            }
        ));
    }

    #[test]
    fn test_unparsable_pixel() {
        let err = parse("h,a,b\n0,1,x\n", &CsvConfig::new(2, 2)).unwrap_err();
        assert!(matches!(
            err,
            DataError::InvalidField { row: 1, column: 2, .. }
        ));
    }

    #[test]
    fn test_header_only_is_empty() {
        let err = parse("h,a\n", &CsvConfig::new(1, 2)).unwrap_err();
        assert!(matches!(err, DataError::EmptyFile));
    }

    #[test]
    fn test_zero_rows_requested() {
        let config = CsvConfig::new(1, 2).with_max_rows(Some(0));
        let split = parse("h,a\n0,1\n", &config).unwrap();
        assert!(split.is_empty());
    }

    #[test]
    fn test_custom_delimiter_and_scale() {
        let config = CsvConfig::new(2, 2).with_delimiter(b';').with_scale(1.0);
        let split = parse("h;a;b\n1;0.25;0.5\n", &config).unwrap();
        assert_eq!(split.input(0), &[0.25, 0.5]);
    }

    #[test]
    fn test_invalid_config() {
        let err = parse("h,a\n0,1\n", &CsvConfig::new(0, 2)).unwrap_err();
        assert!(matches!(err, DataError::InvalidConfig { .. }));
        let err = parse("h,a\n0,1\n", &CsvConfig::new(1, 2).with_scale(0.0)).unwrap_err();
        assert!(matches!(err, DataError::InvalidConfig { .. }));
    }
}
