//! Config file and dataset loading shared by the subcommands.

use std::path::Path;

use anyhow::{Context, Result};
use knnsweep_dataset::{Dataset, read_csv};
use tracing::info;

use crate::config::{DataToml, SweepToml};
use crate::convert;

/// Reads and parses a TOML configuration file.
pub fn load_config(path: &Path) -> Result<SweepToml> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}

/// Loads and pairs the training and test splits.
pub fn load_dataset(data: &DataToml) -> Result<Dataset> {
    let train_cfg = convert::build_csv_config(data, data.train_count)?;
    let test_cfg = convert::build_csv_config(data, data.test_count)?;

    info!(path = %data.train.display(), "reading training data");
    let train = read_csv(&data.train, &train_cfg)
        .with_context(|| format!("failed to read training data: {}", data.train.display()))?;
    info!(path = %data.test.display(), "reading test data");
    let test = read_csv(&data.test, &test_cfg)
        .with_context(|| format!("failed to read test data: {}", data.test.display()))?;

    Dataset::new(train, test).context("training and test data are incompatible")
}
