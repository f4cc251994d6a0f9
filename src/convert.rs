//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};

use crate::config::*;

use knnsweep_dataset::CsvConfig;
use knnsweep_knn::Weighting;
use knnsweep_sweep::{Axis, KSweep, SweepConfig};

/// Parses a neighbor weighting name into the corresponding enum variant.
pub fn parse_weighting(s: &str) -> Result<Weighting> {
    match s.to_lowercase().as_str() {
        "uniform" | "average" => Ok(Weighting::Uniform),
        "reciprocal" => Ok(Weighting::Reciprocal),
        "reciprocal-rooted" | "reciprocal_rooted" => Ok(Weighting::ReciprocalRooted),
        other => bail!("unknown weighting: {other:?}"),
    }
}

/// Converts a TOML k axis into a [`KSweep`].
pub fn build_k(k: KToml) -> KSweep {
    match k {
        KToml::Fixed(k) => KSweep::single(k),
        KToml::Range { min, max, step } => KSweep::new(min, max, step),
    }
}

/// Converts a TOML real axis into an [`Axis`].
pub fn build_axis(axis: AxisToml) -> Axis {
    match axis {
        AxisToml::Fixed(v) => Axis::Fixed(v),
        AxisToml::Range { min, max, step } => Axis::range(min, max, step),
    }
}

/// Builds a validated [`SweepConfig`] from the TOML sweep section.
pub fn build_sweep_config(axes: &AxesToml) -> Result<SweepConfig> {
    let config = SweepConfig::new(
        build_k(axes.k),
        build_axis(axes.threshold),
        build_axis(axes.exponent),
    )
    .with_batch_k(axes.batch_k)
    .with_weighting(parse_weighting(&axes.weighting)?)
    .with_epsilon(axes.epsilon);
    config.validate()?;
    Ok(config)
}

/// Builds the [`CsvConfig`] for one split.
pub fn build_csv_config(data: &DataToml, rows: Option<usize>) -> Result<CsvConfig> {
    if !data.delimiter.is_ascii() {
        bail!("delimiter must be a single ASCII character, got {:?}", data.delimiter);
    }
    let config = CsvConfig::new(data.n_dims, data.n_classes)
        .with_max_rows(rows)
        .with_scale(data.scale)
        .with_delimiter(data.delimiter as u8);
    config.validate()?;
    Ok(config)
}
