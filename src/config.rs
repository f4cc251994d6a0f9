use std::path::PathBuf;

use serde::Deserialize;

/// Top-level knnsweep configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SweepToml {
    /// Dataset settings.
    pub data: DataToml,

    /// Sweep axes and classifier settings.
    #[serde(default)]
    pub sweep: AxesToml,

    /// Execution settings.
    #[serde(default)]
    pub run: RunToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataToml {
    pub train: PathBuf,
    pub test: PathBuf,
    #[serde(default)]
    pub train_count: Option<usize>,
    #[serde(default)]
    pub test_count: Option<usize>,
    #[serde(default = "default_n_dims")]
    pub n_dims: usize,
    #[serde(default = "default_n_classes")]
    pub n_classes: usize,
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

fn default_n_dims() -> usize {
    784
}
fn default_n_classes() -> usize {
    10
}
fn default_scale() -> f32 {
    255.0
}
fn default_delimiter() -> char {
    ','
}

/// A k axis: one value or an inclusive range.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum KToml {
    Fixed(usize),
    Range {
        min: usize,
        max: usize,
        #[serde(default = "default_k_step")]
        step: usize,
    },
}

fn default_k_step() -> usize {
    1
}

/// A real axis: one value or an inclusive range.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AxisToml {
    Fixed(f64),
    Range { min: f64, max: f64, step: f64 },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AxesToml {
    #[serde(default = "default_k")]
    pub k: KToml,
    #[serde(default = "default_threshold")]
    pub threshold: AxisToml,
    #[serde(default = "default_exponent")]
    pub exponent: AxisToml,
    #[serde(default = "default_true")]
    pub batch_k: bool,
    #[serde(default = "default_weighting")]
    pub weighting: String,
    #[serde(default = "default_epsilon")]
    pub epsilon: f32,
}

impl Default for AxesToml {
    fn default() -> Self {
        Self {
            k: default_k(),
            threshold: default_threshold(),
            exponent: default_exponent(),
            batch_k: true,
            weighting: default_weighting(),
            epsilon: default_epsilon(),
        }
    }
}

fn default_k() -> KToml {
    KToml::Range {
        min: 1,
        max: 20,
        step: 1,
    }
}
fn default_threshold() -> AxisToml {
    AxisToml::Range {
        min: 0.0,
        max: 1.0,
        step: 0.01,
    }
}
fn default_exponent() -> AxisToml {
    AxisToml::Range {
        min: 0.1,
        max: 20.0,
        step: 0.1,
    }
}
fn default_true() -> bool {
    true
}
fn default_weighting() -> String {
    "reciprocal".to_string()
}
fn default_epsilon() -> f32 {
    1e-7
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunToml {
    #[serde(default = "default_threads")]
    pub threads: usize,
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl Default for RunToml {
    fn default() -> Self {
        Self {
            threads: default_threads(),
            output: None,
        }
    }
}

fn default_threads() -> usize {
    8
}
