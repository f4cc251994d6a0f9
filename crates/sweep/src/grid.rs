//! Sweep configuration and combination enumeration.

use knnsweep_knn::{KRange, KnnConfig, Weighting};

use crate::error::SweepError;
use crate::range::{Axis, KSweep};

/// Largest number of queue entries a sweep may enumerate.
pub const MAX_COMBINATIONS: usize = 1 << 26;
use crate::record::ResultRecord;

// ---------------------------------------------------------------------------
// SweepConfig
// ---------------------------------------------------------------------------

/// Axes of a hyperparameter sweep plus the settings shared by every
/// combination.
///
/// The Cartesian product is ordered threshold (outermost), then exponent,
/// then k when k is not batched.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    k: KSweep,
    threshold: Axis,
    exponent: Axis,
    /// Evaluate every k of a `(threshold, exponent)` pair from one ranking.
    batch_k: bool,
    /// Weighting and epsilon; threshold and exponent are overridden per
    /// combination.
    base: KnnConfig,
}

impl SweepConfig {
    /// Creates a batched sweep over the given axes with default weighting.
    pub fn new(k: KSweep, threshold: Axis, exponent: Axis) -> Self {
        Self {
            k,
            threshold,
            exponent,
            batch_k: true,
            base: KnnConfig::new(),
        }
    }

    /// Enable or disable batched k evaluation.
    pub fn with_batch_k(mut self, batch_k: bool) -> Self {
        self.batch_k = batch_k;
        self
    }

    /// Set the neighbor weighting scheme.
    pub fn with_weighting(mut self, weighting: Weighting) -> Self {
        self.base = self.base.with_weighting(weighting);
        self
    }

    /// Set the weight denominator offset.
    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.base = self.base.with_epsilon(epsilon);
        self
    }

    /// Returns the k axis.
    pub fn k(&self) -> KSweep {
        self.k
    }

    /// Returns the threshold axis.
    pub fn threshold(&self) -> Axis {
        self.threshold
    }

    /// Returns the exponent axis.
    pub fn exponent(&self) -> Axis {
        self.exponent
    }

    /// Returns whether k is batched.
    pub fn batch_k(&self) -> bool {
        self.batch_k
    }

    /// Returns the classifier settings shared by every combination.
    pub fn base(&self) -> &KnnConfig {
        &self.base
    }

    /// Validate every axis and the shared classifier settings.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::InvalidRange`] for a bad axis,
    /// [`SweepError::Knn`] for a bad epsilon, or
    /// [`SweepError::InvalidConfig`] if the sweep has more than
    /// [`MAX_COMBINATIONS`] queue entries.
    pub fn validate(&self) -> Result<(), SweepError> {
        self.k.validate()?;
        self.threshold.validate("threshold")?;
        self.exponent.validate("exponent")?;
        self.base.validate()?;
        let per_k = if self.batch_k { 1 } else { self.k.count() };
        let combinations = self
            .threshold
            .count()
            .checked_mul(self.exponent.count())
            .and_then(|n| n.checked_mul(per_k))
            .filter(|&n| n <= MAX_COMBINATIONS);
        if combinations.is_none() {
            return Err(SweepError::InvalidConfig {
                reason: format!("sweep exceeds {MAX_COMBINATIONS} combinations"),
            });
        }
        Ok(())
    }

    /// Number of queue entries. Assumes a validated config.
    pub fn combination_count(&self) -> usize {
        let per_k = if self.batch_k { 1 } else { self.k.count() };
        self.threshold.count() * self.exponent.count() * per_k
    }

    /// Number of result records the sweep emits. Assumes a validated config.
    pub fn record_count(&self) -> usize {
        self.threshold.count() * self.exponent.count() * self.k.count()
    }

    /// Largest number of k values a single combination scores at once.
    pub fn max_batch_len(&self) -> usize {
        if self.batch_k {
            self.k.batch_range().count()
        } else {
            1
        }
    }

    /// Enumerates every combination in queue order.
    ///
    /// # Errors
    ///
    /// Returns the [`validate`](Self::validate) error for an invalid config.
    pub fn combinations(&self) -> Result<Vec<SweepParameters>, SweepError> {
        self.validate()?;
        let mut out = Vec::with_capacity(self.combination_count());
        for threshold in self.threshold.values() {
            for exponent in self.exponent.values() {
                if self.batch_k {
                    out.push(SweepParameters::new(self.k, threshold, exponent));
                } else {
                    for k in self.k.values() {
                        out.push(SweepParameters::new(KSweep::single(k), threshold, exponent));
                    }
                }
            }
        }
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// SweepParameters
// ---------------------------------------------------------------------------

/// One queue entry: a k lattice evaluated at a fixed threshold and exponent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepParameters {
    k: KSweep,
    threshold: f32,
    exponent: f32,
}

impl SweepParameters {
    /// Creates a combination.
    pub fn new(k: KSweep, threshold: f32, exponent: f32) -> Self {
        Self {
            k,
            threshold,
            exponent,
        }
    }

    /// Returns the k lattice.
    pub fn k(&self) -> KSweep {
        self.k
    }

    /// Returns the threshold.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Returns the exponent.
    pub fn exponent(&self) -> f32 {
        self.exponent
    }

    /// Contiguous k range to score.
    pub fn k_range(&self) -> KRange {
        self.k.batch_range()
    }

    /// Classifier settings for this combination on top of `base`.
    pub fn knn_config(&self, base: &KnnConfig) -> KnnConfig {
        base.with_threshold(self.threshold)
            .with_exponent(self.exponent)
    }

    /// Turns per-k counts over [`k_range`](Self::k_range) into records,
    /// keeping only k values on the lattice.
    ///
    /// # Panics
    ///
    /// Debug-asserts that `counts.len() == self.k_range().count()`.
    pub fn fill_records(&self, counts: &[usize], out: &mut Vec<ResultRecord>) {
        debug_assert_eq!(counts.len(), self.k_range().count());
        out.clear();
        out.extend(self.k.values().map(|k| ResultRecord {
            k,
            threshold: self.threshold,
            exponent: self.exponent,
            correct: counts[k - self.k.min()],
        }));
    }
}
