//! Configuration for thresholded-distance KNN queries.

use std::ops::RangeInclusive;

use crate::error::KnnError;

/// Default additive floor applied to neighbor distances before taking
/// their reciprocal.
pub const DEFAULT_EPSILON: f32 = 1e-7;

/// Vote weighting scheme applied to each ranked neighbor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Weighting {
    /// Every neighbor votes with weight 1 (plain average of labels).
    Uniform,
    /// Weight `1 / (d + ε)` on the raw thresholded distance.
    #[default]
    Reciprocal,
    /// Weight `1 / (d^(1/exponent) + ε)`: the reciprocal of the rooted
    /// Minkowski-style distance.
    ReciprocalRooted,
}

/// Per-neighbor weight function, resolved from a [`KnnConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightParams {
    weighting: Weighting,
    exponent: f32,
    epsilon: f32,
}

impl WeightParams {
    /// Returns the vote weight of a neighbor at `distance`.
    #[inline]
    pub fn weight(&self, distance: f32) -> f32 {
        match self.weighting {
            Weighting::Uniform => 1.0,
            Weighting::Reciprocal => 1.0 / (distance + self.epsilon),
            Weighting::ReciprocalRooted => {
                1.0 / (distance.powf(1.0 / self.exponent) + self.epsilon)
            }
        }
    }
}

/// Inclusive range of neighbor counts `[min, max]` evaluated together.
///
/// A single `k` is the degenerate range `[k, k]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KRange {
    min: usize,
    max: usize,
}

impl KRange {
    /// Creates the range `[min, max]`. Call [`KRange::validate`] before use.
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Creates the single-value range `[k, k]`.
    pub fn single(k: usize) -> Self {
        Self { min: k, max: k }
    }

    /// Smallest k in the range.
    pub fn min(&self) -> usize {
        self.min
    }

    /// Largest k in the range.
    pub fn max(&self) -> usize {
        self.max
    }

    /// Number of k values in the range (`max - min + 1`).
    pub fn count(&self) -> usize {
        self.max.saturating_sub(self.min) + 1
    }

    /// Whether `k` lies in the range.
    pub fn contains(&self, k: usize) -> bool {
        (self.min..=self.max).contains(&k)
    }

    /// Iterates the k values in ascending order.
    pub fn iter(&self) -> RangeInclusive<usize> {
        self.min..=self.max
    }

    /// Validates that `1 <= min <= max`.
    pub fn validate(&self) -> Result<(), KnnError> {
        if self.min < 1 {
            return Err(KnnError::InvalidK { k: self.min });
        }
        if self.min > self.max {
            return Err(KnnError::InvalidKRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Distance and weighting parameters for a KNN query.
///
/// The neighbor count is supplied separately per call (a single `k` or a
/// [`KRange`]) so one configuration serves both the single and batched paths.
///
/// # Example
///
/// ```
/// use knnsweep_knn::{KnnConfig, Weighting};
///
/// let config = KnnConfig::new()
///     .with_threshold(0.05)
///     .with_exponent(3.0)
///     .with_weighting(Weighting::Reciprocal);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnnConfig {
    /// Per-dimension differences at or below this are ignored.
    threshold: f32,
    /// Power applied to each surviving per-dimension difference.
    exponent: f32,
    /// Vote weighting scheme.
    weighting: Weighting,
    /// Additive floor on distances in reciprocal weighting.
    epsilon: f32,
}

impl KnnConfig {
    /// Creates a configuration for plain squared-Euclidean reciprocal KNN.
    ///
    /// Defaults: `threshold = 0`, `exponent = 2`, `weighting = Reciprocal`,
    /// `epsilon = 1e-7`.
    pub fn new() -> Self {
        Self {
            threshold: 0.0,
            exponent: 2.0,
            weighting: Weighting::Reciprocal,
            epsilon: DEFAULT_EPSILON,
        }
    }

    /// Sets the per-dimension distance-ignore threshold.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the distance exponent.
    pub fn with_exponent(mut self, exponent: f32) -> Self {
        self.exponent = exponent;
        self
    }

    /// Sets the vote weighting scheme.
    pub fn with_weighting(mut self, weighting: Weighting) -> Self {
        self.weighting = weighting;
        self
    }

    /// Sets the epsilon floor.
    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Returns the distance-ignore threshold.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Returns the distance exponent.
    pub fn exponent(&self) -> f32 {
        self.exponent
    }

    /// Returns the vote weighting scheme.
    pub fn weighting(&self) -> Weighting {
        self.weighting
    }

    /// Returns the epsilon floor.
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Returns the neighbor weight function for this configuration.
    pub fn weight_params(&self) -> WeightParams {
        WeightParams {
            weighting: self.weighting,
            exponent: self.exponent,
            epsilon: self.epsilon,
        }
    }

    /// Validates this configuration.
    ///
    /// Threshold and exponent may take any finite value, including degenerate
    /// ones (zero or negative exponent, threshold above 1); only NaN and
    /// infinities are rejected.
    pub fn validate(&self) -> Result<(), KnnError> {
        if !self.threshold.is_finite() {
            return Err(KnnError::NonFiniteParameter {
                name: "threshold",
                value: self.threshold,
            });
        }
        if !self.exponent.is_finite() {
            return Err(KnnError::NonFiniteParameter {
                name: "exponent",
                value: self.exponent,
            });
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(KnnError::InvalidEpsilon {
                epsilon: self.epsilon,
            });
        }
        Ok(())
    }
}

impl Default for KnnConfig {
    fn default() -> Self {
        Self::new()
    }
}
