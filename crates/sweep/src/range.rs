//! Inclusive parameter ranges enumerated by index.
//!
//! Float axes never accumulate `value += step`; element `i` is computed
//! directly as `min + i * step` in `f64` and narrowed to `f32`, and the
//! element count is fixed up front. This keeps `0.0..=1.0` step `0.01` at
//! exactly 101 values with the last one equal to `1.0`.

use knnsweep_knn::KRange;

use crate::error::SweepError;

/// Slack added to `(max - min) / step` before flooring, so that a `max`
/// which is a whole number of steps from `min` survives rounding error.
const COUNT_TOLERANCE: f64 = 1e-4;

/// Largest number of values a single axis may hold.
pub const MAX_AXIS_VALUES: usize = 1 << 24;

/// A float sweep axis: a single value or an inclusive stepped range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Axis {
    /// One value.
    Fixed(f64),
    /// `min, min + step, ...` up to and including `max` (within tolerance).
    Range {
        /// First value.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
        /// Spacing between consecutive values.
        step: f64,
    },
}

impl Axis {
    /// Creates a range axis.
    pub fn range(min: f64, max: f64, step: f64) -> Self {
        Self::Range { min, max, step }
    }

    /// Checks bounds and step.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::InvalidRange`] if a bound or the step is not
    /// finite, `step <= 0`, `max < min`, or the range holds more than
    /// [`MAX_AXIS_VALUES`] values.
    pub fn validate(&self, axis: &'static str) -> Result<(), SweepError> {
        let invalid = |reason: String| Err(SweepError::InvalidRange { axis, reason });
        match *self {
            Self::Fixed(v) if !v.is_finite() => invalid(format!("value must be finite, got {v}")),
            Self::Fixed(_) => Ok(()),
            Self::Range { min, max, step } => {
                if !min.is_finite() || !max.is_finite() || !step.is_finite() {
                    return invalid(format!(
                        "bounds and step must be finite, got {min}..={max} step {step}"
                    ));
                }
                if step <= 0.0 {
                    return invalid(format!("step must be positive, got {step}"));
                }
                if max < min {
                    return invalid(format!("max {max} is below min {min}"));
                }
                let steps = Self::steps(min, max, step);
                if !steps.is_finite() || steps >= MAX_AXIS_VALUES as f64 {
                    return invalid(format!(
                        "{min}..={max} step {step} exceeds {MAX_AXIS_VALUES} values"
                    ));
                }
                Ok(())
            }
        }
    }

    /// Number of values on the axis. Assumes a validated axis.
    pub fn count(&self) -> usize {
        match *self {
            Self::Fixed(_) => 1,
            Self::Range { min, max, step } => {
                (Self::steps(min, max, step) as usize).saturating_add(1)
            }
        }
    }

    /// Whole steps between `min` and `max`, before conversion to an index.
    fn steps(min: f64, max: f64, step: f64) -> f64 {
        ((max - min) / step + COUNT_TOLERANCE).floor()
    }

    /// Value at position `i`.
    pub fn value(&self, i: usize) -> f32 {
        match *self {
            Self::Fixed(v) => v as f32,
            Self::Range { min, step, .. } => (min + i as f64 * step) as f32,
        }
    }

    /// Iterates over every value on the axis in ascending order.
    pub fn values(&self) -> impl Iterator<Item = f32> + '_ {
        (0..self.count()).map(move |i| self.value(i))
    }
}

/// The k axis: an inclusive integer range with a stride.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KSweep {
    min: usize,
    max: usize,
    step: usize,
}

impl KSweep {
    /// Creates a k axis over `min..=max` in increments of `step`.
    pub fn new(min: usize, max: usize, step: usize) -> Self {
        Self { min, max, step }
    }

    /// A k axis holding only `k`.
    pub fn single(k: usize) -> Self {
        Self::new(k, k, 1)
    }

    /// First k.
    pub fn min(&self) -> usize {
        self.min
    }

    /// Configured upper bound (may not lie on the step lattice).
    pub fn max(&self) -> usize {
        self.max
    }

    /// Stride between emitted k values.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Checks `1 <= min <= max`, `step >= 1`, and that the lattice holds at
    /// most [`MAX_AXIS_VALUES`] values.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::InvalidRange`] with axis `"k"`.
    pub fn validate(&self) -> Result<(), SweepError> {
        let reason = if self.min == 0 {
            "min must be at least 1".to_string()
        } else if self.step == 0 {
            "step must be at least 1".to_string()
        } else if self.max < self.min {
            format!("max {} is below min {}", self.max, self.min)
        } else if self.count() > MAX_AXIS_VALUES {
            format!("{} values exceed {MAX_AXIS_VALUES}", self.count())
        } else {
            return Ok(());
        };
        Err(SweepError::InvalidRange { axis: "k", reason })
    }

    /// Number of k values on the lattice. Assumes a validated axis.
    pub fn count(&self) -> usize {
        (self.max - self.min) / self.step + 1
    }

    /// Largest k on the lattice.
    pub fn last(&self) -> usize {
        self.min + (self.count() - 1) * self.step
    }

    /// Iterates over every k on the lattice in ascending order.
    pub fn values(&self) -> impl Iterator<Item = usize> {
        (self.min..=self.last()).step_by(self.step)
    }

    /// Contiguous k range a batched evaluation must score, `min..=last()`.
    ///
    /// Lattice value `k` sits at offset `k - min` in the batched output.
    pub fn batch_range(&self) -> KRange {
        KRange::new(self.min, self.last())
    }
}
