//! Shared work queue over the precomputed sweep.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::SweepError;
use crate::grid::{SweepConfig, SweepParameters};

/// Immutable list of combinations plus a shared claim cursor.
///
/// Workers call [`claim_next`](Self::claim_next) until it returns `None`.
/// Each index is handed out exactly once across all threads.
#[derive(Debug)]
pub struct SweepQueue {
    combinations: Vec<SweepParameters>,
    /// Next unclaimed index; never exceeds `combinations.len()`.
    cursor: AtomicUsize,
}

/// A combination claimed from a [`SweepQueue`].
#[derive(Debug, Clone, Copy)]
pub struct Claim<'q> {
    index: usize,
    params: &'q SweepParameters,
}

impl Claim<'_> {
    /// Position in the queue.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The claimed combination.
    pub fn params(&self) -> &SweepParameters {
        self.params
    }
}

impl SweepQueue {
    /// Wraps an already enumerated list of combinations.
    pub fn new(combinations: Vec<SweepParameters>) -> Self {
        Self {
            combinations,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Enumerates `config` and wraps the result.
    ///
    /// # Errors
    ///
    /// Returns the validation error of an invalid config.
    pub fn from_config(config: &SweepConfig) -> Result<Self, SweepError> {
        Ok(Self::new(config.combinations()?))
    }

    /// Total number of combinations.
    pub fn len(&self) -> usize {
        self.combinations.len()
    }

    /// Returns `true` if the queue holds no combinations.
    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }

    /// Every combination in queue order.
    pub fn combinations(&self) -> &[SweepParameters] {
        &self.combinations
    }

    /// Number of combinations handed out so far.
    pub fn claimed(&self) -> usize {
        self.cursor.load(Ordering::Acquire)
    }

    /// Claims the next unclaimed combination, or `None` once exhausted.
    pub fn claim_next(&self) -> Option<Claim<'_>> {
        let len = self.combinations.len();
        let index = self
            .cursor
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |c| {
                (c < len).then_some(c + 1)
            })
            .ok()?;
        Some(Claim {
            index,
            params: &self.combinations[index],
        })
    }

    /// Moves the cursor to the end so every later claim returns `None`.
    pub fn abandon(&self) {
        self.cursor
            .fetch_max(self.combinations.len(), Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::{Axis, KSweep};

    fn queue(n: usize) -> SweepQueue {
        let combos = (0..n)
            .map(|i| SweepParameters::new(KSweep::single(1), i as f32, 2.0))
            .collect();
        SweepQueue::new(combos)
    }

    #[test]
    fn claims_in_order_then_none() {
        let q = queue(3);
        let got: Vec<usize> = std::iter::from_fn(|| q.claim_next().map(|c| c.index())).collect();
        assert_eq!(got, vec![0, 1, 2]);
        assert!(q.claim_next().is_none());
        assert!(q.claim_next().is_none());
        assert_eq!(q.claimed(), 3);
    }

    #[test]
    fn claim_carries_params() {
        let q = queue(2);
        let _ = q.claim_next();
        let c = q.claim_next().unwrap();
        assert_eq!(c.params().threshold(), 1.0);
    }

    #[test]
    fn empty_queue() {
        let q = queue(0);
        assert!(q.is_empty());
        assert!(q.claim_next().is_none());
        assert_eq!(q.claimed(), 0);
    }

    #[test]
    fn abandon_stops_claims() {
        let q = queue(5);
        let _ = q.claim_next();
        q.abandon();
        assert!(q.claim_next().is_none());
        assert_eq!(q.claimed(), 5);
    }

    #[test]
    fn from_config_matches_grid() {
        let config = SweepConfig::new(
            KSweep::new(1, 5, 1),
            Axis::range(0.0, 0.5, 0.1),
            Axis::Fixed(2.0),
        );
        let q = SweepQueue::from_config(&config).unwrap();
        assert_eq!(q.len(), 6);
    }
}
