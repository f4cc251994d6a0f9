//! # knnsweep-sweep
//!
//! Parallel grid search over the `(k, threshold, exponent)` hyperparameters
//! of the thresholded-distance k-NN classifier.
//!
//! ```text
//! SweepConfig ──combinations()──▶ SweepQueue ──claim_next()──┐
//!                                                            ▼
//!                  run_sweep(): T rayon workers ── evaluate() per claim
//!                                                            │
//!                                        ResultsSink::append(records)
//! ```
//!
//! The queue is the only coordination point between workers: each claims
//! combinations through one atomic cursor. Records reach the sink in
//! completion order, not queue order.

mod error;
mod evaluate;
mod grid;
mod pool;
mod queue;
mod range;
mod record;
mod sink;

pub use error::SweepError;
pub use evaluate::{EvalScratch, evaluate, training_set};
pub use grid::{MAX_COMBINATIONS, SweepConfig, SweepParameters};
pub use pool::{SweepReport, WorkerStats, run_sweep};
pub use queue::{Claim, SweepQueue};
pub use range::{Axis, KSweep, MAX_AXIS_VALUES};
pub use record::{CSV_HEADER, ResultRecord};
pub use sink::{ResultsSink, SinkSummary};
