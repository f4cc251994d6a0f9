//! Fixed-size worker pool draining a [`SweepQueue`].

use std::io::Write;
use std::time::{Duration, Instant};

use knnsweep_dataset::Dataset;
use knnsweep_knn::{KnnConfig, TrainingSet};
use rayon::ThreadPoolBuilder;
use tracing::{debug, debug_span, info};

use crate::error::SweepError;
use crate::evaluate::{EvalScratch, evaluate, training_set};
use crate::queue::SweepQueue;
use crate::sink::ResultsSink;

/// Work done by one worker thread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    /// Combinations this worker evaluated.
    pub combinations: usize,
    /// Records this worker appended.
    pub records: usize,
}

/// Aggregate outcome of a sweep run.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepReport {
    /// Per-worker statistics, indexed by worker.
    pub workers: Vec<WorkerStats>,
    /// Combinations evaluated across all workers.
    pub combinations: usize,
    /// Records appended across all workers.
    pub records: usize,
    /// Wall-clock time from pool start to the last worker exiting.
    pub elapsed: Duration,
}

/// Runs every combination in `queue` on `threads` worker threads.
///
/// Each worker allocates its scratch once, then repeatedly claims a
/// combination, evaluates it against the whole test split, and appends the
/// resulting records to `sink`. Returns after every worker has exited.
///
/// `base` supplies the weighting and epsilon; threshold and exponent come
/// from each combination. `max_k_count` sizes per-worker buffers and should
/// be [`SweepConfig::max_batch_len`](crate::SweepConfig::max_batch_len).
///
/// # Errors
///
/// - [`SweepError::InvalidConfig`] if `threads` is zero
/// - [`SweepError::ThreadPool`] if the pool cannot be built
/// - the first worker error otherwise; the failing worker abandons the
///   queue so the others stop at their next claim
pub fn run_sweep<W: Write + Send>(
    dataset: &Dataset,
    queue: &SweepQueue,
    base: &KnnConfig,
    sink: &ResultsSink<W>,
    threads: usize,
    max_k_count: usize,
) -> Result<SweepReport, SweepError> {
    if threads == 0 {
        return Err(SweepError::InvalidConfig {
            reason: "threads must be at least 1".into(),
        });
    }
    let train = training_set(dataset)?;
    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("knnsweep-worker-{i}"))
        .build()
        .map_err(|e| SweepError::ThreadPool {
            reason: e.to_string(),
        })?;

    info!(
        threads,
        combinations = queue.len(),
        train = dataset.train().len(),
        test = dataset.test().len(),
        "starting sweep"
    );
    let start = Instant::now();

    let ctx = WorkerContext {
        train: &train,
        dataset,
        queue,
        base,
        sink,
        max_k_count,
    };
    let results = pool.broadcast(|bc| ctx.run(bc.index()).inspect_err(|_| queue.abandon()));
    let elapsed = start.elapsed();

    let workers = results.into_iter().collect::<Result<Vec<_>, _>>()?;
    let report = SweepReport {
        combinations: workers.iter().map(|w| w.combinations).sum(),
        records: workers.iter().map(|w| w.records).sum(),
        workers,
        elapsed,
    };
    info!(
        combinations = report.combinations,
        records = report.records,
        elapsed_s = report.elapsed.as_secs_f64(),
        "sweep complete"
    );
    Ok(report)
}

/// Read-only state shared by every worker.
struct WorkerContext<'a, W: Write> {
    train: &'a TrainingSet<'a>,
    dataset: &'a Dataset,
    queue: &'a SweepQueue,
    base: &'a KnnConfig,
    sink: &'a ResultsSink<W>,
    max_k_count: usize,
}

impl<W: Write> WorkerContext<'_, W> {
    fn run(&self, worker: usize) -> Result<WorkerStats, SweepError> {
        let _span = debug_span!("worker", worker).entered();
        debug!("worker started");

        let mut scratch = EvalScratch::for_dataset(self.dataset, self.max_k_count);
        let mut records = Vec::with_capacity(self.max_k_count);
        let mut stats = WorkerStats::default();

        while let Some(claim) = self.queue.claim_next() {
            let params = claim.params();
            let counts = evaluate(self.train, self.dataset, params, self.base, &mut scratch)?;
            params.fill_records(counts, &mut records);
            self.sink.append(&records)?;

            stats.combinations += 1;
            stats.records += records.len();
            debug!(
                index = claim.index(),
                claimed = self.queue.claimed(),
                total = self.queue.len(),
                "combination done"
            );
        }

        debug!(
            combinations = stats.combinations,
            records = stats.records,
            "worker exiting"
        );
        Ok(stats)
    }
}
