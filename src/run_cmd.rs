use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use knnsweep_sweep::{ResultsSink, SweepQueue, run_sweep};
use tracing::{info, info_span};

use crate::cli::RunArgs;
use crate::convert;
use crate::load::{load_config, load_dataset};

/// Load the dataset, run every combination, and write the results table.
pub fn run(args: RunArgs) -> Result<()> {
    let _cmd = info_span!("run").entered();

    // 1. Load project TOML
    let config = load_config(&args.config)?;
    let sweep = convert::build_sweep_config(&config.sweep)?;
    let threads = args.threads.unwrap_or(config.run.threads);
    if threads == 0 {
        bail!("thread count must be at least 1");
    }
    let output = args
        .output
        .or(config.run.output)
        .unwrap_or_else(|| default_output(&config.sweep.weighting));

    // 2. Read dataset (before any sweep state exists)
    let dataset = load_dataset(&config.data)?;
    info!(
        train = dataset.train().len(),
        test = dataset.test().len(),
        n_dims = dataset.n_dims(),
        n_classes = dataset.n_classes(),
        "dataset loaded"
    );

    // 3. Build the queue and open the sink
    let queue = SweepQueue::from_config(&sweep)?;
    let sink = ResultsSink::create(&output)
        .with_context(|| format!("failed to open output: {}", output.display()))?;
    info!(
        combinations = queue.len(),
        records = sweep.record_count(),
        batch_k = sweep.batch_k(),
        weighting = ?sweep.base().weighting(),
        output = %output.display(),
        "sweep planned"
    );

    // 4. Run workers
    let report = run_sweep(
        &dataset,
        &queue,
        sweep.base(),
        &sink,
        threads,
        sweep.max_batch_len(),
    )
    .context("sweep failed")?;

    // 5. Finish sink and report the best parameters per k
    let summary = sink.finish().context("failed to finish results file")?;
    for best in &summary.best_by_k {
        info!(
            k = best.k,
            threshold = best.threshold,
            exponent = best.exponent,
            correct = best.correct,
            "best for k"
        );
    }
    if let Some(best) = summary.best() {
        info!(
            k = best.k,
            threshold = best.threshold,
            exponent = best.exponent,
            correct = best.correct,
            accuracy = best.correct as f64 / dataset.test().len().max(1) as f64,
            "best overall"
        );
    }
    info!(
        records = summary.records,
        elapsed_s = report.elapsed.as_secs_f64(),
        output = %output.display(),
        "done"
    );
    Ok(())
}

/// `knn_k_dt_de_<weighting>.csv`, named after the swept axes.
fn default_output(weighting: &str) -> PathBuf {
    let tag = weighting.to_lowercase().replace('-', "_");
    PathBuf::from(format!("knn_k_dt_de_{tag}.csv"))
}
