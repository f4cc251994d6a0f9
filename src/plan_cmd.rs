use anyhow::Result;
use tracing::{info, info_span};

use crate::cli::PlanArgs;
use crate::convert;
use crate::load::load_config;

/// Validate the configuration and report the sweep size without loading data.
pub fn run(args: PlanArgs) -> Result<()> {
    let _cmd = info_span!("plan").entered();

    let config = load_config(&args.config)?;
    let sweep = convert::build_sweep_config(&config.sweep)?;
    convert::build_csv_config(&config.data, config.data.train_count)?;

    let k = sweep.k();
    info!(
        k_min = k.min(),
        k_last = k.last(),
        k_step = k.step(),
        k_values = k.count(),
        thresholds = sweep.threshold().count(),
        exponents = sweep.exponent().count(),
        "axes"
    );
    info!(
        combinations = sweep.combination_count(),
        records = sweep.record_count(),
        batch_k = sweep.batch_k(),
        threads = config.run.threads,
        "sweep plan"
    );
    println!(
        "{} combinations, {} records",
        sweep.combination_count(),
        sweep.record_count()
    );
    Ok(())
}
