use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Parallel hyperparameter sweep for a weighted k-NN classifier.
#[derive(Parser)]
#[command(
    name = "knnsweep",
    version,
    about = "Parallel (k, threshold, exponent) sweep for a weighted k-NN classifier"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Load the dataset and run the full sweep.
    Run(RunArgs),
    /// Validate the configuration and report the sweep size.
    Plan(PlanArgs),
}

/// Arguments for the `run` subcommand.
#[derive(clap::Args)]
pub struct RunArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "knnsweep.toml")]
    pub config: PathBuf,

    /// Override output CSV path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override worker thread count from config.
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,
}

/// Arguments for the `plan` subcommand.
#[derive(clap::Args)]
pub struct PlanArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "knnsweep.toml")]
    pub config: PathBuf,
}
