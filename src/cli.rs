use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Irrigation and street-washing allocation planner.
#[derive(Parser)]
#[command(
    name = "ugaplan",
    version,
    about = "Irrigation and street-washing allocation planner"
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
    /// Build and solve a scenario, then report the schedule.
    Solve(SolveArgs),
    /// Build a scenario and write the model in LP format.
    Export(ExportArgs),
    /// Write synthetic zone records for testing and demos.
    GenerateZones(GenerateZonesArgs),
}

/// Arguments for the `solve` subcommand.
#[derive(clap::Args)]
pub struct SolveArgs {
    /// Path to TOML scenario file.
    #[arg(short, long, default_value = "ugaplan.toml")]
    pub config: PathBuf,

    /// Path for the JSON report; printed to stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override the horizon (days from 1 January).
    #[arg(long)]
    pub horizon: Option<u16>,
}

/// Arguments for the `export` subcommand.
#[derive(clap::Args)]
pub struct ExportArgs {
    /// Path to TOML scenario file.
    #[arg(short, long, default_value = "ugaplan.toml")]
    pub config: PathBuf,

    /// Path for the LP file.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Override the horizon (days from 1 January).
    #[arg(long)]
    pub horizon: Option<u16>,
}

/// Arguments for the `generate-zones` subcommand.
#[derive(clap::Args)]
pub struct GenerateZonesArgs {
    /// Number of zones.
    #[arg(short = 'n', long)]
    pub count: usize,

    /// RNG seed; random when omitted.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Path for the TOML zones file.
    #[arg(short, long)]
    pub output: PathBuf,
}
