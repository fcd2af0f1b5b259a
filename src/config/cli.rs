//! CLI argument parsing using clap

use clap::Parser;
use std::path::PathBuf;

/// PiPulse - parallel midpoint-rule estimation of pi
#[derive(Parser, Debug)]
#[command(name = "pipulse")]
#[command(version, about, long_about = None)]
#[command(allow_negative_numbers = true)]
pub struct Cli {
    /// Number of worker threads (default 4; values below 1 run on one worker)
    #[arg(value_name = "WORKER_COUNT")]
    pub worker_count: Option<i64>,

    /// Number of midpoint-rule intervals (1-2147483647, default 2000000000)
    #[arg(value_name = "TOTAL_INTERVALS")]
    pub total_intervals: Option<i64>,

    /// TOML configuration file; positional arguments override its values
    #[arg(short = 'c', long, env = "PIPULSE_CONFIG")]
    pub config: Option<PathBuf>,

    // === Output Options ===
    /// Write a JSON report to this file
    #[arg(long)]
    pub json_output: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub json_pretty: bool,

    /// Show per-worker partitions and partial sums
    #[arg(long)]
    pub per_worker_output: bool,

    // === Runtime Options ===
    /// Validate configuration and print the partition plan without computing
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate CLI arguments that do not depend on the config file
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.json_pretty && self.json_output.is_none() {
            anyhow::bail!("--json-pretty requires --json-output");
        }

        Ok(())
    }
}
