//! PiPulse CLI entry point

use anyhow::{Context, Result};
use pipulse::config::cli::Cli;
use pipulse::config::toml::load_config;
use pipulse::config::validator::{validate_config, ValidatedIntegration};
use pipulse::config::Config;
use pipulse::coordinator::{plan_partitions, Coordinator};
use pipulse::output::{json, text};
use pipulse::util::time::format_count;
use std::io::{self, Write};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.debug);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&cli, &mut out)
}

/// Load, validate and execute one invocation, writing the report to `out`
///
/// Nothing is written to `out` until the configuration (and, for a dry run,
/// the partition plan) is known to be valid.
fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    cli.validate()?;

    let config = load_config(cli)?;
    let plan = validate_config(&config).context("Configuration validation failed")?;

    if cli.dry_run {
        let partitions = plan_partitions(&plan).context("Failed to build partition plan")?;
        write_header(out, &config, &plan)?;
        writeln!(out)?;
        text::write_plan(out, &partitions, plan.step)?;
        return Ok(());
    }

    write_header(out, &config, &plan)?;
    writeln!(out)?;
    out.flush()?;

    let estimate = Coordinator::new()
        .run_validated(plan)
        .context("Integration failed")?;

    text::write_results(out, &estimate, &config.output).context("Failed to write text report")?;

    if let Some(ref path) = config.output.json_output {
        let report = json::build_report(&estimate, &config.integration, config.output.per_worker_output);
        json::write_json_output(path, &report, config.output.json_pretty)?;
        writeln!(out)?;
        writeln!(out, "JSON report written to {}", path.display())?;
    }

    Ok(())
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // Logs go to stderr so they never interleave with the report.
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn write_header<W: Write>(out: &mut W, config: &Config, plan: &ValidatedIntegration) -> io::Result<()> {
    writeln!(out, "PiPulse v{}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out)?;
    writeln!(out, "Configuration:")?;
    writeln!(out, "  Intervals: {}", format_count(plan.total_intervals))?;
    if config.integration.worker_count != plan.worker_count as i64 {
        writeln!(
            out,
            "  Workers:   {} (requested {})",
            plan.worker_count, config.integration.worker_count
        )?;
    } else {
        writeln!(out, "  Workers:   {}", plan.worker_count)?;
    }
    writeln!(out, "  CPUs:      {}", num_cpus::get())?;
    if let Some(ref path) = config.output.json_output {
        writeln!(out, "  JSON:      {}", path.display())?;
    }
    Ok(())
}
