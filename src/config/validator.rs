//! Configuration validation

use super::*;
use crate::error::{IntegrationError, IntegrationResult, MAX_TOTAL_INTERVALS};
use anyhow::Result;
use tracing::warn;

/// Integration parameters after validation and clamping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedIntegration {
    pub total_intervals: u64,
    pub worker_count: usize,
    /// `1 / total_intervals`
    pub step: f64,
}

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<ValidatedIntegration> {
    let validated = validate_integration(&config.integration)?;
    validate_output(&config.output)?;

    let cpus = num_cpus::get();
    if validated.worker_count > cpus {
        warn!(
            workers = validated.worker_count,
            cpus, "worker count exceeds available CPUs; workers will time-share"
        );
    }

    Ok(validated)
}

/// Validate integration parameters
///
/// Rejects `total_intervals` outside `1..=2147483647` and clamps a
/// non-positive `worker_count` to a single worker.
pub fn validate_integration(config: &IntegrationConfig) -> IntegrationResult<ValidatedIntegration> {
    let total = config.total_intervals;
    if total <= 0 || total > MAX_TOTAL_INTERVALS {
        return Err(IntegrationError::InvalidConfiguration {
            total_intervals: total,
        });
    }

    let total_intervals = total as u64;
    Ok(ValidatedIntegration {
        total_intervals,
        worker_count: effective_worker_count(config.worker_count),
        step: 1.0 / total_intervals as f64,
    })
}

/// Worker count actually used for a requested value
pub fn effective_worker_count(requested: i64) -> usize {
    if requested <= 0 {
        1
    } else {
        usize::try_from(requested).unwrap_or(usize::MAX)
    }
}

/// Validate output configuration
pub fn validate_output(output: &OutputConfig) -> Result<()> {
    if let Some(ref path) = output.json_output {
        if path.as_os_str().is_empty() {
            anyhow::bail!("json_output path must not be empty");
        }
        if path.is_dir() {
            anyhow::bail!("json_output {} is a directory", path.display());
        }
    }

    if output.json_pretty && output.json_output.is_none() {
        anyhow::bail!("json_pretty requires json_output");
    }

    Ok(())
}
