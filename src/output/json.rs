//! JSON output formatting
//!
//! The JSON report carries the same figures as the text report plus the
//! configuration that produced them and, optionally, per-worker detail.

use crate::config::IntegrationConfig;
use crate::stats::{FinalEstimate, REFERENCE_PI};
use crate::util::time::{calculate_rate, format_duration};
use crate::worker::WorkerResult;
use crate::Result;
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

/// Duration with both seconds and human-readable format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonDuration {
    pub seconds: f64,
    pub human: String,
}

impl JsonDuration {
    pub fn from_duration(d: Duration) -> Self {
        Self {
            seconds: d.as_secs_f64(),
            human: format_duration(d),
        }
    }
}

/// Configuration echo: what was asked for and what actually ran
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRunConfig {
    pub total_intervals: u64,
    pub requested_workers: i64,
    pub workers: usize,
    pub step: f64,
}

/// Estimate and its quality
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonEstimate {
    pub value: f64,
    pub reference: f64,
    pub absolute_error: f64,
    pub elapsed: JsonDuration,
    pub intervals_per_sec: f64,
}

/// Complete JSON report for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonReport {
    pub tool: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub config: JsonRunConfig,
    pub estimate: JsonEstimate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<Vec<WorkerResult>>,
}

/// Build a report from a finished run
pub fn build_report(
    estimate: &FinalEstimate,
    requested: &IntegrationConfig,
    include_workers: bool,
) -> JsonReport {
    JsonReport {
        tool: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        config: JsonRunConfig {
            total_intervals: estimate.total_intervals,
            requested_workers: requested.worker_count,
            workers: estimate.worker_count,
            step: estimate.step,
        },
        estimate: JsonEstimate {
            value: estimate.value,
            reference: REFERENCE_PI,
            absolute_error: estimate.absolute_error,
            elapsed: JsonDuration::from_duration(estimate.elapsed()),
            intervals_per_sec: calculate_rate(estimate.total_intervals, estimate.elapsed()),
        },
        workers: include_workers.then(|| estimate.workers.clone()),
    }
}

/// Write JSON report to file
pub fn write_json_output(output_path: &Path, report: &JsonReport, pretty: bool) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create JSON output: {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);

    if pretty {
        serde_json::to_writer_pretty(&mut writer, report)?;
    } else {
        serde_json::to_writer(&mut writer, report)?;
    }
    writer.flush()?;

    Ok(())
}
