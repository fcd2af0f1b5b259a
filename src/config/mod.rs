//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.

pub mod cli;
pub mod toml;
pub mod validator;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Default number of worker threads
pub const DEFAULT_WORKER_COUNT: i64 = 4;

/// Default number of midpoint-rule intervals
pub const DEFAULT_TOTAL_INTERVALS: i64 = 2_000_000_000;

/// Complete run configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub integration: IntegrationConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Integration parameters as supplied by the user
///
/// Both fields are signed so that out-of-range input survives parsing and is
/// rejected (or clamped) by the validator instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationConfig {
    /// Number of midpoint-rule sub-intervals over `[0, 1]`
    #[serde(default = "default_total_intervals")]
    pub total_intervals: i64,
    /// Number of concurrent workers; values below 1 run serially
    #[serde(default = "default_worker_count")]
    pub worker_count: i64,
}

fn default_total_intervals() -> i64 {
    DEFAULT_TOTAL_INTERVALS
}

fn default_worker_count() -> i64 {
    DEFAULT_WORKER_COUNT
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            total_intervals: DEFAULT_TOTAL_INTERVALS,
            worker_count: DEFAULT_WORKER_COUNT,
        }
    }
}

impl IntegrationConfig {
    pub fn new(total_intervals: i64, worker_count: i64) -> Self {
        Self {
            total_intervals,
            worker_count,
        }
    }
}

impl fmt::Display for IntegrationConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} intervals across {} workers",
            self.total_intervals, self.worker_count
        )
    }
}

/// Report output configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Write a JSON report to this path
    #[serde(default)]
    pub json_output: Option<PathBuf>,
    /// Pretty-print the JSON report
    #[serde(default)]
    pub json_pretty: bool,
    /// Include the per-worker table in the text report
    #[serde(default)]
    pub per_worker_output: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.integration.total_intervals, 2_000_000_000);
        assert_eq!(config.integration.worker_count, 4);
        assert!(config.output.json_output.is_none());
        assert!(!config.output.per_worker_output);
    }

    #[test]
    fn test_display() {
        let config = IntegrationConfig::new(100, 3);
        assert_eq!(config.to_string(), "100 intervals across 3 workers");
    }
}
