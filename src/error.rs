//! Error taxonomy for the integration core
//!
//! The core keeps a small typed error surface. Application layers (CLI, config
//! files, report writers) wrap these in `anyhow::Error` with added context.

use std::collections::TryReserveError;
use thiserror::Error;

/// Largest interval count accepted by the validator.
pub const MAX_TOTAL_INTERVALS: i64 = i32::MAX as i64;

/// Convenience result alias for fallible core operations.
pub type IntegrationResult<T, E = IntegrationError> = std::result::Result<T, E>;

/// Errors surfaced by the integration core
///
/// Every variant is fatal to the current run. The core never retries and never
/// reports an estimate built from a partial set of workers.
#[derive(Debug, Error)]
pub enum IntegrationError {
    /// `total_intervals` outside `1..=MAX_TOTAL_INTERVALS`
    #[error("total_intervals must be between 1 and {max}, got {total_intervals}", max = MAX_TOTAL_INTERVALS)]
    InvalidConfiguration { total_intervals: i64 },

    /// A worker thread could not be created
    #[error("failed to launch worker {worker_id}")]
    ResourceExhaustion {
        worker_id: usize,
        #[source]
        source: std::io::Error,
    },

    /// Per-partition bookkeeping could not be allocated
    #[error("failed to allocate {what}")]
    AllocationFailure {
        what: &'static str,
        #[source]
        source: TryReserveError,
    },

    /// A worker thread panicked before returning its partial sum
    #[error("worker {worker_id} panicked")]
    WorkerPanicked { worker_id: usize },

    /// A worker result arrived for a slot that was already filled or out of range
    #[error("duplicate or unexpected result from worker {worker_id}")]
    UnexpectedResult { worker_id: usize },

    /// The reduction did not receive exactly one result per worker
    #[error("reduction expected {expected} worker results, collected {collected}")]
    IncompleteReduction { expected: usize, collected: usize },
}

impl IntegrationError {
    /// Whether the error comes from bad input rather than the runtime
    pub fn is_configuration(&self) -> bool {
        matches!(self, IntegrationError::InvalidConfiguration { .. })
    }
}
