//! Run results
//!
//! [`FinalEstimate`] is the single externally observable output of a run. It is
//! built once by the coordinator after every worker result has been reduced.

pub mod aggregator;

use crate::worker::WorkerResult;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Reference value of π used for the reported absolute error
///
/// Written with 25 significant digits; the value is rounded to the nearest
/// `f64` at compile time.
#[allow(clippy::excessive_precision)]
pub const REFERENCE_PI: f64 = 3.141592653589793238462643;

/// Result of one complete integration run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalEstimate {
    /// Estimated value of π
    pub value: f64,
    /// `|value - REFERENCE_PI|`
    pub absolute_error: f64,
    /// Wall time of the partition, integrate and reduce phase
    pub elapsed_seconds: f64,
    pub total_intervals: u64,
    /// Effective worker count after clamping
    pub worker_count: usize,
    /// Step size `h = 1 / total_intervals`
    pub step: f64,
    /// Per-worker results, ordered by worker id
    pub workers: Vec<WorkerResult>,
}

impl FinalEstimate {
    /// Assemble an estimate from a reduced, unscaled sum
    pub fn from_sum(
        sum: f64,
        step: f64,
        total_intervals: u64,
        workers: Vec<WorkerResult>,
        elapsed: Duration,
    ) -> Self {
        let value = sum * step;
        Self {
            value,
            absolute_error: (value - REFERENCE_PI).abs(),
            elapsed_seconds: elapsed.as_secs_f64(),
            total_intervals,
            worker_count: workers.len(),
            step,
            workers,
        }
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_secs_f64(self.elapsed_seconds)
    }

    /// Largest minus smallest partition size across workers
    pub fn partition_imbalance(&self) -> u64 {
        let sizes = self.workers.iter().map(|w| w.partition.len());
        match (sizes.clone().max(), sizes.min()) {
            (Some(max), Some(min)) => max - min,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::Partition;

    fn result(id: usize, start: u64, end: u64, sum: f64) -> WorkerResult {
        WorkerResult {
            worker_id: id,
            partition: Partition::new(start, end),
            partial_sum: sum,
            elapsed: Duration::ZERO,
        }
    }

    #[test]
    fn test_reference_pi_matches_std() {
        assert_eq!(REFERENCE_PI, std::f64::consts::PI);
    }

    #[test]
    fn test_from_sum_scales_and_measures_error() {
        let workers = vec![result(0, 0, 2, 6.0), result(1, 2, 4, 6.0)];
        let estimate = FinalEstimate::from_sum(12.0, 0.25, 4, workers, Duration::from_millis(20));

        assert_eq!(estimate.value, 3.0);
        assert!((estimate.absolute_error - (REFERENCE_PI - 3.0)).abs() < 1e-15);
        assert_eq!(estimate.worker_count, 2);
        assert_eq!(estimate.total_intervals, 4);
        assert!((estimate.elapsed_seconds - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_partition_imbalance() {
        let workers = vec![result(0, 0, 3, 0.0), result(1, 3, 5, 0.0), result(2, 5, 7, 0.0)];
        let estimate = FinalEstimate::from_sum(0.0, 1.0, 7, workers, Duration::ZERO);
        assert_eq!(estimate.partition_imbalance(), 1);
    }

    #[test]
    fn test_estimate_with_inverted_partition_does_not_load() {
        let workers = vec![result(0, 0, 2, 6.0), result(1, 2, 4, 6.0)];
        let estimate = FinalEstimate::from_sum(12.0, 0.25, 4, workers, Duration::ZERO);

        let mut value = serde_json::to_value(&estimate).unwrap();
        value["workers"][1]["partition"]["start"] = serde_json::json!(9);
        assert!(serde_json::from_value::<FinalEstimate>(value).is_err());
    }
}
