//! Reduction of worker results
//!
//! The aggregator holds one slot per worker. Each worker result fills exactly
//! one slot; a second result for the same slot is rejected. The reduction only
//! succeeds once every slot is filled, so an estimate can never be built from
//! a partial set of workers.
//!
//! The sum is always taken in worker-id order, independent of the order in
//! which results were added.
//!
//! # Example
//!
//! ```
//! use pipulse::partition::Partition;
//! use pipulse::stats::aggregator::ReductionAggregator;
//! use pipulse::worker::Worker;
//!
//! let mut aggregator = ReductionAggregator::new(2)?;
//! aggregator.add_worker(Worker::new(1, Partition::new(2, 4), 0.25).run())?;
//! aggregator.add_worker(Worker::new(0, Partition::new(0, 2), 0.25).run())?;
//!
//! let (sum, results) = aggregator.finish()?;
//! assert_eq!(results[0].worker_id, 0);
//! assert!((sum * 0.25 - 3.146800518394).abs() < 1e-12);
//! # Ok::<(), pipulse::IntegrationError>(())
//! ```

use crate::error::{IntegrationError, IntegrationResult};
use crate::worker::WorkerResult;

/// Exactly-once collector for per-worker partial sums
#[derive(Debug)]
pub struct ReductionAggregator {
    slots: Vec<Option<WorkerResult>>,
    collected: usize,
}

impl ReductionAggregator {
    /// Create an aggregator expecting `num_workers` results
    pub fn new(num_workers: usize) -> IntegrationResult<Self> {
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(num_workers)
            .map_err(|source| IntegrationError::AllocationFailure {
                what: "worker result slots",
                source,
            })?;
        slots.resize_with(num_workers, || None);

        Ok(Self { slots, collected: 0 })
    }

    /// Number of workers this aggregator expects
    pub fn num_workers(&self) -> usize {
        self.slots.len()
    }

    /// Number of results collected so far
    pub fn num_collected(&self) -> usize {
        self.collected
    }

    pub fn is_complete(&self) -> bool {
        self.collected == self.slots.len()
    }

    /// Record one worker's result
    ///
    /// Fails if the worker id is out of range or its slot is already filled.
    pub fn add_worker(&mut self, result: WorkerResult) -> IntegrationResult<()> {
        let worker_id = result.worker_id;
        match self.slots.get_mut(worker_id) {
            Some(slot) if slot.is_none() => {
                *slot = Some(result);
                self.collected += 1;
                Ok(())
            }
            _ => Err(IntegrationError::UnexpectedResult { worker_id }),
        }
    }

    /// Unscaled sum over all workers, in worker-id order
    pub fn total(&self) -> IntegrationResult<f64> {
        self.ensure_complete()?;
        Ok(sum_partials(
            self.slots.iter().flatten().map(|r| r.partial_sum),
        ))
    }

    /// Consume the aggregator, returning the sum and the ordered results
    pub fn finish(self) -> IntegrationResult<(f64, Vec<WorkerResult>)> {
        let total = self.total()?;
        let results = self.slots.into_iter().flatten().collect();
        Ok((total, results))
    }

    fn ensure_complete(&self) -> IntegrationResult<()> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(IntegrationError::IncompleteReduction {
                expected: self.slots.len(),
                collected: self.collected,
            })
        }
    }
}

/// Left-to-right sum of partial results
pub fn sum_partials<I>(partials: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    partials.into_iter().fold(0.0, |acc, x| acc + x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::{partition, Partition};
    use crate::worker::{integrate, Worker};
    use std::time::Duration;

    fn result(id: usize, sum: f64) -> WorkerResult {
        WorkerResult {
            worker_id: id,
            partition: Partition::new(0, 0),
            partial_sum: sum,
            elapsed: Duration::ZERO,
        }
    }

    #[test]
    fn test_aggregator_new() {
        let aggregator = ReductionAggregator::new(3).unwrap();
        assert_eq!(aggregator.num_workers(), 3);
        assert_eq!(aggregator.num_collected(), 0);
        assert!(!aggregator.is_complete());
    }

    #[test]
    fn test_out_of_order_results_are_reordered() {
        let mut aggregator = ReductionAggregator::new(3).unwrap();
        aggregator.add_worker(result(2, 3.0)).unwrap();
        aggregator.add_worker(result(0, 1.0)).unwrap();
        aggregator.add_worker(result(1, 2.0)).unwrap();

        let (sum, results) = aggregator.finish().unwrap();
        assert_eq!(sum, 6.0);
        let ids: Vec<usize> = results.iter().map(|r| r.worker_id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_duplicate_result_rejected() {
        let mut aggregator = ReductionAggregator::new(2).unwrap();
        aggregator.add_worker(result(0, 1.0)).unwrap();

        let err = aggregator.add_worker(result(0, 1.0)).unwrap_err();
        assert!(matches!(err, IntegrationError::UnexpectedResult { worker_id: 0 }));
        assert_eq!(aggregator.num_collected(), 1);
    }

    #[test]
    fn test_out_of_range_result_rejected() {
        let mut aggregator = ReductionAggregator::new(2).unwrap();
        let err = aggregator.add_worker(result(5, 1.0)).unwrap_err();
        assert!(matches!(err, IntegrationError::UnexpectedResult { worker_id: 5 }));
    }

    #[test]
    fn test_incomplete_reduction_refuses_to_sum() {
        let mut aggregator = ReductionAggregator::new(3).unwrap();
        aggregator.add_worker(result(0, 1.0)).unwrap();
        aggregator.add_worker(result(2, 1.0)).unwrap();

        let err = aggregator.finish().unwrap_err();
        assert!(matches!(
            err,
            IntegrationError::IncompleteReduction { expected: 3, collected: 2 }
        ));
    }

    #[test]
    fn test_empty_aggregator_sums_to_zero() {
        let aggregator = ReductionAggregator::new(0).unwrap();
        assert_eq!(aggregator.total().unwrap(), 0.0);
    }

    #[test]
    fn test_reduction_invariant_under_permutation() {
        let total = 100_003u64;
        let h = 1.0 / total as f64;
        let partials: Vec<f64> = partition(total, 16)
            .into_iter()
            .map(|p| integrate(p, h))
            .collect();
        let canonical = sum_partials(partials.iter().copied());

        // Deterministic pseudo-random permutations (xorshift driven Fisher-Yates).
        let mut state = 0x9E37_79B9_7F4A_7C15u64;
        for _ in 0..50 {
            let mut shuffled = partials.clone();
            for i in (1..shuffled.len()).rev() {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                let j = (state % (i as u64 + 1)) as usize;
                shuffled.swap(i, j);
            }
            let permuted = sum_partials(shuffled);
            assert!(((permuted - canonical) / canonical).abs() < 1e-9);
        }

        let reversed = sum_partials(partials.iter().rev().copied());
        assert!(((reversed - canonical) / canonical).abs() < 1e-9);
    }

    #[test]
    fn test_aggregated_workers_match_serial_sum() {
        let total = 1_000u64;
        let h = 1.0 / total as f64;
        let mut aggregator = ReductionAggregator::new(4).unwrap();
        for (id, part) in partition(total, 4).into_iter().enumerate().rev() {
            aggregator.add_worker(Worker::new(id, part, h).run()).unwrap();
        }

        let serial = integrate(Partition::new(0, total), h);
        let sum = aggregator.total().unwrap();
        assert!(((sum - serial) / serial).abs() < 1e-12);
    }
}
