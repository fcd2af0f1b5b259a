//! Reduction coordinator
//!
//! Orchestrates a run: validates the configuration, partitions the interval
//! range, launches one worker per partition, joins every worker and reduces
//! their partial sums into a [`FinalEstimate`].
//!
//! A run either yields an estimate built from *every* worker or fails. If a
//! worker cannot be launched, the workers already running are joined, their
//! results discarded, and the launch error is returned.
//!
//! # Example
//!
//! ```
//! use pipulse::config::IntegrationConfig;
//! use pipulse::coordinator::compute_pi_estimate;
//!
//! let estimate = compute_pi_estimate(IntegrationConfig::new(4, 2))?;
//! assert!((estimate.value - 3.146800518394).abs() < 1e-12);
//! assert_eq!(estimate.workers.len(), 2);
//! # Ok::<(), pipulse::IntegrationError>(())
//! ```

pub mod launcher;

use crate::config::validator::{validate_integration, ValidatedIntegration};
use crate::config::IntegrationConfig;
use crate::error::{IntegrationError, IntegrationResult};
use crate::partition::{try_partition, Partition};
use crate::stats::aggregator::ReductionAggregator;
use crate::stats::FinalEstimate;
use crate::util::clock::{Clock, MonotonicClock};
use crate::worker::{Worker, WorkerResult};
use launcher::{TaskLauncher, ThreadLauncher};
use std::thread::JoinHandle;
use tracing::{debug, error, info};

/// Estimate π with the default thread launcher and monotonic clock
pub fn compute_pi_estimate(config: IntegrationConfig) -> IntegrationResult<FinalEstimate> {
    Coordinator::new().run(config)
}

/// Partition table for a validated plan
///
/// Fails with `AllocationFailure` when the table cannot be allocated, e.g. for
/// a worker count near `usize::MAX`.
pub fn plan_partitions(plan: &ValidatedIntegration) -> IntegrationResult<Vec<Partition>> {
    try_partition(plan.total_intervals, plan.worker_count).map_err(|source| {
        IntegrationError::AllocationFailure {
            what: "partition table",
            source,
        }
    })
}

/// Runs integration jobs with a given launcher and clock
#[derive(Debug, Default)]
pub struct Coordinator<L = ThreadLauncher, C = MonotonicClock> {
    launcher: L,
    clock: C,
}

impl Coordinator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<L: TaskLauncher, C: Clock> Coordinator<L, C> {
    pub fn with_parts(launcher: L, clock: C) -> Self {
        Self { launcher, clock }
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Validate `config` and run it to completion
    pub fn run(&self, config: IntegrationConfig) -> IntegrationResult<FinalEstimate> {
        let plan = validate_integration(&config)?;
        self.run_validated(plan)
    }

    /// Run an already validated plan
    ///
    /// Elapsed time covers partitioning, launching and joining.
    pub fn run_validated(&self, plan: ValidatedIntegration) -> IntegrationResult<FinalEstimate> {
        debug!(
            total_intervals = plan.total_intervals,
            workers = plan.worker_count,
            step = plan.step,
            "starting integration"
        );

        let start = self.clock.now();

        let partitions = plan_partitions(&plan)?;
        let handles = self.launch_all(&partitions, plan.step)?;
        let aggregator = join_all(handles, plan.worker_count)?;

        let end = self.clock.now();

        let (sum, results) = aggregator.finish()?;
        let estimate = FinalEstimate::from_sum(
            sum,
            plan.step,
            plan.total_intervals,
            results,
            end.duration_since(start),
        );

        info!(
            value = estimate.value,
            error = estimate.absolute_error,
            elapsed_s = estimate.elapsed_seconds,
            "integration complete"
        );

        Ok(estimate)
    }

    /// Launch one worker per partition
    ///
    /// On a launch failure every worker launched so far is joined before the
    /// error is returned, so no thread outlives the failed run.
    fn launch_all(
        &self,
        partitions: &[Partition],
        step: f64,
    ) -> IntegrationResult<Vec<JoinHandle<WorkerResult>>> {
        let mut handles = Vec::new();
        handles
            .try_reserve_exact(partitions.len())
            .map_err(|source| IntegrationError::AllocationFailure {
                what: "worker handle table",
                source,
            })?;

        for (worker_id, &partition) in partitions.iter().enumerate() {
            let worker = Worker::new(worker_id, partition, step);
            match self.launcher.launch(worker) {
                Ok(handle) => {
                    debug!(worker_id, start = partition.start, end = partition.end, "launched worker");
                    handles.push(handle);
                }
                Err(source) => {
                    error!(worker_id, %source, launched = handles.len(), "failed to launch worker; aborting run");
                    discard_all(handles);
                    return Err(IntegrationError::ResourceExhaustion { worker_id, source });
                }
            }
        }

        Ok(handles)
    }
}

/// Join every handle in index order and collect the results
///
/// All handles are joined even after a failure, so a panicking worker never
/// leaves its siblings running unattended. The first failure is returned.
fn join_all(
    handles: Vec<JoinHandle<WorkerResult>>,
    expected: usize,
) -> IntegrationResult<ReductionAggregator> {
    let mut aggregator = ReductionAggregator::new(expected)?;
    let mut first_error = None;

    for (worker_id, handle) in handles.into_iter().enumerate() {
        let outcome = match handle.join() {
            Ok(result) => aggregator.add_worker(result),
            Err(_) => {
                error!(worker_id, "worker panicked");
                Err(IntegrationError::WorkerPanicked { worker_id })
            }
        };

        if let Err(e) = outcome {
            if first_error.is_none() {
                first_error = Some(e);
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(aggregator),
    }
}

/// Join and drop the results of workers belonging to an aborted run
fn discard_all(handles: Vec<JoinHandle<WorkerResult>>) {
    for handle in handles {
        let _ = handle.join();
    }
}
