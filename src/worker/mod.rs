//! Partial integrator
//!
//! A worker owns one [`Partition`] and evaluates the integrand `4 / (1 + x²)`
//! at the midpoint of every sub-interval in it. The resulting sum is *not*
//! scaled by the step size; the coordinator does that once after reduction.
//!
//! Workers share nothing but the read-only step size. Each one runs a tight
//! loop with no I/O and no locks, then hands its [`WorkerResult`] back by
//! value.
//!
//! # Example
//!
//! ```
//! use pipulse::partition::Partition;
//! use pipulse::worker::{integrate, Worker};
//!
//! let h = 0.25;
//! let left = integrate(Partition::new(0, 2), h);
//! let right = Worker::new(1, Partition::new(2, 4), h).run();
//!
//! let estimate = (left + right.partial_sum) * h;
//! assert!((estimate - 3.146800518394).abs() < 1e-12);
//! ```

use crate::partition::Partition;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// The integrand `f(x) = 4 / (1 + x²)`; its integral over `[0, 1]` is π
#[inline(always)]
pub fn integrand(x: f64) -> f64 {
    4.0 / (1.0 + x * x)
}

/// Sum the integrand over the midpoints of `partition`
///
/// Indices are visited in ascending order. An empty partition yields `0.0`.
pub fn integrate(partition: Partition, h: f64) -> f64 {
    let mut sum = 0.0;
    for i in partition.start..partition.end {
        let x = h * (i as f64 + 0.5);
        sum += integrand(x);
    }
    sum
}

/// Outcome of one worker, moved to the coordinator after the thread exits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerResult {
    pub worker_id: usize,
    pub partition: Partition,
    /// Unscaled sum of integrand values over the partition
    pub partial_sum: f64,
    #[serde(with = "duration_secs")]
    pub elapsed: Duration,
}

/// One unit of integration work
#[derive(Debug, Clone, Copy)]
pub struct Worker {
    id: usize,
    partition: Partition,
    step: f64,
}

impl Worker {
    pub fn new(id: usize, partition: Partition, step: f64) -> Self {
        Self { id, partition, step }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn partition(&self) -> Partition {
        self.partition
    }

    /// Run the worker to completion
    pub fn run(self) -> WorkerResult {
        let start = Instant::now();
        let partial_sum = integrate(self.partition, self.step);

        WorkerResult {
            worker_id: self.id,
            partition: self.partition,
            partial_sum,
            elapsed: start.elapsed(),
        }
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(d)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}
