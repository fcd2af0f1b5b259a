//! PiPulse - parallel midpoint-rule estimation of pi
//!
//! PiPulse evaluates the integral of `4 / (1 + x²)` over `[0, 1]` with the
//! midpoint rule, splitting the intervals across a fixed number of worker
//! threads and reducing their partial sums into one estimate.
//!
//! # Architecture
//!
//! - **Partitioning**: `[0, N)` split into contiguous, balanced ranges
//! - **Workers**: one thread per range, each owning its own accumulator
//! - **Coordinator**: launch, join, exactly-once reduction, scaling by `h`
//! - **Reporting**: text report on stdout, optional JSON report
//!
//! # Example
//!
//! ```
//! use pipulse::{compute_pi_estimate, IntegrationConfig};
//!
//! let estimate = compute_pi_estimate(IntegrationConfig::new(1_000_000, 4))?;
//! assert!(estimate.absolute_error < 1e-11);
//! # Ok::<(), pipulse::IntegrationError>(())
//! ```

pub mod config;
pub mod coordinator;
pub mod error;
pub mod output;
pub mod partition;
pub mod stats;
pub mod util;
pub mod worker;

// Re-export commonly used types
pub use config::{Config, IntegrationConfig};
pub use coordinator::compute_pi_estimate;
pub use error::IntegrationError;
pub use stats::FinalEstimate;

/// Result type used at the application edge
pub type Result<T> = anyhow::Result<T>;
