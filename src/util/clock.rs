//! Monotonic clock collaborator
//!
//! The coordinator reads a clock twice per run, once before partitioning and
//! once after the last worker is joined. The reading is only ever reported,
//! never used to make decisions.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Point in time on a monotonic clock, in nanoseconds since an arbitrary origin
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClockReading {
    nanos: u64,
}

impl ClockReading {
    pub fn from_nanos(nanos: u64) -> Self {
        Self { nanos }
    }

    pub fn as_nanos(&self) -> u64 {
        self.nanos
    }

    /// Duration since an earlier reading
    ///
    /// Saturates at zero so a misbehaving clock can never yield a negative span.
    #[inline(always)]
    pub fn duration_since(&self, earlier: ClockReading) -> Duration {
        Duration::from_nanos(self.nanos.saturating_sub(earlier.nanos))
    }
}

/// Source of monotonic timestamps
pub trait Clock: Send + Sync {
    fn now(&self) -> ClockReading;
}

/// `CLOCK_MONOTONIC` read directly through `clock_gettime`
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    #[inline(always)]
    fn now(&self) -> ClockReading {
        let mut ts = libc::timespec {
            tv_sec: 0,
            tv_nsec: 0,
        };

        // CLOCK_MONOTONIC is always available on supported platforms and
        // clock_gettime cannot fail for it with a valid timespec pointer.
        unsafe {
            libc::clock_gettime(libc::CLOCK_MONOTONIC, &mut ts);
        }

        ClockReading::from_nanos((ts.tv_sec as u64) * 1_000_000_000 + (ts.tv_nsec as u64))
    }
}

/// Clock that advances by a fixed step on every read
///
/// Used in tests to make elapsed-time reporting deterministic.
#[derive(Debug)]
pub struct SteppingClock {
    current: AtomicU64,
    step: u64,
}

impl SteppingClock {
    pub fn new(start: Duration, step: Duration) -> Self {
        Self {
            current: AtomicU64::new(start.as_nanos() as u64),
            step: step.as_nanos() as u64,
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> ClockReading {
        ClockReading::from_nanos(self.current.fetch_add(self.step, Ordering::Relaxed))
    }
}
