//! Range partitioning
//!
//! Splits the index range `[0, total_intervals)` into one contiguous,
//! half-open sub-range per worker. The first `total % workers` partitions get
//! one extra index, so partition sizes never differ by more than one.
//!
//! # Example
//!
//! ```
//! use pipulse::partition::{partition, Partition};
//!
//! let parts = partition(10, 3);
//! assert_eq!(parts, vec![
//!     Partition::new(0, 4),
//!     Partition::new(4, 7),
//!     Partition::new(7, 10),
//! ]);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::TryReserveError;

/// Half-open range of integration indices assigned to one worker
///
/// Deserialization rejects ranges with `start > end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPartition")]
pub struct Partition {
    pub start: u64,
    pub end: u64,
}

#[derive(Deserialize)]
struct RawPartition {
    start: u64,
    end: u64,
}

impl TryFrom<RawPartition> for Partition {
    type Error = String;

    fn try_from(raw: RawPartition) -> Result<Self, Self::Error> {
        if raw.start > raw.end {
            return Err(format!("partition start {} > end {}", raw.start, raw.end));
        }
        Ok(Self {
            start: raw.start,
            end: raw.end,
        })
    }
}

impl Partition {
    pub fn new(start: u64, end: u64) -> Self {
        debug_assert!(start <= end, "partition start {} > end {}", start, end);
        Self { start, end }
    }

    /// Number of indices in the partition
    #[inline]
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partition `[0, total_intervals)` into `worker_count` contiguous ranges
///
/// Always returns exactly `worker_count` partitions. When there are more
/// workers than intervals, the trailing partitions are empty.
///
/// `worker_count` must be at least 1; the coordinator clamps it before calling.
pub fn partition(total_intervals: u64, worker_count: usize) -> Vec<Partition> {
    partition_iter(total_intervals, worker_count).collect()
}

/// Like [`partition`], but reports allocation failure instead of aborting
pub fn try_partition(
    total_intervals: u64,
    worker_count: usize,
) -> Result<Vec<Partition>, TryReserveError> {
    let mut parts = Vec::new();
    parts.try_reserve_exact(worker_count)?;
    parts.extend(partition_iter(total_intervals, worker_count));
    Ok(parts)
}

/// Lazily yield the partitions of `[0, total_intervals)` in index order
pub fn partition_iter(
    total_intervals: u64,
    worker_count: usize,
) -> impl Iterator<Item = Partition> {
    assert!(worker_count >= 1, "worker_count must be at least 1");

    let workers = worker_count as u64;
    let base = total_intervals / workers;
    let remainder = total_intervals % workers;

    let mut cursor = 0u64;
    (0..workers).map(move |k| {
        let size = if k < remainder { base + 1 } else { base };
        let part = Partition::new(cursor, cursor + size);
        cursor += size;
        part
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_covering(parts: &[Partition], total: u64) {
        let mut expected_start = 0;
        for part in parts {
            assert_eq!(part.start, expected_start, "gap or overlap at {:?}", part);
            assert!(part.start <= part.end);
            expected_start = part.end;
        }
        assert_eq!(expected_start, total);
        assert_eq!(parts.iter().map(Partition::len).sum::<u64>(), total);
    }

    #[test]
    fn test_even_split() {
        let parts = partition(4, 2);
        assert_eq!(parts, vec![Partition::new(0, 2), Partition::new(2, 4)]);
    }

    #[test]
    fn test_remainder_goes_to_leading_partitions() {
        let parts = partition(11, 4);
        let sizes: Vec<u64> = parts.iter().map(Partition::len).collect();
        assert_eq!(sizes, vec![3, 3, 3, 2]);
        assert_covering(&parts, 11);
    }

    #[test]
    fn test_single_worker_takes_everything() {
        let parts = partition(100, 1);
        assert_eq!(parts, vec![Partition::new(0, 100)]);
    }

    #[test]
    fn test_more_workers_than_intervals() {
        let parts = partition(3, 5);
        assert_eq!(parts.len(), 5);
        assert_covering(&parts, 3);
        assert!(parts[3].is_empty());
        assert!(parts[4].is_empty());
        assert_eq!(parts[4], Partition::new(3, 3));
    }

    #[test]
    fn test_coverage_and_balance_grid() {
        for total in [1u64, 2, 7, 64, 100, 1_000, 1_001, 65_537] {
            for workers in 1..=64usize {
                let parts = partition(total, workers);
                assert_eq!(parts.len(), workers);
                assert_covering(&parts, total);

                let max = parts.iter().map(Partition::len).max().unwrap();
                let min = parts.iter().map(Partition::len).min().unwrap();
                assert!(max - min <= 1, "imbalance for total={} workers={}", total, workers);
            }
        }
    }

    #[test]
    fn test_large_total_does_not_overflow() {
        let total = i32::MAX as u64;
        let parts = partition(total, 7);
        assert_covering(&parts, total);
    }

    #[test]
    fn test_try_partition_matches_partition() {
        assert_eq!(try_partition(1_001, 8).unwrap(), partition(1_001, 8));
    }

    #[test]
    fn test_deserialize_rejects_inverted_range() {
        let err = serde_json::from_str::<Partition>(r#"{"start":5,"end":2}"#).unwrap_err();
        assert!(err.to_string().contains("partition start 5 > end 2"));

        let ok: Partition = serde_json::from_str(r#"{"start":2,"end":5}"#).unwrap();
        assert_eq!(ok, Partition::new(2, 5));
    }

    #[test]
    fn test_len_saturates_on_inverted_range() {
        let inverted = Partition { start: 5, end: 2 };
        assert_eq!(inverted.len(), 0);
        assert!(inverted.is_empty());
    }

    #[test]
    #[should_panic(expected = "worker_count must be at least 1")]
    fn test_zero_workers_panics() {
        partition(10, 0);
    }
}
