//! Human-readable text output

use crate::config::OutputConfig;
use crate::partition::Partition;
use crate::stats::FinalEstimate;
use crate::util::time::{calculate_rate, format_count, format_duration, format_rate};
use std::io::{self, Write};

const RULE: &str = "═══════════════════════════════════════════════════════════";

/// Write run results
///
/// The estimate and its error are printed with 20 decimal places, the
/// elapsed time of the parallel phase with 6.
pub fn write_results<W: Write>(
    out: &mut W,
    estimate: &FinalEstimate,
    output: &OutputConfig,
) -> io::Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "                    RESULTS")?;
    writeln!(out, "{}", RULE)?;
    writeln!(out)?;

    writeln!(out, "pi is approximately = {:.20}", estimate.value)?;
    writeln!(out, "Error               = {:.20}", estimate.absolute_error)?;
    writeln!(
        out,
        "CalcPi (parallel) elapsed time = {:.6} seconds",
        estimate.elapsed_seconds
    )?;
    writeln!(out)?;

    let rate = calculate_rate(estimate.total_intervals, estimate.elapsed());
    writeln!(out, "Intervals: {}", format_count(estimate.total_intervals))?;
    writeln!(out, "Workers:   {}", estimate.worker_count)?;
    writeln!(out, "Step:      {:e}", estimate.step)?;
    writeln!(out, "Rate:      {} intervals/s", format_rate(rate))?;

    if output.per_worker_output {
        writeln!(out)?;
        write_worker_table(out, estimate)?;
    }

    Ok(())
}

fn write_worker_table<W: Write>(out: &mut W, estimate: &FinalEstimate) -> io::Result<()> {
    writeln!(out, "Per-worker:")?;
    writeln!(
        out,
        "  {:>6}  {:>12}  {:>12}  {:>12}  {:>24}  {:>10}",
        "worker", "start", "end", "size", "partial sum", "elapsed"
    )?;
    for w in &estimate.workers {
        writeln!(
            out,
            "  {:>6}  {:>12}  {:>12}  {:>12}  {:>24.12}  {:>10}",
            w.worker_id,
            w.partition.start,
            w.partition.end,
            w.partition.len(),
            w.partial_sum,
            format_duration(w.elapsed)
        )?;
    }
    writeln!(out, "  Imbalance: {} interval(s)", estimate.partition_imbalance())?;
    Ok(())
}

/// Write the partition plan for a dry run
pub fn write_plan<W: Write>(out: &mut W, partitions: &[Partition], step: f64) -> io::Result<()> {
    writeln!(out, "Dry run - configuration validated successfully")?;
    writeln!(out)?;
    writeln!(out, "Step size: {:e}", step)?;
    writeln!(out, "Partitions:")?;
    for (id, p) in partitions.iter().enumerate() {
        writeln!(
            out,
            "  worker {:>3}: [{}, {}) ({} intervals)",
            id,
            p.start,
            p.end,
            format_count(p.len())
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worker::WorkerResult;
    use std::time::Duration;

    fn sample_estimate() -> FinalEstimate {
        let workers = vec![
            WorkerResult {
                worker_id: 0,
                partition: Partition::new(0, 2),
                partial_sum: 7.445310853530032,
                elapsed: Duration::from_micros(3),
            },
            WorkerResult {
                worker_id: 1,
                partition: Partition::new(2, 4),
                partial_sum: 5.141891220045739,
                elapsed: Duration::from_micros(2),
            },
        ];
        FinalEstimate::from_sum(
            7.445310853530032 + 5.141891220045739,
            0.25,
            4,
            workers,
            Duration::from_millis(1),
        )
    }

    fn render(output: &OutputConfig) -> String {
        let mut buf = Vec::new();
        write_results(&mut buf, &sample_estimate(), output).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_report_lines() {
        let text = render(&OutputConfig::default());
        assert!(text.contains("pi is approximately = 3.14680051839394"));
        assert!(text.contains("Error               = 0.0052078648041"));
        assert!(text.contains("CalcPi (parallel) elapsed time = 0.001000 seconds"));
        assert!(text.contains("Workers:   2"));
        assert!(!text.contains("Per-worker:"));
    }

    #[test]
    fn test_report_twenty_decimals() {
        let text = render(&OutputConfig::default());
        let line = text
            .lines()
            .find(|l| l.starts_with("pi is approximately"))
            .unwrap();
        let decimals = line.rsplit('.').next().unwrap();
        assert_eq!(decimals.len(), 20);
    }

    #[test]
    fn test_per_worker_table() {
        let output = OutputConfig {
            per_worker_output: true,
            ..Default::default()
        };
        let text = render(&output);
        assert!(text.contains("Per-worker:"));
        assert!(text.contains("Imbalance: 0 interval(s)"));
        assert!(text.contains("3.00us"));
        assert!(text.contains("2.00us"));
    }

    #[test]
    fn test_plan_lists_every_partition() {
        let mut buf = Vec::new();
        write_plan(&mut buf, &[Partition::new(0, 2), Partition::new(2, 3)], 1.0 / 3.0).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("  worker   0: [0, 2) (2 intervals)"));
        assert!(text.contains("  worker   1: [2, 3) (1 intervals)"));
    }
}
