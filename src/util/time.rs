//! Duration and rate formatting for reports

use std::time::Duration;

const DURATION_UNITS: &[(f64, &str)] = &[(1e9, "s"), (1e6, "ms"), (1e3, "us")];
const RATE_UNITS: &[(f64, &str)] = &[(1e9, "G"), (1e6, "M"), (1e3, "K")];

/// Scale `value` by the largest unit it reaches, with two decimals
fn scaled(value: f64, units: &[(f64, &str)]) -> Option<String> {
    units
        .iter()
        .find(|(scale, _)| value >= *scale)
        .map(|(scale, suffix)| format!("{:.2}{}", value / scale, suffix))
}

/// Human-readable duration: whole nanoseconds below 1us, else two decimals
///
/// ```
/// use std::time::Duration;
/// use pipulse::util::time::format_duration;
///
/// assert_eq!(format_duration(Duration::from_nanos(42)), "42ns");
/// assert_eq!(format_duration(Duration::from_millis(1250)), "1.25s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    scaled(nanos as f64, DURATION_UNITS).unwrap_or_else(|| format!("{}ns", nanos))
}

/// Intervals-per-second figure with a K/M/G suffix
pub fn format_rate(rate: f64) -> String {
    scaled(rate, RATE_UNITS).unwrap_or_else(|| format!("{:.0}", rate))
}

/// Intervals evaluated per second, or zero for an instantaneous run
pub fn calculate_rate(intervals: u64, duration: Duration) -> f64 {
    let seconds = duration.as_secs_f64();
    if seconds > 0.0 {
        intervals as f64 / seconds
    } else {
        0.0
    }
}

/// Format an integer with thousands separators
///
/// ```
/// use pipulse::util::time::format_count;
///
/// assert_eq!(format_count(2_000_000_000), "2,000,000,000");
/// ```
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
