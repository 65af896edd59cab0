//! Gaps between consecutive events and their summary.
//!
//! Gaps are measured in minutes. A gap only counts when it is strictly
//! positive and, if a ceiling is given, no longer than the ceiling. Mean is
//! `None` whenever no gap survives.

use chrono::NaiveDateTime;
use log::debug;
use shared::{IntervalBand, IntervalStats};

use super::distribution::percentage;
use super::models::{Sleep, Timestamped};
use super::timestamps::minutes_between;

/// Histogram bands as `(label, exclusive lower, inclusive upper)` minutes
const BANDS: [(&str, f64, Option<f64>); 5] = [
    ("0-1h", 0.0, Some(60.0)),
    ("1-2h", 60.0, Some(120.0)),
    ("2-3h", 120.0, Some(180.0)),
    ("3-4h", 180.0, Some(240.0)),
    ("4h+", 240.0, None),
];

/// Arithmetic mean, `None` for an empty input
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Intervals between the reference times of same-kind records
pub fn event_intervals<T: Timestamped>(records: &[T], ceiling_minutes: Option<f64>) -> IntervalStats {
    let mut times: Vec<NaiveDateTime> = records.iter().map(Timestamped::reference_time).collect();
    times.sort();
    let gaps = times
        .windows(2)
        .map(|pair| minutes_between(pair[0], pair[1]))
        .collect();
    summarize_gaps(gaps, ceiling_minutes)
}

/// Wake windows: from the end of one sleep to the start of the next.
///
/// Sessions without an end contribute no window.
pub fn wake_windows(sleeps: &[Sleep], ceiling_minutes: Option<f64>) -> IntervalStats {
    let mut ordered: Vec<&Sleep> = sleeps.iter().collect();
    ordered.sort_by_key(|s| s.start);
    let gaps = ordered
        .windows(2)
        .filter_map(|pair| {
            let woke = pair[0].end?;
            Some(minutes_between(woke, pair[1].start))
        })
        .collect();
    summarize_gaps(gaps, ceiling_minutes)
}

/// Filter raw gaps and bucket the survivors into the fixed bands
pub fn summarize_gaps(raw_gaps: Vec<f64>, ceiling_minutes: Option<f64>) -> IntervalStats {
    let raw_count = raw_gaps.len();
    let gaps: Vec<f64> = raw_gaps
        .into_iter()
        .filter(|gap| gap.is_finite() && *gap > 0.0)
        .filter(|gap| ceiling_minutes.map_or(true, |ceiling| *gap <= ceiling))
        .collect();
    if gaps.len() < raw_count {
        debug!("Discarded {} of {} gaps as degenerate or outliers", raw_count - gaps.len(), raw_count);
    }

    let total = gaps.len() as u64;
    let bands = BANDS
        .iter()
        .map(|(label, lower, upper)| {
            let count = gaps
                .iter()
                .filter(|gap| **gap > *lower && upper.map_or(true, |u| **gap <= u))
                .count();
            IntervalBand {
                label: label.to_string(),
                lower_minutes: *lower,
                upper_minutes: *upper,
                count,
                percentage: percentage(count as u64, total),
            }
        })
        .collect();

    IntervalStats {
        mean_minutes: mean(gaps.iter().copied()),
        gaps_minutes: gaps,
        bands,
    }
}
