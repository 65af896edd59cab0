//! Fixed-length daily and weekly series for chart axes.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use shared::{Bucket, BucketPeriod};

use super::timestamps::start_of_week;

/// The last `N` days or weeks ending at a reference instant.
///
/// Slot 0 is the oldest period and slot `N - 1` the one containing "now".
/// Weeks start on Monday.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketWindow {
    period: BucketPeriod,
    starts: Vec<NaiveDate>,
}

impl BucketWindow {
    pub fn ending_at(now: NaiveDateTime, period: BucketPeriod, count: usize) -> Self {
        let current = truncate(now.date(), period);
        let step = step_days(period);
        let starts = (0..count)
            .rev()
            .map(|back| current - Duration::days(step * back as i64))
            .collect();
        Self { period, starts }
    }

    pub fn days(now: NaiveDateTime, count: usize) -> Self {
        Self::ending_at(now, BucketPeriod::Day, count)
    }

    pub fn weeks(now: NaiveDateTime, count: usize) -> Self {
        Self::ending_at(now, BucketPeriod::Week, count)
    }

    pub fn period(&self) -> BucketPeriod {
        self.period
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    pub fn start(&self, index: usize) -> Option<NaiveDate> {
        self.starts.get(index).copied()
    }

    /// Slot whose period contains `at`, if any
    pub fn index_of(&self, at: NaiveDateTime) -> Option<usize> {
        self.starts.binary_search(&truncate(at.date(), self.period)).ok()
    }

    /// Weekday abbreviation for days, "Week k" (oldest first) for weeks
    pub fn label(&self, index: usize) -> String {
        match self.period {
            BucketPeriod::Day => self
                .starts
                .get(index)
                .map(|d| d.format("%a").to_string())
                .unwrap_or_default(),
            BucketPeriod::Week => format!("Week {}", index + 1),
        }
    }

    pub fn empty_buckets(&self) -> Vec<Bucket> {
        self.starts
            .iter()
            .enumerate()
            .map(|(index, start)| Bucket {
                label: self.label(index),
                start: *start,
                count: 0,
                sum: 0.0,
            })
            .collect()
    }
}

fn truncate(date: NaiveDate, period: BucketPeriod) -> NaiveDate {
    match period {
        BucketPeriod::Day => date,
        BucketPeriod::Week => start_of_week(date),
    }
}

fn step_days(period: BucketPeriod) -> i64 {
    match period {
        BucketPeriod::Day => 1,
        BucketPeriod::Week => 7,
    }
}

/// Accumulate records into the window.
///
/// `accessor` returns the record's timestamp and numeric payload, or `None`
/// to leave the record out. Every slot is present in the output, empty ones
/// with zero count and sum.
pub fn bucketize<T, F>(records: &[T], window: &BucketWindow, accessor: F) -> Vec<Bucket>
where
    F: Fn(&T) -> Option<(NaiveDateTime, f64)>,
{
    let mut buckets = window.empty_buckets();
    for record in records {
        let Some((at, value)) = accessor(record) else {
            continue;
        };
        if let Some(index) = window.index_of(at) {
            buckets[index].count += 1;
            buckets[index].sum += value;
        }
    }
    buckets
}

/// Record counts per slot
pub fn count_per_bucket<T, F>(records: &[T], window: &BucketWindow, timestamp: F) -> Vec<usize>
where
    F: Fn(&T) -> NaiveDateTime,
{
    bucketize(records, window, |r| Some((timestamp(r), 0.0)))
        .into_iter()
        .map(|b| b.count)
        .collect()
}
