//! Pearson correlation between daily feed and nappy counts.

use chrono::NaiveDateTime;
use shared::{CorrelationStrength, CorrelationSummary};

use super::models::{Diaper, Feeding};
use super::windowed_buckets::{count_per_bucket, BucketWindow};

const STRONG: f64 = 0.7;
const MODERATE: f64 = 0.4;

/// Pearson r over paired samples, `None` when it is undefined.
///
/// Undefined means fewer than two pairs or no variance in either series.
pub fn pearson_checked(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);
    let nf = n as f64;
    let sum_x: f64 = xs.iter().sum();
    let sum_y: f64 = ys.iter().sum();
    let sum_xy: f64 = xs.iter().zip(ys).map(|(x, y)| x * y).sum();
    let sum_x2: f64 = xs.iter().map(|x| x * x).sum();
    let sum_y2: f64 = ys.iter().map(|y| y * y).sum();

    let numerator = nf * sum_xy - sum_x * sum_y;
    let denominator = ((nf * sum_x2 - sum_x * sum_x) * (nf * sum_y2 - sum_y * sum_y)).sqrt();
    if !denominator.is_finite() || denominator <= 0.0 {
        return None;
    }
    let r = numerator / denominator;
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

/// Pearson r in `[-1, 1]`; 0 whenever it is undefined
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    pearson_checked(xs, ys).unwrap_or(0.0)
}

pub fn classify(r: Option<f64>) -> CorrelationStrength {
    match r {
        None => CorrelationStrength::InsufficientData,
        Some(r) if r.abs() > STRONG => CorrelationStrength::Strong,
        Some(r) if r.abs() > MODERATE => CorrelationStrength::Moderate,
        Some(_) => CorrelationStrength::Weak,
    }
}

/// Per-day `(feeds, diapers)` over the trailing window, skipping days where
/// both counts are zero.
pub fn daily_pairs(
    feedings: &[Feeding],
    diapers: &[Diaper],
    now: NaiveDateTime,
    window_days: usize,
) -> Vec<(f64, f64)> {
    let window = BucketWindow::days(now, window_days);
    let feeds = count_per_bucket(feedings, &window, |f| f.start_time);
    let changes = count_per_bucket(diapers, &window, |d| d.timestamp);
    feeds
        .into_iter()
        .zip(changes)
        .filter(|(f, d)| *f > 0 || *d > 0)
        .map(|(f, d)| (f as f64, d as f64))
        .collect()
}

pub fn feed_diaper_correlation(
    feedings: &[Feeding],
    diapers: &[Diaper],
    now: NaiveDateTime,
    window_days: usize,
) -> CorrelationSummary {
    let pairs = daily_pairs(feedings, diapers, now, window_days);
    let (xs, ys): (Vec<f64>, Vec<f64>) = pairs.iter().copied().unzip();
    let r = pearson_checked(&xs, &ys);

    let total_feeds: f64 = xs.iter().sum();
    let total_diapers: f64 = ys.iter().sum();
    let diapers_per_feed = (total_feeds > 0.0).then(|| total_diapers / total_feeds);

    CorrelationSummary {
        coefficient: r.unwrap_or(0.0),
        strength: classify(r),
        sample_size: pairs.len(),
        diapers_per_feed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::test_utils::{at, diaper_at, feeding_at};
    use shared::FeedingType;

    #[test]
    fn test_perfect_covariance() {
        let r = pearson(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0, 8.0]);
        assert!((r - 1.0).abs() < 1e-9);
        let inverse = pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]);
        assert!((inverse + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_pair_is_zero_not_nan() {
        let r = pearson(&[3.0], &[5.0]);
        assert_eq!(r, 0.0);
        assert_eq!(classify(pearson_checked(&[3.0], &[5.0])), CorrelationStrength::InsufficientData);
    }

    #[test]
    fn test_no_variance_is_zero() {
        assert_eq!(pearson(&[2.0, 2.0, 2.0], &[1.0, 5.0, 9.0]), 0.0);
        assert_eq!(pearson(&[], &[]), 0.0);
    }

    #[test]
    fn test_classification_thresholds() {
        assert_eq!(classify(Some(0.71)), CorrelationStrength::Strong);
        assert_eq!(classify(Some(-0.8)), CorrelationStrength::Strong);
        assert_eq!(classify(Some(0.7)), CorrelationStrength::Moderate);
        assert_eq!(classify(Some(0.41)), CorrelationStrength::Moderate);
        assert_eq!(classify(Some(0.4)), CorrelationStrength::Weak);
    }

    #[test]
    fn test_daily_pairs_skip_empty_days() {
        let now = at(2025, 1, 10, 20, 0);
        let feeds = vec![
            feeding_at("f1", at(2025, 1, 10, 8, 0), FeedingType::Bottle),
            feeding_at("f2", at(2025, 1, 10, 11, 0), FeedingType::Bottle),
            feeding_at("f3", at(2025, 1, 8, 8, 0), FeedingType::Bottle),
        ];
        let diapers = vec![
            diaper_at("d1", at(2025, 1, 10, 9, 0), true, false),
            diaper_at("d2", at(2025, 1, 10, 12, 0), true, false),
            diaper_at("d3", at(2025, 1, 10, 15, 0), true, true),
            diaper_at("d4", at(2025, 1, 7, 9, 0), true, false),
        ];
        let pairs = daily_pairs(&feeds, &diapers, now, 14);
        assert_eq!(pairs, vec![(0.0, 1.0), (1.0, 0.0), (2.0, 3.0)]);

        let summary = feed_diaper_correlation(&feeds, &diapers, now, 14);
        assert_eq!(summary.sample_size, 3);
        assert_eq!(summary.diapers_per_feed, Some(4.0 / 3.0));
        // r = 6 / sqrt(84)
        assert!((summary.coefficient - 6.0 / 84f64.sqrt()).abs() < 1e-9);
        assert_eq!(summary.strength, CorrelationStrength::Moderate);
    }

    #[test]
    fn test_no_records_reports_insufficient_data() {
        let summary = feed_diaper_correlation(&[], &[], at(2025, 1, 10, 20, 0), 14);
        assert_eq!(summary.coefficient, 0.0);
        assert_eq!(summary.strength, CorrelationStrength::InsufficientData);
        assert_eq!(summary.diapers_per_feed, None);
    }
}
