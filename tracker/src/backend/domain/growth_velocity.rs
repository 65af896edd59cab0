//! Growth velocity between measurements and short-horizon linear projection.

use chrono::{Duration, NaiveDate};
use log::debug;
use shared::{GrowthProjection, VelocityFlag, VelocityInterval};

use super::models::Growth;
use super::timestamps::minutes_between;

/// Elapsed time assumed when two measurements share a timestamp
const FALLBACK_ELAPSED_DAYS: f64 = 7.0;

/// Weekly weight-gain cut-offs in grams
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityThresholds {
    pub accelerated_g_per_week: f64,
    pub slow_g_per_week: f64,
}

impl Default for VelocityThresholds {
    fn default() -> Self {
        Self {
            accelerated_g_per_week: 300.0,
            slow_g_per_week: 100.0,
        }
    }
}

impl VelocityThresholds {
    pub fn classify(&self, grams_per_week: f64) -> VelocityFlag {
        if grams_per_week > self.accelerated_g_per_week {
            VelocityFlag::Accelerated
        } else if grams_per_week < self.slow_g_per_week {
            VelocityFlag::Slow
        } else {
            VelocityFlag::Normal
        }
    }
}

fn sorted(growth: &[Growth]) -> Vec<&Growth> {
    let mut ordered: Vec<&Growth> = growth.iter().collect();
    ordered.sort_by_key(|g| g.measured_at);
    ordered
}

fn elapsed_days(from: &Growth, to: &Growth) -> f64 {
    minutes_between(from.measured_at, to.measured_at) / (60.0 * 24.0)
}

fn weekly_rate(delta: f64, elapsed_days: f64) -> f64 {
    delta / elapsed_days * 7.0
}

/// Rate of change for each consecutive pair of measurements.
///
/// Pairs that share no metric are skipped.
pub fn velocity_intervals(growth: &[Growth], thresholds: &VelocityThresholds) -> Vec<VelocityInterval> {
    let ordered = sorted(growth);
    ordered
        .windows(2)
        .filter_map(|pair| {
            let (from, to) = (pair[0], pair[1]);
            let mut elapsed = elapsed_days(from, to);
            if elapsed <= 0.0 {
                elapsed = FALLBACK_ELAPSED_DAYS;
            }

            let weight_gain = match (from.weight_kg, to.weight_kg) {
                (Some(a), Some(b)) => Some(weekly_rate((b - a) * 1000.0, elapsed)),
                _ => None,
            };
            let length_gain = match (from.length_cm, to.length_cm) {
                (Some(a), Some(b)) => Some(weekly_rate(b - a, elapsed)),
                _ => None,
            };
            if weight_gain.is_none() && length_gain.is_none() {
                return None;
            }

            let (from_date, to_date) = (from.measured_at.date(), to.measured_at.date());
            Some(VelocityInterval {
                label: format!("{} to {}", from_date.format("%b %-d"), to_date.format("%b %-d")),
                from: from_date,
                to: to_date,
                elapsed_days: elapsed,
                weight_gain_g_per_week: weight_gain,
                length_gain_cm_per_week: length_gain,
                flag: weight_gain.map(|g| thresholds.classify(g)),
            })
        })
        .collect()
}

/// Flag of the most recent interval that carries a weight change
pub fn current_velocity(intervals: &[VelocityInterval]) -> Option<VelocityFlag> {
    intervals.iter().rev().find_map(|interval| interval.flag)
}

/// Linear fit of one metric across the projection window: `(anchor value,
/// anchor date, value change per day)`
fn daily_trend<F>(window: &[&Growth], metric: F) -> Option<(f64, NaiveDate, f64)>
where
    F: Fn(&Growth) -> Option<f64>,
{
    let points: Vec<(&Growth, f64)> = window
        .iter()
        .filter_map(|&g| metric(g).map(|value| (g, value)))
        .collect();
    let (first, first_value) = points.first()?;
    let (last, last_value) = points.last()?;
    let span = elapsed_days(first, last);
    if points.len() < 2 || span <= 0.0 {
        return None;
    }
    Some((*first_value, first.measured_at.date(), (last_value - first_value) / span))
}

/// Project weight and length forward from the last `window` measurements.
///
/// Each horizon is counted from the first measurement of the window, so two
/// points at day 0 and day 10 project `+30 days` to day 30. Fewer than two
/// measurements, or no metric with a non-zero span, yields nothing.
pub fn project_growth(growth: &[Growth], window: usize, horizons_days: &[i64]) -> Vec<GrowthProjection> {
    let ordered = sorted(growth);
    if ordered.len() < 2 || window < 2 {
        return Vec::new();
    }
    let recent = &ordered[ordered.len().saturating_sub(window)..];
    let anchor_date = recent[0].measured_at.date();

    let weight = daily_trend(recent, |g| g.weight_kg);
    let length = daily_trend(recent, |g| g.length_cm);
    if weight.is_none() && length.is_none() {
        debug!("No metric with a usable span among {} measurements", recent.len());
        return Vec::new();
    }

    let extrapolate = |trend: Option<(f64, NaiveDate, f64)>, target: NaiveDate| {
        trend.map(|(value, since, per_day)| value + per_day * (target - since).num_days() as f64)
    };

    horizons_days
        .iter()
        .map(|&horizon| {
            let date = anchor_date + Duration::days(horizon);
            GrowthProjection {
                horizon_days: horizon,
                label: format!("+{} days", horizon),
                date,
                weight_kg: extrapolate(weight, date),
                length_cm: extrapolate(length, date),
            }
        })
        .collect()
}
