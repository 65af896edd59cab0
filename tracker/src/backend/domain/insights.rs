//! Per-tab dashboard composition.
//!
//! Each function here is a pure transform from one fetched snapshot to the
//! derived view a dashboard tab renders. Nothing is cached between calls;
//! re-running with the same snapshot and `now` gives the same result.

use chrono::{Datelike, NaiveDateTime};
use shared::{
    BreastSide, Dashboard, DailyFeedingPoint, DailyNappyPoint, DailySleepPoint, FeedingInsights,
    FeedingType, GrowthInsights, GrowthPoint, NappyInsights, OverviewInsights, SleepInsights,
    SleepLocation, SleepQuality, SleepType, WeeklySleepPoint, WeeklyVolumePoint,
};

use super::correlation::feed_diaper_correlation;
use super::distribution::{summarize, summarize_weighted};
use super::growth_velocity::{current_velocity, project_growth, velocity_intervals};
use super::interval_stats::{event_intervals, mean, wake_windows};
use super::models::{ActivitySnapshot, Diaper, DiaperContents, Feeding, Growth, Sleep};
use super::windowed_buckets::{bucketize, BucketWindow};
use crate::backend::config::AnalyticsConfig;

fn ascending(growth: &[Growth]) -> Vec<&Growth> {
    let mut ordered: Vec<&Growth> = growth.iter().collect();
    ordered.sort_by_key(|g| g.measured_at);
    ordered
}

fn growth_series(growth: &[Growth]) -> Vec<GrowthPoint> {
    ascending(growth)
        .into_iter()
        .map(|g| GrowthPoint {
            date: g.measured_at.date(),
            weight_kg: g.weight_kg,
            length_cm: g.length_cm,
            head_circumference_cm: g.head_circumference_cm,
            percentiles: g.percentiles.clone(),
        })
        .collect()
}

fn latest<F>(growth: &[Growth], metric: F) -> Option<f64>
where
    F: Fn(&Growth) -> Option<f64>,
{
    ascending(growth).into_iter().rev().find_map(metric)
}

fn per_day(total: usize, days: usize) -> f64 {
    total as f64 / days.max(1) as f64
}

/// Feeds per day over the window with duration, type split and bottle volume
pub fn daily_feeding_trend(feedings: &[Feeding], window: &BucketWindow) -> Vec<DailyFeedingPoint> {
    let mut points: Vec<DailyFeedingPoint> = (0..window.len())
        .filter_map(|i| {
            window.start(i).map(|date| DailyFeedingPoint {
                label: window.label(i),
                date,
                feeds: 0,
                total_minutes: 0.0,
                breast: 0,
                bottle: 0,
                solid: 0,
                bottle_volume_ml: 0.0,
            })
        })
        .collect();

    for feeding in feedings {
        let Some(point) = window.index_of(feeding.start_time).and_then(|i| points.get_mut(i)) else {
            continue;
        };
        point.feeds += 1;
        point.total_minutes += feeding.duration_minutes().unwrap_or(0.0);
        match feeding.feeding_type {
            FeedingType::Breast => point.breast += 1,
            FeedingType::Bottle => point.bottle += 1,
            FeedingType::Solid => point.solid += 1,
        }
        point.bottle_volume_ml += feeding.bottle_volume_ml().unwrap_or(0.0);
    }
    points
}

/// Bottle count, average bottle and average daily volume per week.
///
/// The current week is averaged over the days elapsed so far.
pub fn weekly_volume_progress(
    feedings: &[Feeding],
    window: &BucketWindow,
    now: NaiveDateTime,
) -> Vec<WeeklyVolumePoint> {
    let buckets = bucketize(feedings, window, |f| {
        f.bottle_volume_ml().map(|ml| (f.start_time, ml))
    });
    let last = buckets.len().saturating_sub(1);
    buckets
        .into_iter()
        .enumerate()
        .map(|(index, bucket)| {
            let days = if index == last {
                now.weekday().num_days_from_monday() as f64 + 1.0
            } else {
                7.0
            };
            WeeklyVolumePoint {
                average_bottle_ml: bucket.mean(),
                daily_total_ml: bucket.sum / days,
                bottles: bucket.count,
                label: bucket.label,
                start: bucket.start,
            }
        })
        .collect()
}

/// Sleep minutes per day split into night and nap, plus wake-ups
pub fn daily_sleep_trend(sleeps: &[Sleep], window: &BucketWindow) -> Vec<DailySleepPoint> {
    let mut points: Vec<DailySleepPoint> = (0..window.len())
        .filter_map(|i| {
            window.start(i).map(|date| DailySleepPoint {
                label: window.label(i),
                date,
                total_minutes: 0.0,
                night_minutes: 0.0,
                nap_minutes: 0.0,
                wake_ups: 0,
            })
        })
        .collect();

    for sleep in sleeps {
        let Some(point) = window.index_of(sleep.start).and_then(|i| points.get_mut(i)) else {
            continue;
        };
        let minutes = sleep.duration_minutes().unwrap_or(0.0);
        point.total_minutes += minutes;
        match sleep.sleep_type {
            SleepType::Nighttime => point.night_minutes += minutes,
            SleepType::Nap => point.nap_minutes += minutes,
        }
        if sleep.is_wake_up() {
            point.wake_ups += 1;
        }
    }
    points
}

pub fn weekly_sleep_sessions(sleeps: &[Sleep], window: &BucketWindow) -> Vec<WeeklySleepPoint> {
    bucketize(sleeps, window, |s| s.duration_minutes().map(|minutes| (s.start, minutes)))
        .into_iter()
        .map(|bucket| WeeklySleepPoint {
            average_duration_minutes: bucket.mean(),
            sessions: bucket.count,
            label: bucket.label,
            start: bucket.start,
        })
        .collect()
}

pub fn daily_nappy_trend(diapers: &[Diaper], window: &BucketWindow) -> Vec<DailyNappyPoint> {
    let mut points: Vec<DailyNappyPoint> = (0..window.len())
        .filter_map(|i| {
            window.start(i).map(|date| DailyNappyPoint {
                label: window.label(i),
                date,
                wet: 0,
                dirty: 0,
                total: 0,
            })
        })
        .collect();

    for diaper in diapers {
        if let Some(point) = window.index_of(diaper.timestamp).and_then(|i| points.get_mut(i)) {
            point.total += 1;
            point.wet += diaper.has_urine as usize;
            point.dirty += diaper.has_stool as usize;
        }
    }
    points
}

pub fn overview_insights(
    snapshot: &ActivitySnapshot,
    now: NaiveDateTime,
    config: &AnalyticsConfig,
) -> OverviewInsights {
    let today = now.date();
    let week = BucketWindow::days(now, config.trend_days);

    let today_sleep_minutes = snapshot
        .sleeps
        .iter()
        .filter(|s| s.start.date() == today)
        .filter_map(Sleep::duration_minutes)
        .sum();
    let longest_sleep_minutes = snapshot
        .sleeps
        .iter()
        .filter(|s| week.index_of(s.start).is_some())
        .filter_map(Sleep::duration_minutes)
        .fold(None, |longest: Option<f64>, minutes| {
            Some(longest.map_or(minutes, |l| l.max(minutes)))
        });

    OverviewInsights {
        today_feeds: snapshot.feedings.iter().filter(|f| f.start_time.date() == today).count(),
        today_diapers: snapshot.diapers.iter().filter(|d| d.timestamp.date() == today).count(),
        today_sleep_minutes,
        average_wake_window_minutes: wake_windows(&snapshot.sleeps, config.wake_window_ceiling_minutes)
            .mean_minutes,
        last_weight_kg: latest(&snapshot.growth, |g| g.weight_kg),
        longest_sleep_minutes,
        weekly_feeding: daily_feeding_trend(&snapshot.feedings, &week),
        feeding_types: summarize(
            &FeedingType::ALL,
            FeedingType::label,
            snapshot.feedings.iter().map(|f| f.feeding_type),
        ),
        feed_diaper_correlation: feed_diaper_correlation(
            &snapshot.feedings,
            &snapshot.diapers,
            now,
            config.correlation_window_days,
        ),
        growth: growth_series(&snapshot.growth),
    }
}

pub fn feeding_insights(
    feedings: &[Feeding],
    now: NaiveDateTime,
    config: &AnalyticsConfig,
) -> FeedingInsights {
    let days = BucketWindow::days(now, config.trend_days);
    let daily_trend = daily_feeding_trend(feedings, &days);
    let feeds_in_window: usize = daily_trend.iter().map(|p| p.feeds).sum();

    FeedingInsights {
        daily_average_feeds: per_day(feeds_in_window, config.trend_days),
        average_duration_minutes: mean(feedings.iter().filter_map(Feeding::duration_minutes)),
        intervals: event_intervals(feedings, config.interval_ceiling_minutes),
        feeding_types: summarize(
            &FeedingType::ALL,
            FeedingType::label,
            feedings.iter().map(|f| f.feeding_type),
        ),
        side_preference: summarize_weighted(
            &BreastSide::ALL,
            BreastSide::label,
            feedings.iter().flat_map(|f| {
                BreastSide::ALL
                    .into_iter()
                    .map(move |side| (side, f.side_minutes(side) as u64))
            }),
        ),
        daily_trend,
        volume_progress: weekly_volume_progress(
            feedings,
            &BucketWindow::weeks(now, config.trend_weeks),
            now,
        ),
    }
}

pub fn sleep_insights(sleeps: &[Sleep], now: NaiveDateTime, config: &AnalyticsConfig) -> SleepInsights {
    let daily_trend = daily_sleep_trend(sleeps, &BucketWindow::days(now, config.trend_days));
    let wake_ups: usize = daily_trend.iter().map(|p| p.wake_ups).sum();
    // Only nights that were actually logged count towards the average.
    let average_night_minutes = mean(
        daily_trend
            .iter()
            .map(|p| p.night_minutes)
            .filter(|minutes| *minutes > 0.0),
    );

    SleepInsights {
        average_night_minutes,
        average_wake_ups: per_day(wake_ups, config.trend_days),
        wake_windows: wake_windows(sleeps, config.wake_window_ceiling_minutes),
        locations: summarize(&SleepLocation::ALL, SleepLocation::label, sleeps.iter().map(|s| s.location)),
        qualities: summarize(&SleepQuality::ALL, SleepQuality::label, sleeps.iter().map(|s| s.quality)),
        weekly_sessions: weekly_sleep_sessions(sleeps, &BucketWindow::weeks(now, config.trend_weeks)),
        daily_trend,
    }
}

pub fn nappy_insights(
    diapers: &[Diaper],
    feedings: &[Feeding],
    now: NaiveDateTime,
    config: &AnalyticsConfig,
) -> NappyInsights {
    let daily_trend = daily_nappy_trend(diapers, &BucketWindow::days(now, config.trend_days));
    let changes: usize = daily_trend.iter().map(|p| p.total).sum();

    NappyInsights {
        daily_average: per_day(changes, config.trend_days),
        intervals: event_intervals(diapers, config.interval_ceiling_minutes),
        contents: summarize(&DiaperContents::ALL, DiaperContents::label, diapers.iter().map(Diaper::contents)),
        daily_trend,
        feed_correlation: feed_diaper_correlation(feedings, diapers, now, config.correlation_window_days),
    }
}

pub fn growth_insights(growth: &[Growth], config: &AnalyticsConfig) -> GrowthInsights {
    let velocity = velocity_intervals(growth, &config.velocity_thresholds());
    GrowthInsights {
        series: growth_series(growth),
        latest_weight_kg: latest(growth, |g| g.weight_kg),
        latest_length_cm: latest(growth, |g| g.length_cm),
        current_velocity: current_velocity(&velocity),
        velocity,
        projections: project_growth(growth, config.projection_window, &config.projection_horizons_days),
    }
}

/// Every dashboard tab for one baby from one snapshot
pub fn build_dashboard(
    baby_id: &str,
    snapshot: &ActivitySnapshot,
    now: NaiveDateTime,
    config: &AnalyticsConfig,
) -> Dashboard {
    Dashboard {
        baby_id: baby_id.to_string(),
        generated_at: now,
        overview: overview_insights(snapshot, now, config),
        feeding: feeding_insights(&snapshot.feedings, now, config),
        sleep: sleep_insights(&snapshot.sleeps, now, config),
        nappy: nappy_insights(&snapshot.diapers, &snapshot.feedings, now, config),
        growth: growth_insights(&snapshot.growth, config),
    }
}
