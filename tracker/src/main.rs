use anyhow::{Context, Result};
use chrono::Local;
use log::{error, info, warn};
use shared::{ActivityFeedDay, Dashboard, DistributionSlice, IntervalStats};

use baby_tracker::backend::config::TrackerConfig;
use baby_tracker::backend::domain::describe_error;
use baby_tracker::backend::storage::CancelToken;
use baby_tracker::initialize_backend;

fn minutes(value: Option<f64>) -> String {
    match value {
        Some(m) => format!("{:.0} min", m),
        None => "not enough data".to_string(),
    }
}

fn slices(title: &str, slices: &[DistributionSlice]) {
    let parts: Vec<String> = slices
        .iter()
        .map(|s| format!("{} {}%", s.label, s.percentage))
        .collect();
    println!("  {:<16} {}", title, if parts.is_empty() { "-".to_string() } else { parts.join(", ") });
}

fn intervals(title: &str, stats: &IntervalStats) {
    println!("  {:<16} mean {}", title, minutes(stats.mean_minutes));
    for band in stats.bands.iter().filter(|b| b.count > 0) {
        println!("    {:<6} {:>3} ({}%)", band.label, band.count, band.percentage);
    }
}

fn print_dashboard(name: &str, dashboard: &Dashboard) {
    let overview = &dashboard.overview;
    println!("== {} ==", name);
    println!(
        "Today: {} feeds, {} nappies, {:.0} min asleep",
        overview.today_feeds, overview.today_diapers, overview.today_sleep_minutes
    );
    println!("  {:<16} {}", "Wake window", minutes(overview.average_wake_window_minutes));
    println!("  {:<16} {}", "Longest sleep", minutes(overview.longest_sleep_minutes));
    if let Some(weight) = overview.last_weight_kg {
        println!("  {:<16} {:.2} kg", "Last weight", weight);
    }

    println!("\nFeeding (last {} days)", dashboard.feeding.daily_trend.len());
    for point in &dashboard.feeding.daily_trend {
        println!(
            "  {:<4} {:>2} feeds {:>5.0} min {:>5.0} ml",
            point.label, point.feeds, point.total_minutes, point.bottle_volume_ml
        );
    }
    println!("  {:<16} {:.1}", "Feeds per day", dashboard.feeding.daily_average_feeds);
    intervals("Between feeds", &dashboard.feeding.intervals);
    slices("Types", &dashboard.feeding.feeding_types);
    slices("Sides", &dashboard.feeding.side_preference);

    println!("\nSleep");
    for point in &dashboard.sleep.daily_trend {
        println!(
            "  {:<4} night {:>4.0} min  naps {:>4.0} min  wake-ups {}",
            point.label, point.night_minutes, point.nap_minutes, point.wake_ups
        );
    }
    intervals("Wake windows", &dashboard.sleep.wake_windows);
    slices("Locations", &dashboard.sleep.locations);
    slices("Quality", &dashboard.sleep.qualities);

    println!("\nNappies");
    println!("  {:<16} {:.1}", "Per day", dashboard.nappy.daily_average);
    slices("Contents", &dashboard.nappy.contents);
    let correlation = &dashboard.nappy.feed_correlation;
    println!(
        "  {:<16} r = {:.2} ({}, {} days)",
        "Feeds vs nappies",
        correlation.coefficient,
        correlation.strength.label(),
        correlation.sample_size
    );

    println!("\nGrowth");
    for interval in &dashboard.growth.velocity {
        let gain = interval
            .weight_gain_g_per_week
            .map(|g| format!("{:.0} g/week", g))
            .unwrap_or_else(|| "-".to_string());
        println!("  {:<24} {}", interval.label, gain);
    }
    if dashboard.growth.projections.is_empty() {
        println!("  Projections: not enough measurements");
    }
    for projection in &dashboard.growth.projections {
        if let Some(weight) = projection.weight_kg {
            println!("  {:<10} {} {:.2} kg", projection.label, projection.date, weight);
        }
    }
}

fn print_feed(days: &[ActivityFeedDay]) {
    println!("\nRecent activity");
    for day in days.iter().take(3) {
        println!("  {}", day.label);
        for entry in &day.entries {
            println!("    {} {}", entry.timestamp.format("%H:%M"), entry.summary);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = TrackerConfig::load().context("Failed to load configuration")?;
    let app_state = initialize_backend(&config)?;

    match app_state.client.health_check().await {
        Ok(health) => info!("Backend {} is {}", health.version, health.status),
        Err(e) => warn!("Health check failed: {}", e),
    }

    let cancel = CancelToken::new();
    let requested = std::env::args().nth(1);
    let Some(baby) = app_state
        .baby_service
        .pick_baby(requested.as_deref(), &cancel)
        .await?
    else {
        println!("No active baby profiles. Create one first.");
        return Ok(());
    };

    let now = Local::now().naive_local();
    let mut view = app_state.dashboard_view(&baby.id);
    view.refresh(now).await;
    if let Some(notice) = view.take_notice() {
        error!("{}", notice);
        eprintln!("{}", notice);
    }
    if let Some(dashboard) = view.dashboard() {
        print_dashboard(&baby.name, dashboard);
    }

    match app_state.insights_service.activity_feed(&baby.id, now, &cancel).await {
        Ok(days) => print_feed(&days),
        Err(e) => eprintln!("{}", describe_error(&e)),
    }
    Ok(())
}
