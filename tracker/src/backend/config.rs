//! # Tracker Configuration
//!
//! Configuration is layered:
//!
//! 1. built-in defaults
//! 2. an optional YAML file named by `BABY_TRACKER_CONFIG`
//! 3. environment overrides for the backend URL and request timeout
//!
//! ## YAML Format
//!
//! ```yaml
//! api_base_url: "http://localhost:8000"
//! request_timeout_secs: 10
//! list_limit: 100
//! analytics:
//!   wake_window_ceiling_minutes: 600
//!   accelerated_gain_g_per_week: 300
//!   slow_gain_g_per_week: 100
//!   correlation_window_days: 14
//!   projection_window: 3
//!   projection_horizons_days: [30, 60, 90, 150, 330]
//! ```
//!
//! Keys missing from the file keep their default.

use anyhow::{bail, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::backend::domain::growth_velocity::VelocityThresholds;

pub const CONFIG_PATH_ENV: &str = "BABY_TRACKER_CONFIG";
pub const API_URL_ENV: &str = "BABY_TRACKER_API_URL";
pub const TIMEOUT_ENV: &str = "BABY_TRACKER_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Base URL of the tracker backend, without the `/api/v1` suffix
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    /// Result cap sent with every list read
    pub list_limit: Option<u32>,
    pub analytics: AnalyticsConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            request_timeout_secs: 10,
            list_limit: Some(100),
            analytics: AnalyticsConfig::default(),
        }
    }
}

/// Tunables of the analytics engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Wake windows longer than this are treated as outliers
    pub wake_window_ceiling_minutes: Option<f64>,
    /// Optional outlier ceiling for feed and nappy intervals
    pub interval_ceiling_minutes: Option<f64>,
    pub accelerated_gain_g_per_week: f64,
    pub slow_gain_g_per_week: f64,
    pub correlation_window_days: usize,
    /// Number of most recent measurements used for projections
    pub projection_window: usize,
    pub projection_horizons_days: Vec<i64>,
    pub trend_days: usize,
    pub trend_weeks: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            wake_window_ceiling_minutes: Some(600.0),
            interval_ceiling_minutes: None,
            accelerated_gain_g_per_week: 300.0,
            slow_gain_g_per_week: 100.0,
            correlation_window_days: 14,
            projection_window: 3,
            projection_horizons_days: vec![30, 60, 90, 150, 330],
            trend_days: 7,
            trend_weeks: 6,
        }
    }
}

impl AnalyticsConfig {
    pub fn velocity_thresholds(&self) -> VelocityThresholds {
        VelocityThresholds {
            accelerated_g_per_week: self.accelerated_gain_g_per_week,
            slow_g_per_week: self.slow_gain_g_per_week,
        }
    }
}

/// Values read from the process environment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvOverrides {
    pub config_path: Option<String>,
    pub api_base_url: Option<String>,
    pub request_timeout_secs: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            config_path: std::env::var(CONFIG_PATH_ENV).ok(),
            api_base_url: std::env::var(API_URL_ENV).ok(),
            request_timeout_secs: std::env::var(TIMEOUT_ENV).ok(),
        }
    }
}

impl TrackerConfig {
    /// Load configuration from the environment
    pub fn load() -> Result<Self> {
        Self::from_sources(&EnvOverrides::from_env())
    }

    pub fn from_sources(env: &EnvOverrides) -> Result<Self> {
        let mut config = match env.config_path.as_deref().filter(|p| !p.trim().is_empty()) {
            Some(path) => Self::from_file(Path::new(path))?,
            None => Self::default(),
        };

        if let Some(url) = env.api_base_url.as_deref().filter(|u| !u.trim().is_empty()) {
            debug!("Overriding api_base_url from {}", API_URL_ENV);
            config.api_base_url = url.trim().to_string();
        }
        if let Some(timeout) = env.request_timeout_secs.as_deref() {
            config.request_timeout_secs = timeout
                .trim()
                .parse()
                .with_context(|| format!("{} must be a whole number of seconds, got '{}'", TIMEOUT_ENV, timeout))?;
        }

        config.validate()?;
        info!(
            "Tracker configured for {} (timeout {}s, list limit {:?})",
            config.api_base_url, config.request_timeout_secs, config.list_limit
        );
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let yaml_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: TrackerConfig = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        debug!("Loaded tracker config from {:?}", path);
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            bail!("api_base_url must start with http:// or https://, got '{}'", url);
        }
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be greater than zero");
        }
        if self.list_limit == Some(0) {
            bail!("list_limit must be at least 1 when set");
        }

        let analytics = &self.analytics;
        if analytics.slow_gain_g_per_week >= analytics.accelerated_gain_g_per_week {
            bail!(
                "slow_gain_g_per_week ({}) must be below accelerated_gain_g_per_week ({})",
                analytics.slow_gain_g_per_week,
                analytics.accelerated_gain_g_per_week
            );
        }
        for (name, ceiling) in [
            ("wake_window_ceiling_minutes", analytics.wake_window_ceiling_minutes),
            ("interval_ceiling_minutes", analytics.interval_ceiling_minutes),
        ] {
            if ceiling.is_some_and(|c| c <= 0.0) {
                bail!("{} must be positive when set", name);
            }
        }
        for (name, window) in [
            ("correlation_window_days", analytics.correlation_window_days),
            ("trend_days", analytics.trend_days),
            ("trend_weeks", analytics.trend_weeks),
        ] {
            if window < 1 {
                bail!("{} must be at least 1", name);
            }
        }
        if analytics.projection_window < 2 {
            bail!("projection_window must be at least 2");
        }
        Ok(())
    }
}
