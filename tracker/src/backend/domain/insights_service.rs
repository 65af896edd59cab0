use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use log::{debug, info};
use shared::{ActivityFeedDay, Dashboard, RecordKind, TodaySummary};
use std::sync::Arc;

use super::activity_feed::{activity_feed, today_summary};
use super::insights::build_dashboard;
use super::models::ActivitySnapshot;
use crate::backend::config::AnalyticsConfig;
use crate::backend::storage::{ActivityStorage, CancelToken};

/// Fetches a baby's records and runs the analytics over them
#[derive(Clone)]
pub struct InsightsService {
    storage: Arc<dyn ActivityStorage>,
    config: AnalyticsConfig,
    list_limit: Option<u32>,
}

impl InsightsService {
    pub fn new(storage: Arc<dyn ActivityStorage>, config: AnalyticsConfig, list_limit: Option<u32>) -> Self {
        Self {
            storage,
            config,
            list_limit,
        }
    }

    /// All four record kinds, read in parallel.
    ///
    /// Either every read succeeds or the whole snapshot fails; a partial
    /// snapshot is never returned.
    pub async fn load_snapshot(&self, baby_id: &str, cancel: &CancelToken) -> Result<ActivitySnapshot> {
        let limit = self.list_limit;
        let (feedings, sleeps, diapers, growth) = tokio::try_join!(
            self.storage.list_records(RecordKind::Feeding, baby_id, limit, cancel),
            self.storage.list_records(RecordKind::Sleep, baby_id, limit, cancel),
            self.storage.list_records(RecordKind::Diaper, baby_id, limit, cancel),
            self.storage.list_records(RecordKind::Growth, baby_id, limit, cancel),
        )
        .with_context(|| format!("Failed to load records for baby {}", baby_id))?;

        let snapshot = ActivitySnapshot::from_records(
            feedings
                .into_iter()
                .chain(sleeps)
                .chain(diapers)
                .chain(growth),
        );
        debug!("Loaded {} records for baby {}", snapshot.len(), baby_id);
        Ok(snapshot)
    }

    /// Drop any cached records for the baby so the next load reads the
    /// backend again, picking up writes made by other clients
    pub async fn invalidate(&self, baby_id: &str) {
        debug!("Invalidating cached records for baby {}", baby_id);
        self.storage.invalidate_baby(baby_id).await;
    }

    pub async fn dashboard(&self, baby_id: &str, now: NaiveDateTime, cancel: &CancelToken) -> Result<Dashboard> {
        info!("Building dashboard for baby {}", baby_id);
        let snapshot = self.load_snapshot(baby_id, cancel).await?;
        Ok(build_dashboard(baby_id, &snapshot, now, &self.config))
    }

    pub async fn activity_feed(
        &self,
        baby_id: &str,
        now: NaiveDateTime,
        cancel: &CancelToken,
    ) -> Result<Vec<ActivityFeedDay>> {
        info!("Building activity feed for baby {}", baby_id);
        let snapshot = self.load_snapshot(baby_id, cancel).await?;
        Ok(activity_feed(&snapshot, now))
    }

    pub async fn today_summary(
        &self,
        baby_id: &str,
        now: NaiveDateTime,
        cancel: &CancelToken,
    ) -> Result<TodaySummary> {
        let snapshot = self.load_snapshot(baby_id, cancel).await?;
        Ok(today_summary(&snapshot, now))
    }
}
