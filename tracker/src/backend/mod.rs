//! # Backend Module
//!
//! Contains all non-UI logic of the tracker.
//!
//! ## Architecture
//!
//! ```text
//! Presentation (terminal dashboard, or any other view)
//!     ↓
//! Domain (services, analytics engine, dashboard view model)
//!     ↓
//! Storage (record cache, cancellation, storage traits)
//!     ↓
//! IO (REST client for the tracker backend)
//! ```
//!
//! Writes go through `RecordService` and invalidate the shared record cache,
//! so every view reading through the same [`AppState`] sees them on its next
//! refresh.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use log::info;
use std::sync::Arc;

use crate::backend::config::TrackerConfig;
use crate::backend::domain::{BabyService, DashboardView, InsightsService, RecordService};
use crate::backend::io::rest::RestClient;
use crate::backend::storage::CachedActivityStorage;

/// Everything a view needs, wired to one backend
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<RestClient>,
    pub records: Arc<CachedActivityStorage>,
    pub record_service: RecordService,
    pub baby_service: BabyService,
    pub insights_service: InsightsService,
}

impl AppState {
    /// A fresh dashboard view model for one baby
    pub fn dashboard_view(&self, baby_id: &str) -> DashboardView {
        DashboardView::new(self.insights_service.clone(), baby_id)
    }
}

/// Initialize the backend with all required services
pub fn initialize_backend(config: &TrackerConfig) -> Result<AppState> {
    info!("Setting up REST client for {}", config.api_base_url);
    let client = Arc::new(RestClient::from_config(config).context("Failed to build REST client")?);

    info!("Setting up record cache");
    let records = Arc::new(CachedActivityStorage::new(client.clone()));

    info!("Setting up domain services");
    let record_service = RecordService::new(records.clone(), config.list_limit);
    let baby_service = BabyService::new(client.clone(), records.clone());
    let insights_service = InsightsService::new(records.clone(), config.analytics.clone(), config.list_limit);

    Ok(AppState {
        client,
        records,
        record_service,
        baby_service,
        insights_service,
    })
}
