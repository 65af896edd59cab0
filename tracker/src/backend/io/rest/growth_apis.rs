//! # REST API for Growth Measurements
//!
//! Lists are ordered by `measurement_date`, newest first. Percentiles are
//! computed by the backend and passed through untouched.

use log::info;
use shared::{ActivityListQuery, GrowthMeasurement, GrowthMeasurementCreate, GrowthMeasurementUpdate};

use super::{ApiError, RestClient};
use crate::backend::storage::CancelToken;

const RESOURCE: &str = "growth";

impl RestClient {
    pub async fn list_growth_measurements(
        &self,
        query: &ActivityListQuery,
        cancel: &CancelToken,
    ) -> Result<Vec<GrowthMeasurement>, ApiError> {
        info!("GET /api/v1/growth/ - {:?}", query);
        self.list(RESOURCE, query, cancel).await
    }

    pub async fn get_growth(&self, id: &str, cancel: &CancelToken) -> Result<GrowthMeasurement, ApiError> {
        info!("GET /api/v1/growth/{}", id);
        self.fetch(RESOURCE, id, cancel).await
    }

    pub async fn create_growth(&self, create: &GrowthMeasurementCreate) -> Result<GrowthMeasurement, ApiError> {
        self.create(RESOURCE, create).await
    }

    pub async fn update_growth(&self, id: &str, update: &GrowthMeasurementUpdate) -> Result<GrowthMeasurement, ApiError> {
        self.update(RESOURCE, id, update).await
    }

    pub async fn delete_growth(&self, id: &str) -> Result<(), ApiError> {
        self.remove(RESOURCE, id).await
    }
}
