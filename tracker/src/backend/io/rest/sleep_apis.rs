//! # REST API for Sleep Sessions
//!
//! Typed calls over `/api/v1/sleep/`. Lists come back newest first.

use log::info;
use shared::{ActivityListQuery, SleepSession, SleepSessionCreate, SleepSessionUpdate};

use super::{ApiError, RestClient};
use crate::backend::storage::CancelToken;

const RESOURCE: &str = "sleep";

impl RestClient {
    /// Sessions still in progress come back with no `sleep_end`
    pub async fn list_sleeps(
        &self,
        query: &ActivityListQuery,
        cancel: &CancelToken,
    ) -> Result<Vec<SleepSession>, ApiError> {
        info!("GET /api/v1/sleep/ - {:?}", query);
        self.list(RESOURCE, query, cancel).await
    }

    pub async fn get_sleep(&self, id: &str, cancel: &CancelToken) -> Result<SleepSession, ApiError> {
        info!("GET /api/v1/sleep/{}", id);
        self.fetch(RESOURCE, id, cancel).await
    }

    pub async fn create_sleep(&self, create: &SleepSessionCreate) -> Result<SleepSession, ApiError> {
        self.create(RESOURCE, create).await
    }

    pub async fn update_sleep(&self, id: &str, update: &SleepSessionUpdate) -> Result<SleepSession, ApiError> {
        self.update(RESOURCE, id, update).await
    }

    pub async fn delete_sleep(&self, id: &str) -> Result<(), ApiError> {
        self.remove(RESOURCE, id).await
    }
}
