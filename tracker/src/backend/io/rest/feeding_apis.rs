//! # REST API for Feeding Sessions
//!
//! Typed calls over `/api/v1/feeding/`. Lists come back newest first.

use log::info;
use shared::{ActivityListQuery, FeedingSession, FeedingSessionCreate, FeedingSessionUpdate};

use super::{ApiError, RestClient};
use crate::backend::storage::CancelToken;

const RESOURCE: &str = "feeding";

impl RestClient {
    pub async fn list_feedings(
        &self,
        query: &ActivityListQuery,
        cancel: &CancelToken,
    ) -> Result<Vec<FeedingSession>, ApiError> {
        info!("GET /api/v1/feeding/ - {:?}", query);
        self.list(RESOURCE, query, cancel).await
    }

    pub async fn get_feeding(&self, id: &str, cancel: &CancelToken) -> Result<FeedingSession, ApiError> {
        info!("GET /api/v1/feeding/{}", id);
        self.fetch(RESOURCE, id, cancel).await
    }

    pub async fn create_feeding(&self, create: &FeedingSessionCreate) -> Result<FeedingSession, ApiError> {
        self.create(RESOURCE, create).await
    }

    pub async fn update_feeding(&self, id: &str, update: &FeedingSessionUpdate) -> Result<FeedingSession, ApiError> {
        self.update(RESOURCE, id, update).await
    }

    pub async fn delete_feeding(&self, id: &str) -> Result<(), ApiError> {
        self.remove(RESOURCE, id).await
    }
}
