//! Diaper event endpoints

use log::info;
use shared::{ActivityListQuery, DiaperEvent, DiaperEventCreate, DiaperEventUpdate};

use super::{ApiError, RestClient};
use crate::backend::storage::CancelToken;

const RESOURCE: &str = "diaper";

impl RestClient {
    pub async fn list_diapers(
        &self,
        query: &ActivityListQuery,
        cancel: &CancelToken,
    ) -> Result<Vec<DiaperEvent>, ApiError> {
        info!("GET /api/v1/diaper/ - {:?}", query);
        self.list(RESOURCE, query, cancel).await
    }

    pub async fn get_diaper(&self, id: &str, cancel: &CancelToken) -> Result<DiaperEvent, ApiError> {
        info!("GET /api/v1/diaper/{}", id);
        self.fetch(RESOURCE, id, cancel).await
    }

    pub async fn create_diaper(&self, create: &DiaperEventCreate) -> Result<DiaperEvent, ApiError> {
        self.create(RESOURCE, create).await
    }

    pub async fn update_diaper(&self, id: &str, update: &DiaperEventUpdate) -> Result<DiaperEvent, ApiError> {
        self.update(RESOURCE, id, update).await
    }

    pub async fn delete_diaper(&self, id: &str) -> Result<(), ApiError> {
        self.remove(RESOURCE, id).await
    }
}
