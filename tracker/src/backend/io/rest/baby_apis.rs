//! # REST API for Baby Profiles

use log::info;
use serde::Serialize;
use shared::{BabyProfile, BabyProfileCreate, BabyProfileUpdate};

use super::{decode_items, ApiError, RestClient};
use crate::backend::storage::CancelToken;

const RESOURCE: &str = "babies";

#[derive(Debug, Serialize)]
struct ProfileQuery {
    skip: u32,
    limit: u32,
    is_active: bool,
}

impl RestClient {
    /// Active profiles, or the soft-deleted ones when `active` is false
    pub async fn list_babies(
        &self,
        skip: u32,
        limit: u32,
        active: bool,
        cancel: &CancelToken,
    ) -> Result<Vec<BabyProfile>, ApiError> {
        info!("GET /api/v1/babies/ - skip {} limit {} active {}", skip, limit, active);
        let request = self.http.get(self.collection_url(RESOURCE)).query(&ProfileQuery {
            skip,
            limit,
            is_active: active,
        });
        let items = self.cancellable(cancel, self.send_json(request)).await?;
        Ok(decode_items(RESOURCE, items))
    }

    pub async fn get_baby(&self, id: &str, cancel: &CancelToken) -> Result<BabyProfile, ApiError> {
        info!("GET /api/v1/babies/{}", id);
        self.fetch(RESOURCE, id, cancel).await
    }

    pub async fn create_baby(&self, create: &BabyProfileCreate) -> Result<BabyProfile, ApiError> {
        self.create(RESOURCE, create).await
    }

    pub async fn update_baby(&self, id: &str, update: &BabyProfileUpdate) -> Result<BabyProfile, ApiError> {
        self.update(RESOURCE, id, update).await
    }

    /// Soft delete: the backend marks the profile inactive
    pub async fn delete_baby(&self, id: &str) -> Result<(), ApiError> {
        self.remove(RESOURCE, id).await
    }
}
