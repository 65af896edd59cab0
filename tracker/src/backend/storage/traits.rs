//! # Storage Traits
//!
//! The seam between the domain services and wherever records actually live.
//! The production implementation is the REST client; tests use the
//! in-memory fake from `test_utils`.

use async_trait::async_trait;
use shared::{BabyProfileCreate, BabyProfileUpdate, RecordKind};

use super::CancelToken;
use crate::backend::domain::models::{ActivityChanges, ActivityRecord, Baby, NewActivity};
use crate::backend::io::rest::ApiError;

/// Access to the four activity record kinds
#[async_trait]
pub trait ActivityStorage: Send + Sync {
    /// Records of one kind for a baby, newest first, capped at `limit`
    async fn list_records(
        &self,
        kind: RecordKind,
        baby_id: &str,
        limit: Option<u32>,
        cancel: &CancelToken,
    ) -> Result<Vec<ActivityRecord>, ApiError>;

    /// Store a new record and return it with its server-assigned id
    async fn create_record(&self, record: &NewActivity) -> Result<ActivityRecord, ApiError>;

    /// Apply a partial update; the kind is taken from `changes`
    async fn update_record(&self, id: &str, changes: &ActivityChanges) -> Result<ActivityRecord, ApiError>;

    async fn delete_record(&self, kind: RecordKind, id: &str) -> Result<(), ApiError>;

    /// Drop any locally held copies of a baby's records so the next read
    /// goes back to the source. Storage that holds nothing locally ignores it.
    async fn invalidate_baby(&self, _baby_id: &str) {}
}

/// Access to baby profiles
#[async_trait]
pub trait BabyStorage: Send + Sync {
    /// Active profiles only
    async fn list_babies(&self, cancel: &CancelToken) -> Result<Vec<Baby>, ApiError>;

    async fn get_baby(&self, id: &str, cancel: &CancelToken) -> Result<Baby, ApiError>;

    async fn create_baby(&self, create: &BabyProfileCreate) -> Result<Baby, ApiError>;

    async fn update_baby(&self, id: &str, update: &BabyProfileUpdate) -> Result<Baby, ApiError>;

    async fn delete_baby(&self, id: &str) -> Result<(), ApiError>;
}
