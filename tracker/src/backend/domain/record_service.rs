use anyhow::{Context, Result};
use log::{info, warn};
use shared::RecordKind;
use std::sync::Arc;

use super::models::{ActivityChanges, ActivityRecord, NewActivity, RecordValidationError};
use crate::backend::io::rest::ApiError;
use crate::backend::storage::{ActivityStorage, CancelToken};

/// Service for logging, editing and removing activity records
#[derive(Clone)]
pub struct RecordService {
    storage: Arc<dyn ActivityStorage>,
    list_limit: Option<u32>,
}

impl RecordService {
    pub fn new(storage: Arc<dyn ActivityStorage>, list_limit: Option<u32>) -> Self {
        Self { storage, list_limit }
    }

    /// Records of one kind, newest first, capped at the configured limit
    pub async fn list_records(
        &self,
        kind: RecordKind,
        baby_id: &str,
        cancel: &CancelToken,
    ) -> Result<Vec<ActivityRecord>> {
        info!("Listing {} records for baby {}", kind, baby_id);
        let records = self
            .storage
            .list_records(kind, baby_id, self.list_limit, cancel)
            .await
            .with_context(|| format!("Failed to list {} records for baby {}", kind, baby_id))?;
        info!("Found {} {} records", records.len(), kind);
        Ok(records)
    }

    /// Validate and store a new record.
    ///
    /// An invalid payload never reaches the backend.
    pub async fn create_record(&self, record: &NewActivity) -> Result<ActivityRecord> {
        info!("Creating {} record for baby {}", record.kind(), record.baby_id());
        record.validate()?;

        let created = self
            .storage
            .create_record(record)
            .await
            .with_context(|| format!("Failed to create {} record", record.kind()))?;

        info!("Created {} record with ID: {}", created.kind(), created.id());
        Ok(created)
    }

    pub async fn update_record(&self, id: &str, changes: &ActivityChanges) -> Result<ActivityRecord> {
        info!("Updating {} record: {}", changes.kind(), id);
        changes.validate()?;

        let updated = self
            .storage
            .update_record(id, changes)
            .await
            .with_context(|| format!("Failed to update {} record {}", changes.kind(), id))?;
        Ok(updated)
    }

    pub async fn delete_record(&self, kind: RecordKind, id: &str) -> Result<()> {
        info!("Deleting {} record: {}", kind, id);
        match self.storage.delete_record(kind, id).await {
            Err(e) if e.is_not_found() => {
                warn!("{} record {} was already gone", kind, id);
                Err(e).with_context(|| format!("{} record {} not found", kind, id))
            }
            result => result.with_context(|| format!("Failed to delete {} record {}", kind, id)),
        }
    }
}

/// Message for a transient notification.
///
/// Backend rejections show the server's detail, local validation failures
/// their own text; anything else gets the full context chain.
pub fn describe_error(err: &anyhow::Error) -> String {
    if let Some(api) = err.downcast_ref::<ApiError>() {
        return api.user_message();
    }
    if let Some(invalid) = err.downcast_ref::<RecordValidationError>() {
        return invalid.to_string();
    }
    format!("{:#}", err)
}

/// Whether the failure is only a cancelled read
pub fn is_cancelled(err: &anyhow::Error) -> bool {
    err.downcast_ref::<ApiError>().is_some_and(ApiError::is_cancelled)
}
