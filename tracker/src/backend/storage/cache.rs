//! Shared record cache keyed by `(record kind, baby id)`.
//!
//! Every view reads through one [`CachedActivityStorage`]. The first reader
//! of a key fetches from the wrapped storage while later readers of the same
//! key wait on that key's slot and reuse the result, so sibling views never
//! issue duplicate requests. A successful write drops the affected keys;
//! failed reads leave the slot empty so the next reader retries.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use shared::RecordKind;
use tokio::sync::Mutex;

use super::{ActivityStorage, CancelToken};
use crate::backend::domain::models::{ActivityChanges, ActivityRecord, NewActivity};
use crate::backend::io::rest::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    kind: RecordKind,
    baby_id: String,
    limit: Option<u32>,
}

type Slot = Arc<Mutex<Option<Arc<Vec<ActivityRecord>>>>>;

pub struct CachedActivityStorage {
    inner: Arc<dyn ActivityStorage>,
    slots: Mutex<HashMap<CacheKey, Slot>>,
}

impl CachedActivityStorage {
    pub fn new(inner: Arc<dyn ActivityStorage>) -> Self {
        Self {
            inner,
            slots: Mutex::new(HashMap::new()),
        }
    }

    async fn slot(&self, key: &CacheKey) -> Slot {
        let mut slots = self.slots.lock().await;
        Arc::clone(
            slots
                .entry(key.clone())
                .or_insert_with(|| Arc::new(Mutex::new(None))),
        )
    }

    /// Forget everything cached for one kind of one baby
    pub async fn invalidate(&self, kind: RecordKind, baby_id: &str) {
        debug!("Invalidating cached {} records for baby {}", kind, baby_id);
        self.slots
            .lock()
            .await
            .retain(|key, _| !(key.kind == kind && key.baby_id == baby_id));
    }

    async fn invalidate_kind(&self, kind: RecordKind) {
        self.slots.lock().await.retain(|key, _| key.kind != kind);
    }

    /// Number of keys currently holding records
    pub async fn cached_keys(&self) -> usize {
        let slots: Vec<Slot> = self.slots.lock().await.values().cloned().collect();
        let mut filled = 0;
        for slot in slots {
            if slot.lock().await.is_some() {
                filled += 1;
            }
        }
        filled
    }
}

#[async_trait]
impl ActivityStorage for CachedActivityStorage {
    async fn list_records(
        &self,
        kind: RecordKind,
        baby_id: &str,
        limit: Option<u32>,
        cancel: &CancelToken,
    ) -> Result<Vec<ActivityRecord>, ApiError> {
        if cancel.is_cancelled() {
            return Err(ApiError::Cancelled);
        }
        let key = CacheKey {
            kind,
            baby_id: baby_id.to_string(),
            limit,
        };
        let slot = self.slot(&key).await;
        let mut cached = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ApiError::Cancelled),
            guard = slot.lock_owned() => guard,
        };

        if let Some(records) = &*cached {
            debug!("Cache hit for {} records of baby {}", kind, baby_id);
            return Ok(records.as_ref().clone());
        }

        debug!("Cache miss for {} records of baby {}", kind, baby_id);
        let records = self.inner.list_records(kind, baby_id, limit, cancel).await?;
        *cached = Some(Arc::new(records.clone()));
        Ok(records)
    }

    async fn create_record(&self, record: &NewActivity) -> Result<ActivityRecord, ApiError> {
        let created = self.inner.create_record(record).await?;
        self.invalidate(created.kind(), created.baby_id()).await;
        Ok(created)
    }

    async fn update_record(&self, id: &str, changes: &ActivityChanges) -> Result<ActivityRecord, ApiError> {
        let updated = self.inner.update_record(id, changes).await?;
        self.invalidate(updated.kind(), updated.baby_id()).await;
        Ok(updated)
    }

    // The owning baby is unknown after a delete, so the whole kind goes.
    async fn delete_record(&self, kind: RecordKind, id: &str) -> Result<(), ApiError> {
        self.inner.delete_record(kind, id).await?;
        self.invalidate_kind(kind).await;
        Ok(())
    }

    async fn invalidate_baby(&self, baby_id: &str) {
        debug!("Invalidating all cached records for baby {}", baby_id);
        self.slots.lock().await.retain(|key, _| key.baby_id != baby_id);
    }
}
