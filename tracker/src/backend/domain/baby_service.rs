use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{info, warn};
use shared::{BabyProfileCreate, BabyProfileUpdate};
use std::sync::Arc;

use super::models::baby::{validate_baby_create, validate_baby_update};
use super::models::Baby;
use crate::backend::storage::{ActivityStorage, BabyStorage, CachedActivityStorage, CancelToken};

/// Service for managing baby profiles
#[derive(Clone)]
pub struct BabyService {
    storage: Arc<dyn BabyStorage>,
    records: Arc<CachedActivityStorage>,
}

impl BabyService {
    pub fn new(storage: Arc<dyn BabyStorage>, records: Arc<CachedActivityStorage>) -> Self {
        Self { storage, records }
    }

    /// Active profiles
    pub async fn list_babies(&self, cancel: &CancelToken) -> Result<Vec<Baby>> {
        info!("Listing babies");
        let babies = self
            .storage
            .list_babies(cancel)
            .await
            .context("Failed to list babies")?;
        info!("Found {} babies", babies.len());
        Ok(babies)
    }

    pub async fn get_baby(&self, baby_id: &str, cancel: &CancelToken) -> Result<Baby> {
        info!("Getting baby: {}", baby_id);
        let baby = self
            .storage
            .get_baby(baby_id, cancel)
            .await
            .with_context(|| format!("Failed to load baby {}", baby_id))?;
        Ok(baby)
    }

    /// Validate against `today` (the date of birth may not be later) and create
    pub async fn create_baby(&self, create: &BabyProfileCreate, today: NaiveDate) -> Result<Baby> {
        info!("Creating baby: name={}, date_of_birth={}", create.name, create.date_of_birth);
        validate_baby_create(create, today)?;

        let baby = self
            .storage
            .create_baby(create)
            .await
            .context("Failed to create baby")?;
        info!("Created baby: {} with ID: {}", baby.name, baby.id);
        Ok(baby)
    }

    pub async fn update_baby(&self, baby_id: &str, update: &BabyProfileUpdate) -> Result<Baby> {
        info!("Updating baby: {}", baby_id);
        validate_baby_update(update)?;

        let baby = self
            .storage
            .update_baby(baby_id, update)
            .await
            .with_context(|| format!("Failed to update baby {}", baby_id))?;
        if !baby.is_active {
            warn!("Baby {} is now inactive", baby_id);
        }
        Ok(baby)
    }

    /// Deactivate a profile; the backend keeps its records
    pub async fn delete_baby(&self, baby_id: &str) -> Result<()> {
        info!("Deleting baby: {}", baby_id);
        self.storage
            .delete_baby(baby_id)
            .await
            .with_context(|| format!("Failed to delete baby {}", baby_id))?;
        self.records.invalidate_baby(baby_id).await;
        Ok(())
    }

    /// The baby named by `requested`, or else the first active profile
    pub async fn pick_baby(&self, requested: Option<&str>, cancel: &CancelToken) -> Result<Option<Baby>> {
        match requested {
            Some(id) => self.get_baby(id, cancel).await.map(Some),
            None => Ok(self.list_babies(cancel).await?.into_iter().next()),
        }
    }
}
