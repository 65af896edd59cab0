//! REST-backed storage: the tracker backend is the system of record.

use async_trait::async_trait;
use log::info;
use shared::{ActivityListQuery, BabyProfileCreate, BabyProfileUpdate, RecordKind};

use super::{ActivityStorage, BabyStorage, CancelToken};
use crate::backend::domain::models::{ActivityChanges, ActivityRecord, Baby, NewActivity};
use crate::backend::io::rest::mappers::{
    map_batch, BabyMapper, DiaperMapper, FeedingMapper, GrowthMapper, SleepMapper,
};
use crate::backend::io::rest::{ApiError, RestClient};

/// Upper bound used when listing profiles
const BABY_PAGE_SIZE: u32 = 100;

/// A record the backend just returned must parse, or the write is reported
/// as a decode failure.
fn decoded<T>(kind: RecordKind, result: anyhow::Result<T>) -> Result<T, ApiError> {
    result.map_err(|e| ApiError::Decode(format!("{} record: {:#}", kind, e)))
}

#[async_trait]
impl ActivityStorage for RestClient {
    async fn list_records(
        &self,
        kind: RecordKind,
        baby_id: &str,
        limit: Option<u32>,
        cancel: &CancelToken,
    ) -> Result<Vec<ActivityRecord>, ApiError> {
        let query = ActivityListQuery::for_baby(baby_id, limit);
        let records = match kind {
            RecordKind::Feeding => map_batch(kind, self.list_feedings(&query, cancel).await?, FeedingMapper::to_domain)
                .into_iter()
                .map(ActivityRecord::Feeding)
                .collect(),
            RecordKind::Sleep => map_batch(kind, self.list_sleeps(&query, cancel).await?, SleepMapper::to_domain)
                .into_iter()
                .map(ActivityRecord::Sleep)
                .collect(),
            RecordKind::Diaper => map_batch(kind, self.list_diapers(&query, cancel).await?, DiaperMapper::to_domain)
                .into_iter()
                .map(ActivityRecord::Diaper)
                .collect(),
            RecordKind::Growth => map_batch(
                kind,
                self.list_growth_measurements(&query, cancel).await?,
                GrowthMapper::to_domain,
            )
            .into_iter()
            .map(ActivityRecord::Growth)
            .collect(),
        };
        Ok(records)
    }

    async fn create_record(&self, record: &NewActivity) -> Result<ActivityRecord, ApiError> {
        info!("Creating {} record for baby {}", record.kind(), record.baby_id());
        let kind = record.kind();
        let created = match record {
            NewActivity::Feeding(c) => {
                ActivityRecord::Feeding(decoded(kind, FeedingMapper::to_domain(self.create_feeding(c).await?))?)
            }
            NewActivity::Sleep(c) => {
                ActivityRecord::Sleep(decoded(kind, SleepMapper::to_domain(self.create_sleep(c).await?))?)
            }
            NewActivity::Diaper(c) => {
                ActivityRecord::Diaper(decoded(kind, DiaperMapper::to_domain(self.create_diaper(c).await?))?)
            }
            NewActivity::Growth(c) => {
                ActivityRecord::Growth(decoded(kind, GrowthMapper::to_domain(self.create_growth(c).await?))?)
            }
        };
        Ok(created)
    }

    async fn update_record(&self, id: &str, changes: &ActivityChanges) -> Result<ActivityRecord, ApiError> {
        let kind = changes.kind();
        let updated = match changes {
            ActivityChanges::Feeding(u) => {
                ActivityRecord::Feeding(decoded(kind, FeedingMapper::to_domain(self.update_feeding(id, u).await?))?)
            }
            ActivityChanges::Sleep(u) => {
                ActivityRecord::Sleep(decoded(kind, SleepMapper::to_domain(self.update_sleep(id, u).await?))?)
            }
            ActivityChanges::Diaper(u) => {
                ActivityRecord::Diaper(decoded(kind, DiaperMapper::to_domain(self.update_diaper(id, u).await?))?)
            }
            ActivityChanges::Growth(u) => {
                ActivityRecord::Growth(decoded(kind, GrowthMapper::to_domain(self.update_growth(id, u).await?))?)
            }
        };
        Ok(updated)
    }

    async fn delete_record(&self, kind: RecordKind, id: &str) -> Result<(), ApiError> {
        match kind {
            RecordKind::Feeding => self.delete_feeding(id).await,
            RecordKind::Sleep => self.delete_sleep(id).await,
            RecordKind::Diaper => self.delete_diaper(id).await,
            RecordKind::Growth => self.delete_growth(id).await,
        }
    }
}

#[async_trait]
impl BabyStorage for RestClient {
    async fn list_babies(&self, cancel: &CancelToken) -> Result<Vec<Baby>, ApiError> {
        let profiles = RestClient::list_babies(self, 0, BABY_PAGE_SIZE, true, cancel).await?;
        Ok(map_batch("baby", profiles, BabyMapper::to_domain))
    }

    async fn get_baby(&self, id: &str, cancel: &CancelToken) -> Result<Baby, ApiError> {
        let profile = RestClient::get_baby(self, id, cancel).await?;
        BabyMapper::to_domain(profile).map_err(|e| ApiError::Decode(format!("baby profile: {:#}", e)))
    }

    async fn create_baby(&self, create: &BabyProfileCreate) -> Result<Baby, ApiError> {
        let profile = RestClient::create_baby(self, create).await?;
        BabyMapper::to_domain(profile).map_err(|e| ApiError::Decode(format!("baby profile: {:#}", e)))
    }

    async fn update_baby(&self, id: &str, update: &BabyProfileUpdate) -> Result<Baby, ApiError> {
        let profile = RestClient::update_baby(self, id, update).await?;
        BabyMapper::to_domain(profile).map_err(|e| ApiError::Decode(format!("baby profile: {:#}", e)))
    }

    async fn delete_baby(&self, id: &str) -> Result<(), ApiError> {
        RestClient::delete_baby(self, id).await
    }
}
