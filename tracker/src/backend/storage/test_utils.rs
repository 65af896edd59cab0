//! Fixtures and an in-memory storage fake shared by the unit tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Local, NaiveDate, NaiveDateTime};
use shared::{
    BabyProfileCreate, BabyProfileUpdate, DiaperType, FeedingType, MeasurementContext, RecordKind,
    SleepLocation, SleepQuality, SleepType, UrineVolume,
};
use uuid::Uuid;

use super::{ActivityStorage, BabyStorage, CancelToken};
use crate::backend::domain::models::{
    ActivityChanges, ActivityRecord, Baby, Diaper, Feeding, Growth, NewActivity, Sleep, Timestamped,
};
use crate::backend::domain::timestamps::{parse_date, parse_timestamp};
use crate::backend::io::rest::ApiError;

pub const BABY_ID: &str = "baby-1";

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

pub fn feeding_at(id: &str, start: NaiveDateTime, feeding_type: FeedingType) -> Feeding {
    Feeding {
        id: id.to_string(),
        baby_id: BABY_ID.to_string(),
        start_time: start,
        end_time: None,
        feeding_type,
        breast_started: None,
        left_breast_minutes: None,
        right_breast_minutes: None,
        volume_offered_ml: None,
        volume_consumed_ml: None,
        formula_type: None,
        food_items: Vec::new(),
        appetite: None,
        notes: None,
        created_at: start,
        recorded_duration_minutes: None,
    }
}

pub fn sleep_between(id: &str, start: NaiveDateTime, end: Option<NaiveDateTime>) -> Sleep {
    Sleep {
        id: id.to_string(),
        baby_id: BABY_ID.to_string(),
        start,
        end,
        sleep_type: SleepType::Nap,
        location: SleepLocation::Crib,
        quality: SleepQuality::Good,
        environment: None,
        wake_reason: None,
        notes: None,
        created_at: start,
        recorded_duration_minutes: None,
    }
}

pub fn diaper_at(id: &str, timestamp: NaiveDateTime, wet: bool, dirty: bool) -> Diaper {
    Diaper {
        id: id.to_string(),
        baby_id: BABY_ID.to_string(),
        timestamp,
        has_urine: wet,
        urine_volume: if wet { UrineVolume::Moderate } else { UrineVolume::None },
        has_stool: dirty,
        stool_consistency: None,
        stool_color: None,
        diaper_type: DiaperType::Disposable,
        notes: None,
        created_at: timestamp,
    }
}

pub fn growth_on(
    id: &str,
    measured_at: NaiveDateTime,
    weight_kg: Option<f64>,
    length_cm: Option<f64>,
) -> Growth {
    Growth {
        id: id.to_string(),
        baby_id: BABY_ID.to_string(),
        measured_at,
        weight_kg,
        length_cm,
        head_circumference_cm: None,
        context: MeasurementContext::Home,
        measured_by: None,
        notes: None,
        percentiles: None,
        created_at: measured_at,
    }
}

pub fn baby_named(id: &str, name: &str) -> Baby {
    let created = at(2025, 1, 1, 9, 0);
    Baby {
        id: id.to_string(),
        name: name.to_string(),
        date_of_birth: created.date(),
        birth_weight_kg: Some(3.2),
        birth_length_cm: None,
        birth_head_circumference_cm: None,
        gender: None,
        timezone: "Australia/Sydney".to_string(),
        notes: None,
        is_active: true,
        created_at: created,
        updated_at: created,
    }
}

fn not_found(what: &str, id: &str) -> ApiError {
    ApiError::Status {
        status: 404,
        detail: format!("{} {} not found", what, id),
    }
}

fn timestamp_or(value: Option<&str>, fallback: NaiveDateTime) -> NaiveDateTime {
    value.and_then(|v| parse_timestamp(v).ok()).unwrap_or(fallback)
}

fn optional(value: Option<&str>) -> Option<NaiveDateTime> {
    value.and_then(|v| parse_timestamp(v).ok())
}

/// Build the record the backend would store for `record`
fn materialize(record: &NewActivity, id: String, now: NaiveDateTime) -> ActivityRecord {
    match record {
        NewActivity::Feeding(c) => ActivityRecord::Feeding(Feeding {
            id,
            baby_id: c.baby_id.clone(),
            start_time: timestamp_or(c.start_time.as_deref(), now),
            end_time: optional(c.end_time.as_deref()),
            feeding_type: c.feeding_type,
            breast_started: c.breast_started,
            left_breast_minutes: c.left_breast_duration,
            right_breast_minutes: c.right_breast_duration,
            volume_offered_ml: c.volume_offered_ml,
            volume_consumed_ml: c.volume_consumed_ml,
            formula_type: c.formula_type.clone(),
            food_items: c.food_items.clone().unwrap_or_default(),
            appetite: c.appetite,
            notes: c.notes.clone(),
            created_at: now,
            recorded_duration_minutes: None,
        }),
        NewActivity::Sleep(c) => ActivityRecord::Sleep(Sleep {
            id,
            baby_id: c.baby_id.clone(),
            start: timestamp_or(c.sleep_start.as_deref(), now),
            end: optional(c.sleep_end.as_deref()),
            sleep_type: c.sleep_type.unwrap_or(SleepType::Nap),
            location: c.location.unwrap_or(SleepLocation::Crib),
            quality: c.sleep_quality.unwrap_or(SleepQuality::Fair),
            environment: c.sleep_environment.clone(),
            wake_reason: c.wake_reason,
            notes: c.notes.clone(),
            created_at: now,
            recorded_duration_minutes: None,
        }),
        NewActivity::Diaper(c) => ActivityRecord::Diaper(Diaper {
            id,
            baby_id: c.baby_id.clone(),
            timestamp: timestamp_or(c.timestamp.as_deref(), now),
            has_urine: c.has_urine.unwrap_or(false),
            urine_volume: c.urine_volume.unwrap_or(UrineVolume::None),
            has_stool: c.has_stool.unwrap_or(false),
            stool_consistency: c.stool_consistency,
            stool_color: c.stool_color,
            diaper_type: c.diaper_type.unwrap_or(DiaperType::Disposable),
            notes: c.notes.clone(),
            created_at: now,
        }),
        NewActivity::Growth(c) => ActivityRecord::Growth(Growth {
            id,
            baby_id: c.baby_id.clone(),
            measured_at: timestamp_or(c.measurement_date.as_deref(), now),
            weight_kg: c.weight_kg,
            length_cm: c.length_cm,
            head_circumference_cm: c.head_circumference_cm,
            context: c.measurement_context.unwrap_or(MeasurementContext::Home),
            measured_by: c.measured_by.clone(),
            notes: c.notes.clone(),
            percentiles: None,
            created_at: now,
        }),
    }
}

/// Apply the fields present in `changes`; returns false on a kind mismatch
fn apply_changes(record: &mut ActivityRecord, changes: &ActivityChanges) -> bool {
    match (record, changes) {
        (ActivityRecord::Feeding(f), ActivityChanges::Feeding(u)) => {
            if let Some(start) = optional(u.start_time.as_deref()) {
                f.start_time = start;
            }
            if u.end_time.is_some() {
                f.end_time = optional(u.end_time.as_deref());
            }
            f.breast_started = u.breast_started.or(f.breast_started);
            f.left_breast_minutes = u.left_breast_duration.or(f.left_breast_minutes);
            f.right_breast_minutes = u.right_breast_duration.or(f.right_breast_minutes);
            f.volume_offered_ml = u.volume_offered_ml.or(f.volume_offered_ml);
            f.volume_consumed_ml = u.volume_consumed_ml.or(f.volume_consumed_ml);
            if let Some(items) = &u.food_items {
                f.food_items = items.clone();
            }
            if u.notes.is_some() {
                f.notes = u.notes.clone();
            }
            true
        }
        (ActivityRecord::Sleep(s), ActivityChanges::Sleep(u)) => {
            if let Some(start) = optional(u.sleep_start.as_deref()) {
                s.start = start;
            }
            if u.sleep_end.is_some() {
                s.end = optional(u.sleep_end.as_deref());
            }
            s.sleep_type = u.sleep_type.unwrap_or(s.sleep_type);
            s.location = u.location.unwrap_or(s.location);
            s.quality = u.sleep_quality.unwrap_or(s.quality);
            s.wake_reason = u.wake_reason.or(s.wake_reason);
            if u.notes.is_some() {
                s.notes = u.notes.clone();
            }
            true
        }
        (ActivityRecord::Diaper(d), ActivityChanges::Diaper(u)) => {
            if let Some(timestamp) = optional(u.timestamp.as_deref()) {
                d.timestamp = timestamp;
            }
            d.has_urine = u.has_urine.unwrap_or(d.has_urine);
            d.has_stool = u.has_stool.unwrap_or(d.has_stool);
            d.urine_volume = u.urine_volume.unwrap_or(d.urine_volume);
            if u.notes.is_some() {
                d.notes = u.notes.clone();
            }
            true
        }
        (ActivityRecord::Growth(g), ActivityChanges::Growth(u)) => {
            if let Some(measured_at) = optional(u.measurement_date.as_deref()) {
                g.measured_at = measured_at;
            }
            g.weight_kg = u.weight_kg.or(g.weight_kg);
            g.length_cm = u.length_cm.or(g.length_cm);
            g.head_circumference_cm = u.head_circumference_cm.or(g.head_circumference_cm);
            if u.notes.is_some() {
                g.notes = u.notes.clone();
            }
            true
        }
        _ => false,
    }
}

/// In-memory stand-in for the tracker backend.
///
/// Counts every list call, can be switched to fail with a transport error and
/// can delay reads to make concurrent callers overlap.
#[derive(Default)]
pub struct InMemoryStorage {
    records: Mutex<Vec<ActivityRecord>>,
    babies: Mutex<Vec<Baby>>,
    reads: AtomicUsize,
    failing: AtomicBool,
    delay: Option<Duration>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<ActivityRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn insert(&self, record: ActivityRecord) {
        self.records.lock().unwrap().push(record);
    }

    pub fn insert_baby(&self, baby: Baby) {
        self.babies.lock().unwrap().push(baby);
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of list calls that reached this storage
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    async fn before_read(&self, cancel: &CancelToken) -> Result<(), ApiError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(ApiError::Cancelled),
                _ = tokio::time::sleep(delay) => {}
            }
        }
        self.check_available()
    }

    fn check_available(&self) -> Result<(), ApiError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ApiError::Transport("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ActivityStorage for InMemoryStorage {
    async fn list_records(
        &self,
        kind: RecordKind,
        baby_id: &str,
        limit: Option<u32>,
        cancel: &CancelToken,
    ) -> Result<Vec<ActivityRecord>, ApiError> {
        self.before_read(cancel).await?;
        let mut matching: Vec<ActivityRecord> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.kind() == kind && r.baby_id() == baby_id)
            .cloned()
            .collect();
        matching.sort_by_key(|r| std::cmp::Reverse(r.reference_time()));
        if let Some(limit) = limit {
            matching.truncate(limit as usize);
        }
        Ok(matching)
    }

    async fn create_record(&self, record: &NewActivity) -> Result<ActivityRecord, ApiError> {
        self.check_available()?;
        let now = Local::now().naive_local();
        let created = materialize(record, Uuid::new_v4().to_string(), now);
        self.records.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_record(&self, id: &str, changes: &ActivityChanges) -> Result<ActivityRecord, ApiError> {
        self.check_available()?;
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id() == id && r.kind() == changes.kind())
            .ok_or_else(|| not_found(&changes.kind().to_string(), id))?;
        apply_changes(record, changes);
        Ok(record.clone())
    }

    async fn delete_record(&self, kind: RecordKind, id: &str) -> Result<(), ApiError> {
        self.check_available()?;
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| !(r.kind() == kind && r.id() == id));
        if records.len() == before {
            return Err(not_found(&kind.to_string(), id));
        }
        Ok(())
    }
}

#[async_trait]
impl BabyStorage for InMemoryStorage {
    async fn list_babies(&self, cancel: &CancelToken) -> Result<Vec<Baby>, ApiError> {
        self.before_read(cancel).await?;
        Ok(self
            .babies
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.is_active)
            .cloned()
            .collect())
    }

    async fn get_baby(&self, id: &str, cancel: &CancelToken) -> Result<Baby, ApiError> {
        self.before_read(cancel).await?;
        self.babies
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| not_found("baby", id))
    }

    async fn create_baby(&self, create: &BabyProfileCreate) -> Result<Baby, ApiError> {
        self.check_available()?;
        let now = Local::now().naive_local();
        let date_of_birth = parse_date(&create.date_of_birth)
            .map_err(|e| ApiError::Status { status: 422, detail: e.to_string() })?;
        let baby = Baby {
            id: Uuid::new_v4().to_string(),
            name: create.name.clone(),
            date_of_birth,
            birth_weight_kg: create.birth_weight,
            birth_length_cm: create.birth_length,
            birth_head_circumference_cm: create.birth_head_circumference,
            gender: create.gender,
            timezone: create
                .timezone
                .clone()
                .unwrap_or_else(|| "Australia/Sydney".to_string()),
            notes: create.notes.clone(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.babies.lock().unwrap().push(baby.clone());
        Ok(baby)
    }

    async fn update_baby(&self, id: &str, update: &BabyProfileUpdate) -> Result<Baby, ApiError> {
        self.check_available()?;
        let mut babies = self.babies.lock().unwrap();
        let baby = babies
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| not_found("baby", id))?;
        if let Some(name) = &update.name {
            baby.name = name.clone();
        }
        baby.birth_weight_kg = update.birth_weight.or(baby.birth_weight_kg);
        baby.is_active = update.is_active.unwrap_or(baby.is_active);
        baby.updated_at = Local::now().naive_local();
        Ok(baby.clone())
    }

    async fn delete_baby(&self, id: &str) -> Result<(), ApiError> {
        self.check_available()?;
        let mut babies = self.babies.lock().unwrap();
        let baby = babies
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| not_found("baby", id))?;
        baby.is_active = false;
        Ok(())
    }
}
