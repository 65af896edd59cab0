use chrono::NaiveDateTime;
use shared::{Appetite, BreastSide, FeedingSessionCreate, FeedingSessionUpdate, FeedingType};

use super::{check_span, RecordValidationError};
use crate::backend::domain::timestamps::minutes_between;

#[derive(Debug, Clone, PartialEq)]
pub struct Feeding {
    pub id: String,
    pub baby_id: String,
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub feeding_type: FeedingType,
    pub breast_started: Option<BreastSide>,
    pub left_breast_minutes: Option<u32>,
    pub right_breast_minutes: Option<u32>,
    pub volume_offered_ml: Option<u32>,
    pub volume_consumed_ml: Option<u32>,
    pub formula_type: Option<String>,
    pub food_items: Vec<String>,
    pub appetite: Option<Appetite>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    /// Duration reported by the backend, if any
    pub recorded_duration_minutes: Option<u32>,
}

impl Feeding {
    /// Length of the feed in minutes.
    ///
    /// Prefers the backend's explicit duration, then `end - start`, then for
    /// breast feeds the sum of the per-side minutes.
    pub fn duration_minutes(&self) -> Option<f64> {
        if let Some(recorded) = self.recorded_duration_minutes {
            return Some(recorded as f64);
        }
        if let Some(end) = self.end_time {
            let span = minutes_between(self.start_time, end);
            if span >= 0.0 {
                return Some(span);
            }
        }
        if self.feeding_type == FeedingType::Breast
            && (self.left_breast_minutes.is_some() || self.right_breast_minutes.is_some())
        {
            let total = self
                .left_breast_minutes
                .unwrap_or(0)
                .saturating_add(self.right_breast_minutes.unwrap_or(0));
            return Some(total as f64);
        }
        None
    }

    /// Minutes spent on the given side (breast feeds only)
    pub fn side_minutes(&self, side: BreastSide) -> u32 {
        if self.feeding_type != FeedingType::Breast {
            return 0;
        }
        match side {
            BreastSide::Left => self.left_breast_minutes.unwrap_or(0),
            BreastSide::Right => self.right_breast_minutes.unwrap_or(0),
        }
    }

    /// Millilitres taken from a bottle; falls back to the offered volume
    pub fn bottle_volume_ml(&self) -> Option<f64> {
        if self.feeding_type != FeedingType::Bottle {
            return None;
        }
        self.volume_consumed_ml
            .or(self.volume_offered_ml)
            .map(|ml| ml as f64)
    }

    pub fn summary(&self) -> String {
        match self.feeding_type {
            FeedingType::Breast => match self.duration_minutes() {
                Some(minutes) => format!("Breast feed, {:.0} min", minutes),
                None => "Breast feed".to_string(),
            },
            FeedingType::Bottle => match (self.volume_consumed_ml, self.volume_offered_ml) {
                (Some(consumed), Some(offered)) if consumed != offered => {
                    format!("Bottle feed, {} of {} ml", consumed, offered)
                }
                (Some(ml), _) | (None, Some(ml)) => format!("Bottle feed, {} ml", ml),
                (None, None) => "Bottle feed".to_string(),
            },
            FeedingType::Solid if !self.food_items.is_empty() => {
                format!("Solid feed: {}", self.food_items.join(", "))
            }
            FeedingType::Solid => "Solid feed".to_string(),
        }
    }
}

fn check_volumes(offered: Option<u32>, consumed: Option<u32>) -> Result<(), RecordValidationError> {
    if let (Some(offered), Some(consumed)) = (offered, consumed) {
        if consumed > offered {
            return Err(RecordValidationError::ConsumedExceedsOffered);
        }
    }
    Ok(())
}

/// Durations and volumes are unsigned on the wire, so only their relations
/// need checking here.
pub fn validate_feeding_create(create: &FeedingSessionCreate) -> Result<(), RecordValidationError> {
    check_span(
        "start_time",
        create.start_time.as_deref(),
        "end_time",
        create.end_time.as_deref(),
    )?;
    check_volumes(create.volume_offered_ml, create.volume_consumed_ml)
}

pub fn validate_feeding_update(update: &FeedingSessionUpdate) -> Result<(), RecordValidationError> {
    check_span(
        "start_time",
        update.start_time.as_deref(),
        "end_time",
        update.end_time.as_deref(),
    )?;
    check_volumes(update.volume_offered_ml, update.volume_consumed_ml)
}
