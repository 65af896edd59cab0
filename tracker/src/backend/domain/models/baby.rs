use chrono::{NaiveDate, NaiveDateTime};
use shared::{BabyProfileCreate, BabyProfileUpdate, Gender};

use super::RecordValidationError;

pub const MAX_NAME_LENGTH: usize = 100;
pub const DEFAULT_TIMEZONE: &str = "Australia/Sydney";

#[derive(Debug, Clone, PartialEq)]
pub struct Baby {
    pub id: String,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub birth_weight_kg: Option<f64>,
    pub birth_length_cm: Option<f64>,
    pub birth_head_circumference_cm: Option<f64>,
    pub gender: Option<Gender>,
    pub timezone: String,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Baby {
    /// Whole days since birth; zero for a birth date after `today`
    pub fn age_in_days(&self, today: NaiveDate) -> i64 {
        (today - self.date_of_birth).num_days().max(0)
    }

    pub fn age_in_weeks(&self, today: NaiveDate) -> i64 {
        self.age_in_days(today) / 7
    }
}

fn validate_name(name: &str) -> Result<(), RecordValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(RecordValidationError::EmptyName);
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(RecordValidationError::NameTooLong);
    }
    Ok(())
}

fn validate_birth_measurements(
    weight: Option<f64>,
    length: Option<f64>,
    head: Option<f64>,
) -> Result<(), RecordValidationError> {
    if weight.is_some_and(|w| w <= 0.0) {
        return Err(RecordValidationError::NonPositiveMeasurement("Birth weight"));
    }
    if length.is_some_and(|l| l <= 0.0) {
        return Err(RecordValidationError::NonPositiveMeasurement("Birth length"));
    }
    if head.is_some_and(|h| h <= 0.0) {
        return Err(RecordValidationError::NonPositiveMeasurement("Birth head circumference"));
    }
    Ok(())
}

pub fn validate_baby_create(
    create: &BabyProfileCreate,
    today: NaiveDate,
) -> Result<(), RecordValidationError> {
    validate_name(&create.name)?;
    let dob = crate::backend::domain::timestamps::parse_date(&create.date_of_birth).map_err(|_| {
        RecordValidationError::InvalidTimestamp {
            field: "date_of_birth",
            value: create.date_of_birth.clone(),
        }
    })?;
    if dob > today {
        return Err(RecordValidationError::BirthDateInFuture);
    }
    validate_birth_measurements(
        create.birth_weight,
        create.birth_length,
        create.birth_head_circumference,
    )
}

pub fn validate_baby_update(update: &BabyProfileUpdate) -> Result<(), RecordValidationError> {
    if let Some(name) = &update.name {
        validate_name(name)?;
    }
    validate_birth_measurements(
        update.birth_weight,
        update.birth_length,
        update.birth_head_circumference,
    )
}
