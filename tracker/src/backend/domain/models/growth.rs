use chrono::NaiveDateTime;
use shared::{GrowthMeasurementCreate, GrowthMeasurementUpdate, MeasurementContext};
use std::collections::HashMap;

use super::{parse_field, RecordValidationError};

#[derive(Debug, Clone, PartialEq)]
pub struct Growth {
    pub id: String,
    pub baby_id: String,
    pub measured_at: NaiveDateTime,
    pub weight_kg: Option<f64>,
    pub length_cm: Option<f64>,
    pub head_circumference_cm: Option<f64>,
    pub context: MeasurementContext,
    pub measured_by: Option<String>,
    pub notes: Option<String>,
    /// Passed through untouched from the backend
    pub percentiles: Option<HashMap<String, serde_json::Value>>,
    pub created_at: NaiveDateTime,
}

impl Growth {
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(weight) = self.weight_kg {
            parts.push(format!("{:.2} kg", weight));
        }
        if let Some(length) = self.length_cm {
            parts.push(format!("{:.1} cm", length));
        }
        if let Some(head) = self.head_circumference_cm {
            parts.push(format!("head {:.1} cm", head));
        }
        if parts.is_empty() {
            "Growth measurement".to_string()
        } else {
            format!("Growth: {}", parts.join(", "))
        }
    }
}

fn check_positive(
    weight: Option<f64>,
    length: Option<f64>,
    head: Option<f64>,
) -> Result<(), RecordValidationError> {
    if weight.is_some_and(|w| w <= 0.0) {
        return Err(RecordValidationError::NonPositiveMeasurement("Weight"));
    }
    if length.is_some_and(|l| l <= 0.0) {
        return Err(RecordValidationError::NonPositiveMeasurement("Length"));
    }
    if head.is_some_and(|h| h <= 0.0) {
        return Err(RecordValidationError::NonPositiveMeasurement("Head circumference"));
    }
    Ok(())
}

pub fn validate_growth_create(create: &GrowthMeasurementCreate) -> Result<(), RecordValidationError> {
    if create.weight_kg.is_none() && create.length_cm.is_none() && create.head_circumference_cm.is_none() {
        return Err(RecordValidationError::EmptyMeasurement);
    }
    if let Some(date) = &create.measurement_date {
        parse_field("measurement_date", date)?;
    }
    check_positive(create.weight_kg, create.length_cm, create.head_circumference_cm)
}

pub fn validate_growth_update(update: &GrowthMeasurementUpdate) -> Result<(), RecordValidationError> {
    if let Some(date) = &update.measurement_date {
        parse_field("measurement_date", date)?;
    }
    check_positive(update.weight_kg, update.length_cm, update.head_circumference_cm)
}
