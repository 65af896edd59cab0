//! Domain models for babies and their activity records.
//!
//! These are the parsed, timezone-naive counterparts of the wire DTOs in
//! `shared`. Conversion happens in `io::rest::mappers`; nothing in the
//! analytics engine ever sees a raw timestamp string.

pub mod activity;
pub mod baby;
pub mod diaper;
pub mod feeding;
pub mod growth;
pub mod sleep;

pub use activity::{ActivityChanges, ActivityRecord, ActivitySnapshot, NewActivity, Timestamped};
pub use baby::Baby;
pub use diaper::{Diaper, DiaperContents};
pub use feeding::Feeding;
pub use growth::Growth;
pub use sleep::Sleep;

/// Reasons a create or update payload is rejected before it is sent
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordValidationError {
    #[error("Baby name cannot be empty")]
    EmptyName,
    #[error("Baby name cannot exceed 100 characters")]
    NameTooLong,
    #[error("Date of birth cannot be in the future")]
    BirthDateInFuture,
    #[error("Invalid {field}: '{value}'")]
    InvalidTimestamp { field: &'static str, value: String },
    #[error("End time cannot be before start time")]
    EndBeforeStart,
    #[error("Volume consumed cannot exceed volume offered")]
    ConsumedExceedsOffered,
    #[error("{0} must be positive")]
    NonPositiveMeasurement(&'static str),
    #[error("At least one of weight, length or head circumference is required")]
    EmptyMeasurement,
}

pub(crate) fn parse_field(
    field: &'static str,
    value: &str,
) -> Result<chrono::NaiveDateTime, RecordValidationError> {
    crate::backend::domain::timestamps::parse_timestamp(value).map_err(|_| RecordValidationError::InvalidTimestamp {
        field,
        value: value.to_string(),
    })
}

/// Shared check for records with an optional end timestamp
pub(crate) fn check_span(
    start_field: &'static str,
    start: Option<&str>,
    end_field: &'static str,
    end: Option<&str>,
) -> Result<(), RecordValidationError> {
    let start = start.map(|s| parse_field(start_field, s)).transpose()?;
    let end = end.map(|e| parse_field(end_field, e)).transpose()?;
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            return Err(RecordValidationError::EndBeforeStart);
        }
    }
    Ok(())
}
