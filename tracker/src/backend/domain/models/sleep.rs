use chrono::NaiveDateTime;
use shared::{SleepLocation, SleepQuality, SleepSessionCreate, SleepSessionUpdate, SleepType, WakeReason};
use std::collections::HashMap;

use super::{check_span, RecordValidationError};
use crate::backend::domain::timestamps::minutes_between;

#[derive(Debug, Clone, PartialEq)]
pub struct Sleep {
    pub id: String,
    pub baby_id: String,
    pub start: NaiveDateTime,
    pub end: Option<NaiveDateTime>,
    pub sleep_type: SleepType,
    pub location: SleepLocation,
    pub quality: SleepQuality,
    pub environment: Option<HashMap<String, serde_json::Value>>,
    pub wake_reason: Option<WakeReason>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub recorded_duration_minutes: Option<u32>,
}

impl Sleep {
    /// `None` while the baby is still asleep
    pub fn duration_minutes(&self) -> Option<f64> {
        if let Some(recorded) = self.recorded_duration_minutes {
            return Some(recorded as f64);
        }
        let end = self.end?;
        let span = minutes_between(self.start, end);
        (span >= 0.0).then_some(span)
    }

    pub fn is_ongoing(&self) -> bool {
        self.end.is_none()
    }

    /// A session counts as a wake-up when something other than the baby's
    /// own rhythm ended it.
    pub fn is_wake_up(&self) -> bool {
        matches!(self.wake_reason, Some(reason) if reason != WakeReason::Natural)
    }

    pub fn summary(&self) -> String {
        let kind = match self.sleep_type {
            SleepType::Nap => "Nap",
            SleepType::Nighttime => "Night sleep",
        };
        match self.duration_minutes() {
            Some(minutes) => format!("{}, {:.0} min in {}", kind, minutes, self.location.label()),
            None if self.is_ongoing() => format!("{} (ongoing)", kind),
            None => kind.to_string(),
        }
    }
}

pub fn validate_sleep_create(create: &SleepSessionCreate) -> Result<(), RecordValidationError> {
    check_span(
        "sleep_start",
        create.sleep_start.as_deref(),
        "sleep_end",
        create.sleep_end.as_deref(),
    )
}

pub fn validate_sleep_update(update: &SleepSessionUpdate) -> Result<(), RecordValidationError> {
    check_span(
        "sleep_start",
        update.sleep_start.as_deref(),
        "sleep_end",
        update.sleep_end.as_deref(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::test_utils::{at, sleep_between};

    #[test]
    fn test_duration_and_ongoing() {
        let finished = sleep_between("s1", at(2025, 1, 5, 13, 0), Some(at(2025, 1, 5, 14, 30)));
        assert_eq!(finished.duration_minutes(), Some(90.0));

        let ongoing = sleep_between("s2", at(2025, 1, 5, 19, 0), None);
        assert_eq!(ongoing.duration_minutes(), None);
        assert!(ongoing.is_ongoing());
        assert_eq!(ongoing.summary(), "Nap (ongoing)");
    }

    #[test]
    fn test_wake_up_excludes_natural() {
        let mut sleep = sleep_between("s1", at(2025, 1, 5, 13, 0), Some(at(2025, 1, 5, 14, 0)));
        assert!(!sleep.is_wake_up());
        sleep.wake_reason = Some(WakeReason::Natural);
        assert!(!sleep.is_wake_up());
        sleep.wake_reason = Some(WakeReason::Noise);
        assert!(sleep.is_wake_up());
    }

    #[test]
    fn test_reversed_span_rejected() {
        let create = SleepSessionCreate {
            baby_id: "baby-1".to_string(),
            sleep_start: Some("2025-01-05T14:00:00".to_string()),
            sleep_end: Some("2025-01-05T13:00:00".to_string()),
            sleep_type: None,
            location: None,
            sleep_quality: None,
            sleep_environment: None,
            wake_reason: None,
            notes: None,
        };
        assert_eq!(validate_sleep_create(&create), Err(RecordValidationError::EndBeforeStart));
    }
}
