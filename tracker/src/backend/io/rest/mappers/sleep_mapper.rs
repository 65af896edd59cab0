use anyhow::{Context, Result};
use shared::SleepSession;

use super::optional_timestamp;
use crate::backend::domain::models::Sleep;
use crate::backend::domain::timestamps::parse_timestamp;

pub struct SleepMapper;

impl SleepMapper {
    pub fn to_domain(dto: SleepSession) -> Result<Sleep> {
        let start = parse_timestamp(&dto.sleep_start)
            .with_context(|| format!("Failed to parse sleep_start of sleep {}", dto.id))?;
        let end = optional_timestamp(dto.sleep_end.as_deref())
            .with_context(|| format!("Failed to parse sleep_end of sleep {}", dto.id))?;
        let created_at = parse_timestamp(&dto.created_at)
            .with_context(|| format!("Failed to parse created_at of sleep {}", dto.id))?;

        Ok(Sleep {
            id: dto.id,
            baby_id: dto.baby_id,
            start,
            end,
            sleep_type: dto.sleep_type,
            location: dto.location,
            quality: dto.sleep_quality,
            environment: dto.sleep_environment,
            wake_reason: dto.wake_reason,
            notes: dto.notes,
            created_at,
            recorded_duration_minutes: dto.duration_minutes,
        })
    }
}
