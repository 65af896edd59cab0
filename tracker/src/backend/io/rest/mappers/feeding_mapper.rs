use anyhow::{Context, Result};
use shared::FeedingSession;

use super::optional_timestamp;
use crate::backend::domain::models::Feeding;
use crate::backend::domain::timestamps::parse_timestamp;

/// Mapper from shared FeedingSession DTOs to domain Feeding models.
pub struct FeedingMapper;

impl FeedingMapper {
    pub fn to_domain(dto: FeedingSession) -> Result<Feeding> {
        let start_time = parse_timestamp(&dto.start_time)
            .with_context(|| format!("Failed to parse start_time of feeding {}", dto.id))?;
        let end_time = optional_timestamp(dto.end_time.as_deref())
            .with_context(|| format!("Failed to parse end_time of feeding {}", dto.id))?;
        let created_at = parse_timestamp(&dto.created_at)
            .with_context(|| format!("Failed to parse created_at of feeding {}", dto.id))?;

        Ok(Feeding {
            id: dto.id,
            baby_id: dto.baby_id,
            start_time,
            end_time,
            feeding_type: dto.feeding_type,
            breast_started: dto.breast_started,
            left_breast_minutes: dto.left_breast_duration,
            right_breast_minutes: dto.right_breast_duration,
            volume_offered_ml: dto.volume_offered_ml,
            volume_consumed_ml: dto.volume_consumed_ml,
            formula_type: dto.formula_type,
            food_items: dto.food_items.unwrap_or_default(),
            appetite: dto.appetite,
            notes: dto.notes,
            created_at,
            recorded_duration_minutes: dto.duration_minutes,
        })
    }
}
