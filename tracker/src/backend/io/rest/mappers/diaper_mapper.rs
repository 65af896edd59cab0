use anyhow::{Context, Result};
use shared::DiaperEvent;

use crate::backend::domain::models::Diaper;
use crate::backend::domain::timestamps::parse_timestamp;

pub struct DiaperMapper;

impl DiaperMapper {
    pub fn to_domain(dto: DiaperEvent) -> Result<Diaper> {
        let timestamp = parse_timestamp(&dto.timestamp)
            .with_context(|| format!("Failed to parse timestamp of diaper event {}", dto.id))?;
        let created_at = parse_timestamp(&dto.created_at)
            .with_context(|| format!("Failed to parse created_at of diaper event {}", dto.id))?;

        Ok(Diaper {
            id: dto.id,
            baby_id: dto.baby_id,
            timestamp,
            has_urine: dto.has_urine,
            urine_volume: dto.urine_volume,
            has_stool: dto.has_stool,
            stool_consistency: dto.stool_consistency,
            stool_color: dto.stool_color,
            diaper_type: dto.diaper_type,
            notes: dto.notes,
            created_at,
        })
    }
}
