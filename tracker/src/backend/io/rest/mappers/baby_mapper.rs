use anyhow::{Context, Result};
use shared::BabyProfile;

use crate::backend::domain::models::Baby;
use crate::backend::domain::timestamps::{parse_date, parse_timestamp};

/// Mapper from shared BabyProfile DTOs to domain Baby models.
pub struct BabyMapper;

impl BabyMapper {
    pub fn to_domain(dto: BabyProfile) -> Result<Baby> {
        let date_of_birth = parse_date(&dto.date_of_birth)
            .with_context(|| format!("Failed to parse date_of_birth of baby {}", dto.id))?;
        let created_at = parse_timestamp(&dto.created_at)
            .with_context(|| format!("Failed to parse created_at of baby {}", dto.id))?;
        let updated_at = parse_timestamp(&dto.updated_at)
            .with_context(|| format!("Failed to parse updated_at of baby {}", dto.id))?;

        Ok(Baby {
            id: dto.id,
            name: dto.name,
            date_of_birth,
            birth_weight_kg: dto.birth_weight,
            birth_length_cm: dto.birth_length,
            birth_head_circumference_cm: dto.birth_head_circumference,
            gender: dto.gender,
            timezone: dto.timezone,
            notes: dto.notes,
            is_active: dto.is_active,
            created_at,
            updated_at,
        })
    }
}
