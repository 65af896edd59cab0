use anyhow::{Context, Result};
use shared::GrowthMeasurement;

use crate::backend::domain::models::Growth;
use crate::backend::domain::timestamps::parse_timestamp;

/// Mapper from shared GrowthMeasurement DTOs to domain Growth models.
///
/// `measurement_date` may be a bare date, which is read as midnight.
pub struct GrowthMapper;

impl GrowthMapper {
    pub fn to_domain(dto: GrowthMeasurement) -> Result<Growth> {
        let measured_at = parse_timestamp(&dto.measurement_date)
            .with_context(|| format!("Failed to parse measurement_date of growth {}", dto.id))?;
        let created_at = parse_timestamp(&dto.created_at)
            .with_context(|| format!("Failed to parse created_at of growth {}", dto.id))?;

        Ok(Growth {
            id: dto.id,
            baby_id: dto.baby_id,
            measured_at,
            weight_kg: dto.weight_kg,
            length_cm: dto.length_cm,
            head_circumference_cm: dto.head_circumference_cm,
            context: dto.measurement_context,
            measured_by: dto.measured_by,
            notes: dto.notes,
            percentiles: dto.percentiles,
            created_at,
        })
    }
}
