//! Conversions between wire DTOs and domain models.
//!
//! Parsing is strict per record but lenient per batch: a record whose
//! timestamps cannot be parsed is logged and dropped so the rest of the
//! collection still reaches the analytics engine.

pub mod baby_mapper;
pub mod diaper_mapper;
pub mod feeding_mapper;
pub mod growth_mapper;
pub mod sleep_mapper;

use anyhow::Result;
use log::warn;
use std::fmt::Display;

pub use baby_mapper::BabyMapper;
pub use diaper_mapper::DiaperMapper;
pub use feeding_mapper::FeedingMapper;
pub use growth_mapper::GrowthMapper;
pub use sleep_mapper::SleepMapper;

/// Map every DTO, skipping the ones that fail to convert
pub fn map_batch<D, T, F, L>(what: L, dtos: Vec<D>, to_domain: F) -> Vec<T>
where
    F: Fn(D) -> Result<T>,
    L: Display,
{
    let total = dtos.len();
    let mapped: Vec<T> = dtos
        .into_iter()
        .filter_map(|dto| match to_domain(dto) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Dropping malformed {} record: {:#}", what, e);
                None
            }
        })
        .collect();
    if mapped.len() < total {
        warn!("Kept {} of {} {} records", mapped.len(), total, what);
    }
    mapped
}

pub(crate) fn optional_timestamp(value: Option<&str>) -> Result<Option<chrono::NaiveDateTime>> {
    value
        .map(crate::backend::domain::timestamps::parse_timestamp)
        .transpose()
}
