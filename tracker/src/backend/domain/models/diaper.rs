use chrono::NaiveDateTime;
use shared::{DiaperEventCreate, DiaperEventUpdate, DiaperType, StoolColor, StoolConsistency, UrineVolume};

use super::{parse_field, RecordValidationError};

#[derive(Debug, Clone, PartialEq)]
pub struct Diaper {
    pub id: String,
    pub baby_id: String,
    pub timestamp: NaiveDateTime,
    pub has_urine: bool,
    pub urine_volume: UrineVolume,
    pub has_stool: bool,
    pub stool_consistency: Option<StoolConsistency>,
    pub stool_color: Option<StoolColor>,
    pub diaper_type: DiaperType,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

/// What a nappy contained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiaperContents {
    WetOnly,
    DirtyOnly,
    Both,
    Dry,
}

impl DiaperContents {
    pub const ALL: [DiaperContents; 4] = [
        DiaperContents::WetOnly,
        DiaperContents::DirtyOnly,
        DiaperContents::Both,
        DiaperContents::Dry,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DiaperContents::WetOnly => "Wet only",
            DiaperContents::DirtyOnly => "Dirty only",
            DiaperContents::Both => "Wet & dirty",
            DiaperContents::Dry => "Dry",
        }
    }
}

impl Diaper {
    pub fn contents(&self) -> DiaperContents {
        match (self.has_urine, self.has_stool) {
            (true, false) => DiaperContents::WetOnly,
            (false, true) => DiaperContents::DirtyOnly,
            (true, true) => DiaperContents::Both,
            (false, false) => DiaperContents::Dry,
        }
    }

    pub fn summary(&self) -> String {
        match self.contents() {
            DiaperContents::WetOnly => "Wet nappy".to_string(),
            DiaperContents::DirtyOnly => "Dirty nappy".to_string(),
            DiaperContents::Both => "Wet and dirty nappy".to_string(),
            DiaperContents::Dry => "Dry nappy".to_string(),
        }
    }
}

pub fn validate_diaper_create(create: &DiaperEventCreate) -> Result<(), RecordValidationError> {
    if let Some(ts) = &create.timestamp {
        parse_field("timestamp", ts)?;
    }
    Ok(())
}

pub fn validate_diaper_update(update: &DiaperEventUpdate) -> Result<(), RecordValidationError> {
    if let Some(ts) = &update.timestamp {
        parse_field("timestamp", ts)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::test_utils::{at, diaper_at};

    #[test]
    fn test_contents_classification() {
        let ts = at(2025, 1, 5, 9, 0);
        assert_eq!(diaper_at("d1", ts, true, false).contents(), DiaperContents::WetOnly);
        assert_eq!(diaper_at("d2", ts, false, true).contents(), DiaperContents::DirtyOnly);
        assert_eq!(diaper_at("d3", ts, true, true).contents(), DiaperContents::Both);
        assert_eq!(diaper_at("d4", ts, false, false).summary(), "Dry nappy");
    }
}
