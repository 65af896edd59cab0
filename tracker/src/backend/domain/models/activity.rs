//! The activity record sum type.
//!
//! Every per-kind branch in the tracker goes through an exhaustive match on
//! [`ActivityRecord`], [`NewActivity`] or [`ActivityChanges`], so adding a
//! record kind is a compile error until every view handles it.

use chrono::NaiveDateTime;
use shared::{
    ActivityFeedEntry, DiaperEventCreate, DiaperEventUpdate, FeedingSessionCreate,
    FeedingSessionUpdate, GrowthMeasurementCreate, GrowthMeasurementUpdate, RecordKind,
    SleepSessionCreate, SleepSessionUpdate,
};

use super::{diaper, feeding, growth, sleep, Diaper, Feeding, Growth, RecordValidationError, Sleep};

/// Anything with a single reference instant on the timeline
pub trait Timestamped {
    fn reference_time(&self) -> NaiveDateTime;
}

impl Timestamped for Feeding {
    fn reference_time(&self) -> NaiveDateTime {
        self.start_time
    }
}

impl Timestamped for Sleep {
    fn reference_time(&self) -> NaiveDateTime {
        self.start
    }
}

impl Timestamped for Diaper {
    fn reference_time(&self) -> NaiveDateTime {
        self.timestamp
    }
}

impl Timestamped for Growth {
    fn reference_time(&self) -> NaiveDateTime {
        self.measured_at
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActivityRecord {
    Feeding(Feeding),
    Sleep(Sleep),
    Diaper(Diaper),
    Growth(Growth),
}

impl ActivityRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            ActivityRecord::Feeding(_) => RecordKind::Feeding,
            ActivityRecord::Sleep(_) => RecordKind::Sleep,
            ActivityRecord::Diaper(_) => RecordKind::Diaper,
            ActivityRecord::Growth(_) => RecordKind::Growth,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            ActivityRecord::Feeding(f) => &f.id,
            ActivityRecord::Sleep(s) => &s.id,
            ActivityRecord::Diaper(d) => &d.id,
            ActivityRecord::Growth(g) => &g.id,
        }
    }

    pub fn baby_id(&self) -> &str {
        match self {
            ActivityRecord::Feeding(f) => &f.baby_id,
            ActivityRecord::Sleep(s) => &s.baby_id,
            ActivityRecord::Diaper(d) => &d.baby_id,
            ActivityRecord::Growth(g) => &g.baby_id,
        }
    }

    pub fn summary(&self) -> String {
        match self {
            ActivityRecord::Feeding(f) => f.summary(),
            ActivityRecord::Sleep(s) => s.summary(),
            ActivityRecord::Diaper(d) => d.summary(),
            ActivityRecord::Growth(g) => g.summary(),
        }
    }

    pub fn to_feed_entry(&self) -> ActivityFeedEntry {
        ActivityFeedEntry {
            id: self.id().to_string(),
            kind: self.kind(),
            timestamp: self.reference_time(),
            summary: self.summary(),
        }
    }
}

impl Timestamped for ActivityRecord {
    fn reference_time(&self) -> NaiveDateTime {
        match self {
            ActivityRecord::Feeding(f) => f.reference_time(),
            ActivityRecord::Sleep(s) => s.reference_time(),
            ActivityRecord::Diaper(d) => d.reference_time(),
            ActivityRecord::Growth(g) => g.reference_time(),
        }
    }
}

/// One fetched copy of every record kind for a single baby
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivitySnapshot {
    pub feedings: Vec<Feeding>,
    pub sleeps: Vec<Sleep>,
    pub diapers: Vec<Diaper>,
    pub growth: Vec<Growth>,
}

impl ActivitySnapshot {
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = ActivityRecord>,
    {
        let mut snapshot = Self::default();
        for record in records {
            snapshot.push(record);
        }
        snapshot
    }

    pub fn push(&mut self, record: ActivityRecord) {
        match record {
            ActivityRecord::Feeding(f) => self.feedings.push(f),
            ActivityRecord::Sleep(s) => self.sleeps.push(s),
            ActivityRecord::Diaper(d) => self.diapers.push(d),
            ActivityRecord::Growth(g) => self.growth.push(g),
        }
    }

    /// All records as the sum type, in kind order
    pub fn records(&self) -> Vec<ActivityRecord> {
        self.feedings
            .iter()
            .cloned()
            .map(ActivityRecord::Feeding)
            .chain(self.sleeps.iter().cloned().map(ActivityRecord::Sleep))
            .chain(self.diapers.iter().cloned().map(ActivityRecord::Diaper))
            .chain(self.growth.iter().cloned().map(ActivityRecord::Growth))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.feedings.len() + self.sleeps.len() + self.diapers.len() + self.growth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Create payload for any record kind
#[derive(Debug, Clone, PartialEq)]
pub enum NewActivity {
    Feeding(FeedingSessionCreate),
    Sleep(SleepSessionCreate),
    Diaper(DiaperEventCreate),
    Growth(GrowthMeasurementCreate),
}

impl NewActivity {
    pub fn kind(&self) -> RecordKind {
        match self {
            NewActivity::Feeding(_) => RecordKind::Feeding,
            NewActivity::Sleep(_) => RecordKind::Sleep,
            NewActivity::Diaper(_) => RecordKind::Diaper,
            NewActivity::Growth(_) => RecordKind::Growth,
        }
    }

    pub fn baby_id(&self) -> &str {
        match self {
            NewActivity::Feeding(c) => &c.baby_id,
            NewActivity::Sleep(c) => &c.baby_id,
            NewActivity::Diaper(c) => &c.baby_id,
            NewActivity::Growth(c) => &c.baby_id,
        }
    }

    pub fn validate(&self) -> Result<(), RecordValidationError> {
        match self {
            NewActivity::Feeding(c) => feeding::validate_feeding_create(c),
            NewActivity::Sleep(c) => sleep::validate_sleep_create(c),
            NewActivity::Diaper(c) => diaper::validate_diaper_create(c),
            NewActivity::Growth(c) => growth::validate_growth_create(c),
        }
    }
}

/// Partial update payload for any record kind
#[derive(Debug, Clone, PartialEq)]
pub enum ActivityChanges {
    Feeding(FeedingSessionUpdate),
    Sleep(SleepSessionUpdate),
    Diaper(DiaperEventUpdate),
    Growth(GrowthMeasurementUpdate),
}

impl ActivityChanges {
    pub fn kind(&self) -> RecordKind {
        match self {
            ActivityChanges::Feeding(_) => RecordKind::Feeding,
            ActivityChanges::Sleep(_) => RecordKind::Sleep,
            ActivityChanges::Diaper(_) => RecordKind::Diaper,
            ActivityChanges::Growth(_) => RecordKind::Growth,
        }
    }

    pub fn validate(&self) -> Result<(), RecordValidationError> {
        match self {
            ActivityChanges::Feeding(u) => feeding::validate_feeding_update(u),
            ActivityChanges::Sleep(u) => sleep::validate_sleep_update(u),
            ActivityChanges::Diaper(u) => diaper::validate_diaper_update(u),
            ActivityChanges::Growth(u) => growth::validate_growth_update(u),
        }
    }
}
