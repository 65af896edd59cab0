use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Enums shared with the backend (serialized in the backend's snake_case form)
// ============================================================================

/// Kind of feeding session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedingType {
    Breast,
    Bottle,
    Solid,
}

impl FeedingType {
    pub const ALL: [FeedingType; 3] = [FeedingType::Breast, FeedingType::Bottle, FeedingType::Solid];

    pub fn label(&self) -> &'static str {
        match self {
            FeedingType::Breast => "Breast",
            FeedingType::Bottle => "Bottle",
            FeedingType::Solid => "Solid",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreastSide {
    Left,
    Right,
}

impl BreastSide {
    pub const ALL: [BreastSide; 2] = [BreastSide::Left, BreastSide::Right];

    pub fn label(&self) -> &'static str {
        match self {
            BreastSide::Left => "Left",
            BreastSide::Right => "Right",
        }
    }
}

/// Appetite rating for solid feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Appetite {
    Poor,
    Fair,
    Good,
    Excellent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepType {
    Nap,
    Nighttime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepLocation {
    Crib,
    Bassinet,
    ParentBed,
    Stroller,
    CarSeat,
    Other,
}

impl SleepLocation {
    pub const ALL: [SleepLocation; 6] = [
        SleepLocation::Crib,
        SleepLocation::Bassinet,
        SleepLocation::ParentBed,
        SleepLocation::Stroller,
        SleepLocation::CarSeat,
        SleepLocation::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SleepLocation::Crib => "Crib",
            SleepLocation::Bassinet => "Bassinet",
            SleepLocation::ParentBed => "Parent Bed",
            SleepLocation::Stroller => "Stroller",
            SleepLocation::CarSeat => "Car Seat",
            SleepLocation::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepQuality {
    Restless,
    Fair,
    Good,
    Deep,
}

impl SleepQuality {
    pub const ALL: [SleepQuality; 4] = [
        SleepQuality::Restless,
        SleepQuality::Fair,
        SleepQuality::Good,
        SleepQuality::Deep,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SleepQuality::Restless => "Restless",
            SleepQuality::Fair => "Fair",
            SleepQuality::Good => "Good",
            SleepQuality::Deep => "Deep",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WakeReason {
    Natural,
    Crying,
    Feeding,
    Diaper,
    Noise,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrineVolume {
    None,
    Light,
    Moderate,
    Heavy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoolConsistency {
    Liquid,
    Soft,
    Formed,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoolColor {
    Yellow,
    Brown,
    Green,
    Red,
    Black,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiaperType {
    Disposable,
    Cloth,
    Training,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementContext {
    Home,
    DoctorVisit,
    Hospital,
    Clinic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// The four kinds of activity record a baby can have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Feeding,
    Sleep,
    Diaper,
    Growth,
}

impl RecordKind {
    pub const ALL: [RecordKind; 4] = [
        RecordKind::Feeding,
        RecordKind::Sleep,
        RecordKind::Diaper,
        RecordKind::Growth,
    ];

    /// Path segment of the backend collection for this kind (under `/api/v1/`)
    pub fn resource_path(&self) -> &'static str {
        match self {
            RecordKind::Feeding => "feeding",
            RecordKind::Sleep => "sleep",
            RecordKind::Diaper => "diaper",
            RecordKind::Growth => "growth",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource_path())
    }
}

// ============================================================================
// Baby profile
// ============================================================================

/// Baby profile as returned by the backend. All dates are ISO-8601 strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BabyProfile {
    pub id: String,
    pub name: String,
    /// Date of birth (YYYY-MM-DD)
    pub date_of_birth: String,
    /// Birth weight in kg
    pub birth_weight: Option<f64>,
    /// Birth length in cm
    pub birth_length: Option<f64>,
    pub birth_head_circumference: Option<f64>,
    pub gender: Option<Gender>,
    pub timezone: String,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BabyProfileCreate {
    pub name: String,
    pub date_of_birth: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_head_circumference: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Partial update; only the fields that are set are sent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BabyProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_length: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_head_circumference: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

// ============================================================================
// Feeding sessions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedingSession {
    pub id: String,
    pub baby_id: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub feeding_type: FeedingType,
    pub breast_started: Option<BreastSide>,
    /// Minutes on the left breast
    pub left_breast_duration: Option<u32>,
    /// Minutes on the right breast
    pub right_breast_duration: Option<u32>,
    pub volume_offered_ml: Option<u32>,
    pub volume_consumed_ml: Option<u32>,
    pub formula_type: Option<String>,
    pub food_items: Option<Vec<String>>,
    pub appetite: Option<Appetite>,
    pub notes: Option<String>,
    pub created_at: String,
    pub duration_minutes: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedingSessionCreate {
    pub baby_id: String,
    /// Defaults to "now" on the backend when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    pub feeding_type: FeedingType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breast_started: Option<BreastSide>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_breast_duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_breast_duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_offered_ml: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_consumed_ml: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_items: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appetite: Option<Appetite>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedingSessionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breast_started: Option<BreastSide>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_breast_duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_breast_duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_offered_ml: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_consumed_ml: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_items: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appetite: Option<Appetite>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ============================================================================
// Sleep sessions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepSession {
    pub id: String,
    pub baby_id: String,
    pub sleep_start: String,
    pub sleep_end: Option<String>,
    pub sleep_type: SleepType,
    pub location: SleepLocation,
    pub sleep_quality: SleepQuality,
    /// Free-form environment details (temperature, white noise, ...)
    pub sleep_environment: Option<HashMap<String, serde_json::Value>>,
    pub wake_reason: Option<WakeReason>,
    pub notes: Option<String>,
    pub created_at: String,
    pub duration_minutes: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepSessionCreate {
    pub baby_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_type: Option<SleepType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SleepLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_quality: Option<SleepQuality>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_environment: Option<HashMap<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wake_reason: Option<WakeReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SleepSessionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_type: Option<SleepType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SleepLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_quality: Option<SleepQuality>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_environment: Option<HashMap<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wake_reason: Option<WakeReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ============================================================================
// Diaper events
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaperEvent {
    pub id: String,
    pub baby_id: String,
    pub timestamp: String,
    pub has_urine: bool,
    pub urine_volume: UrineVolume,
    pub has_stool: bool,
    pub stool_consistency: Option<StoolConsistency>,
    pub stool_color: Option<StoolColor>,
    pub diaper_type: DiaperType,
    pub notes: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaperEventCreate {
    pub baby_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_urine: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urine_volume: Option<UrineVolume>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_stool: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stool_consistency: Option<StoolConsistency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stool_color: Option<StoolColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diaper_type: Option<DiaperType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiaperEventUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_urine: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urine_volume: Option<UrineVolume>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_stool: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stool_consistency: Option<StoolConsistency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stool_color: Option<StoolColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diaper_type: Option<DiaperType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ============================================================================
// Growth measurements
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthMeasurement {
    pub id: String,
    pub baby_id: String,
    /// Measurement date (YYYY-MM-DD, or a full timestamp)
    pub measurement_date: String,
    pub weight_kg: Option<f64>,
    pub length_cm: Option<f64>,
    pub head_circumference_cm: Option<f64>,
    pub measurement_context: MeasurementContext,
    pub measured_by: Option<String>,
    pub notes: Option<String>,
    /// Percentiles supplied by the backend when available
    pub percentiles: Option<HashMap<String, serde_json::Value>>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthMeasurementCreate {
    pub baby_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_circumference_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement_context: Option<MeasurementContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measured_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrowthMeasurementUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_circumference_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement_context: Option<MeasurementContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measured_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ============================================================================
// Request / response plumbing
// ============================================================================

/// Query parameters accepted by every record list endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baby_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    /// Maximum number of records to return
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl ActivityListQuery {
    pub fn for_baby(baby_id: &str, limit: Option<u32>) -> Self {
        Self {
            baby_id: Some(baby_id.to_string()),
            skip: None,
            limit,
        }
    }
}

/// Error body returned by the backend. `detail` is either a message or a
/// list of field validation objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub detail: serde_json::Value,
}

impl ApiErrorBody {
    /// Flatten `detail` into a single human-readable message
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.get("msg")
                        .and_then(|m| m.as_str())
                        .map(str::to_string)
                        .unwrap_or_else(|| item.to_string())
                })
                .collect::<Vec<_>>()
                .join("; "),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

// ============================================================================
// Derived views produced by the analytics engine
// ============================================================================

/// One histogram band of an interval summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalBand {
    pub label: String,
    /// Exclusive lower bound in minutes
    pub lower_minutes: f64,
    /// Inclusive upper bound in minutes; `None` for the open-ended last band
    pub upper_minutes: Option<f64>,
    pub count: usize,
    /// Rounded percentage of all valid gaps
    pub percentage: u32,
}

/// Gaps between consecutive events and their summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalStats {
    pub gaps_minutes: Vec<f64>,
    /// `None` means "no data", never zero
    pub mean_minutes: Option<f64>,
    pub bands: Vec<IntervalBand>,
}

impl IntervalStats {
    pub fn has_data(&self) -> bool {
        self.mean_minutes.is_some()
    }

    pub fn mean_hours(&self) -> Option<f64> {
        self.mean_minutes.map(|m| m / 60.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketPeriod {
    Day,
    Week,
}

/// A fixed-width time slot of a windowed series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub label: String,
    /// First day covered by the bucket
    pub start: NaiveDate,
    pub count: usize,
    pub sum: f64,
}

impl Bucket {
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationStrength {
    Strong,
    Moderate,
    Weak,
    InsufficientData,
}

impl CorrelationStrength {
    pub fn label(&self) -> &'static str {
        match self {
            CorrelationStrength::Strong => "strong",
            CorrelationStrength::Moderate => "moderate",
            CorrelationStrength::Weak => "weak",
            CorrelationStrength::InsufficientData => "not enough data",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationSummary {
    /// Pearson r in [-1, 1]; 0 when there is not enough data
    pub coefficient: f64,
    pub strength: CorrelationStrength,
    /// Number of paired days that entered the sample
    pub sample_size: usize,
    /// Total diapers divided by total feeds over the window
    pub diapers_per_feed: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VelocityFlag {
    Accelerated,
    Normal,
    Slow,
}

impl VelocityFlag {
    pub fn label(&self) -> &'static str {
        match self {
            VelocityFlag::Accelerated => "Accelerated",
            VelocityFlag::Normal => "Normal",
            VelocityFlag::Slow => "Slow",
        }
    }
}

/// Rate of change between two consecutive growth measurements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VelocityInterval {
    pub label: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub elapsed_days: f64,
    pub weight_gain_g_per_week: Option<f64>,
    pub length_gain_cm_per_week: Option<f64>,
    /// Only set when both measurements carry a weight
    pub flag: Option<VelocityFlag>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthProjection {
    pub horizon_days: i64,
    pub label: String,
    pub date: NaiveDate,
    pub weight_kg: Option<f64>,
    pub length_cm: Option<f64>,
}

/// One slice of a percentage breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSlice {
    pub label: String,
    pub count: u64,
    pub percentage: u32,
}

// ---- dashboard series ------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyFeedingPoint {
    pub label: String,
    pub date: NaiveDate,
    pub feeds: usize,
    pub total_minutes: f64,
    pub breast: usize,
    pub bottle: usize,
    pub solid: usize,
    pub bottle_volume_ml: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyVolumePoint {
    pub label: String,
    pub start: NaiveDate,
    pub bottles: usize,
    pub average_bottle_ml: Option<f64>,
    pub daily_total_ml: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySleepPoint {
    pub label: String,
    pub date: NaiveDate,
    pub total_minutes: f64,
    pub night_minutes: f64,
    pub nap_minutes: f64,
    pub wake_ups: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySleepPoint {
    pub label: String,
    pub start: NaiveDate,
    pub sessions: usize,
    pub average_duration_minutes: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyNappyPoint {
    pub label: String,
    pub date: NaiveDate,
    pub wet: usize,
    pub dirty: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthPoint {
    pub date: NaiveDate,
    pub weight_kg: Option<f64>,
    pub length_cm: Option<f64>,
    pub head_circumference_cm: Option<f64>,
    pub percentiles: Option<HashMap<String, serde_json::Value>>,
}

// ---- dashboards ------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewInsights {
    pub today_feeds: usize,
    pub today_diapers: usize,
    pub today_sleep_minutes: f64,
    pub average_wake_window_minutes: Option<f64>,
    pub last_weight_kg: Option<f64>,
    pub longest_sleep_minutes: Option<f64>,
    pub weekly_feeding: Vec<DailyFeedingPoint>,
    pub feeding_types: Vec<DistributionSlice>,
    pub feed_diaper_correlation: CorrelationSummary,
    pub growth: Vec<GrowthPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedingInsights {
    pub daily_average_feeds: f64,
    pub average_duration_minutes: Option<f64>,
    pub intervals: IntervalStats,
    pub feeding_types: Vec<DistributionSlice>,
    pub side_preference: Vec<DistributionSlice>,
    pub daily_trend: Vec<DailyFeedingPoint>,
    pub volume_progress: Vec<WeeklyVolumePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepInsights {
    pub daily_trend: Vec<DailySleepPoint>,
    pub average_night_minutes: Option<f64>,
    pub average_wake_ups: f64,
    pub wake_windows: IntervalStats,
    pub locations: Vec<DistributionSlice>,
    pub qualities: Vec<DistributionSlice>,
    pub weekly_sessions: Vec<WeeklySleepPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NappyInsights {
    pub daily_average: f64,
    pub intervals: IntervalStats,
    pub contents: Vec<DistributionSlice>,
    pub daily_trend: Vec<DailyNappyPoint>,
    pub feed_correlation: CorrelationSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthInsights {
    pub series: Vec<GrowthPoint>,
    pub latest_weight_kg: Option<f64>,
    pub latest_length_cm: Option<f64>,
    pub velocity: Vec<VelocityInterval>,
    /// Flag of the most recent interval with a weight change
    pub current_velocity: Option<VelocityFlag>,
    pub projections: Vec<GrowthProjection>,
}

/// Everything the analytics tabs render for one baby
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub baby_id: String,
    pub generated_at: NaiveDateTime,
    pub overview: OverviewInsights,
    pub feeding: FeedingInsights,
    pub sleep: SleepInsights,
    pub nappy: NappyInsights,
    pub growth: GrowthInsights,
}

// ---- activity feed ---------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityFeedEntry {
    pub id: String,
    pub kind: RecordKind,
    pub timestamp: NaiveDateTime,
    pub summary: String,
}

/// Records of one calendar day, newest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityFeedDay {
    pub date: NaiveDate,
    /// "Today", "Yesterday" or e.g. "January 5, 2025"
    pub label: String,
    pub entries: Vec<ActivityFeedEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TodaySummary {
    pub feeds: usize,
    pub diapers: usize,
    pub sleeps: usize,
    pub growth_measurements: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enums_use_backend_wire_names() {
        assert_eq!(serde_json::to_string(&SleepLocation::ParentBed).unwrap(), "\"parent_bed\"");
        assert_eq!(serde_json::to_string(&MeasurementContext::DoctorVisit).unwrap(), "\"doctor_visit\"");
        let context: MeasurementContext = serde_json::from_str("\"clinic\"").unwrap();
        assert_eq!(context, MeasurementContext::Clinic);
        let kind: FeedingType = serde_json::from_str("\"bottle\"").unwrap();
        assert_eq!(kind, FeedingType::Bottle);
    }

    #[test]
    fn test_update_omits_unset_fields() {
        let update = FeedingSessionUpdate {
            notes: Some("sleepy".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "notes": "sleepy" }));
    }

    #[test]
    fn test_list_query_serializes_only_present_params() {
        let query = ActivityListQuery::for_baby("b1", None);
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json, serde_json::json!({ "baby_id": "b1" }));
    }

    #[test]
    fn test_error_body_message_from_string_and_list() {
        let plain = ApiErrorBody { detail: serde_json::json!("Feeding session not found") };
        assert_eq!(plain.message(), "Feeding session not found");

        let validation = ApiErrorBody {
            detail: serde_json::json!([
                { "loc": ["body", "volume_consumed_ml"], "msg": "Volume consumed cannot exceed volume offered" },
                { "loc": ["body", "baby_id"], "msg": "field required" }
            ]),
        };
        assert_eq!(
            validation.message(),
            "Volume consumed cannot exceed volume offered; field required"
        );
    }

    #[test]
    fn test_bucket_mean_is_none_when_empty() {
        let bucket = Bucket {
            label: "Mon".to_string(),
            start: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
            count: 0,
            sum: 0.0,
        };
        assert_eq!(bucket.mean(), None);
    }
}
