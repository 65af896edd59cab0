//! # Domain Module
//!
//! Business logic of the tracker: the parsed record models, the analytics
//! engine that turns a snapshot of records into chart-ready series, and the
//! services the presentation layer calls.
//!
//! ## Module Organization
//!
//! - **models**: babies, the four record kinds and the `ActivityRecord` sum type
//! - **interval_stats**: gaps between events, wake windows and their histogram
//! - **windowed_buckets**: fixed-length daily and weekly series
//! - **correlation**: feeds vs. nappy changes per day
//! - **growth_velocity**: weekly gain rates and short-horizon projections
//! - **distribution**: percentage breakdowns of categories
//! - **insights**: one composer per dashboard tab
//! - **activity_feed**: the merged, day-grouped timeline
//! - **record_service** / **baby_service**: validated writes and reads
//! - **insights_service** / **dashboard_view**: fetch, derive and hold a dashboard
//!
//! ## Rules
//!
//! - The analytics engine is pure: it never performs I/O and never fails
//! - "Not enough data" is `None` or an empty series, never a numeric placeholder
//! - All timestamps are timezone-naive local time

pub mod activity_feed;
pub mod baby_service;
pub mod correlation;
pub mod dashboard_view;
pub mod distribution;
pub mod growth_velocity;
pub mod insights;
pub mod insights_service;
pub mod interval_stats;
pub mod models;
pub mod record_service;
pub mod timestamps;
pub mod windowed_buckets;

pub use baby_service::BabyService;
pub use dashboard_view::DashboardView;
pub use insights_service::InsightsService;
pub use record_service::{describe_error, RecordService};
