use chrono::NaiveDateTime;
use shared::{ActivityFeedDay, TodaySummary};

use super::models::{ActivityRecord, ActivitySnapshot, Timestamped};
use super::timestamps::relative_day_label;

/// Every record in the snapshot, newest first, grouped by calendar day.
///
/// Records stamped at the same instant are ordered by id so the feed is
/// stable across refreshes.
pub fn activity_feed(snapshot: &ActivitySnapshot, now: NaiveDateTime) -> Vec<ActivityFeedDay> {
    let mut records = snapshot.records();
    records.sort_by(|a, b| {
        b.reference_time()
            .cmp(&a.reference_time())
            .then_with(|| a.id().cmp(b.id()))
    });

    let today = now.date();
    let mut days: Vec<ActivityFeedDay> = Vec::new();
    for record in &records {
        let date = record.reference_time().date();
        match days.last_mut() {
            Some(day) if day.date == date => day.entries.push(record.to_feed_entry()),
            _ => days.push(ActivityFeedDay {
                date,
                label: relative_day_label(date, today),
                entries: vec![record.to_feed_entry()],
            }),
        }
    }
    days
}

/// Counts of today's records per kind
pub fn today_summary(snapshot: &ActivitySnapshot, now: NaiveDateTime) -> TodaySummary {
    let today = now.date();
    snapshot
        .records()
        .iter()
        .filter(|record| record.reference_time().date() == today)
        .fold(TodaySummary::default(), |mut summary, record| {
            match record {
                ActivityRecord::Feeding(_) => summary.feeds += 1,
                ActivityRecord::Sleep(_) => summary.sleeps += 1,
                ActivityRecord::Diaper(_) => summary.diapers += 1,
                ActivityRecord::Growth(_) => summary.growth_measurements += 1,
            }
            summary
        })
}
