use chrono::NaiveDate;
use serde::Serialize;

use super::{names, AnalyticsEvent};

/// Headline counts shown above the recent-events list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EventSummary {
    pub total: usize,
    pub seeds_created: usize,
    pub reports_downloaded: usize,
    pub tours_completed: usize,
}

impl EventSummary {
    pub fn from_events(events: &[AnalyticsEvent]) -> Self {
        let count = |name: &str| events.iter().filter(|e| e.name == name).count();
        Self {
            total: events.len(),
            seeds_created: count(names::SEED_CREATED),
            reports_downloaded: count(names::REPORT_DOWNLOADED),
            tours_completed: count(names::TOUR_COMPLETED),
        }
    }
}

/// Pretty-printed JSON array, as offered by the viewer's export button.
pub fn export_json(events: &[AnalyticsEvent]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(events)
}

pub fn export_file_name(date: NaiveDate) -> String {
    format!("analytics-events-{}.json", date.format("%Y-%m-%d"))
}

/// Last eight characters of a user id, enough to tell installations apart.
pub fn short_user_id(user_id: &str) -> &str {
    let start = user_id
        .char_indices()
        .rev()
        .nth(7)
        .map(|(idx, _)| idx)
        .unwrap_or(0);
    &user_id[start..]
}
