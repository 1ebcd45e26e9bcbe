use chrono::{DateTime, Duration, Local};

use crate::quota;
use crate::serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Today,
    Week,
    Month,
    #[default]
    All,
}

impl TimeRange {
    /// Inclusive created_at bounds for history filtering. `today` is the
    /// local calendar day, the rolling ranges count back from `now`.
    pub fn bounds(&self, now: DateTime<Local>) -> (Option<DateTime<Local>>, Option<DateTime<Local>>) {
        match self {
            TimeRange::Today => {
                let (start, end) = quota::day_bounds(now);
                (Some(start), Some(end - Duration::milliseconds(1)))
            }
            TimeRange::Week => (Some(now - Duration::days(7)), None),
            TimeRange::Month => (Some(now - Duration::days(30)), None),
            TimeRange::All => (None, None),
        }
    }
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryParams {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub time_range: TimeRange,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetractParams {
    pub vote_id: Option<i32>,
    pub submission_id: Option<i32>,
}
