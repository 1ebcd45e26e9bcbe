use chrono::{DateTime, Local};
use sqlx::FromRow;

/// A ledger row joined with the current state of its submission.
#[derive(Debug, FromRow)]
pub struct HistoryRow {
    pub id: i32,
    pub submission_id: i32,
    pub created_at: DateTime<Local>,
    pub title: String,
    pub submission_type: String,
    pub content_url: String,
    pub vote_count: i64,
}
