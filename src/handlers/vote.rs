use actix_web::web::{Data, Json, Query};
use chrono::{DateTime, Local};
use sqlx::{query, query_as, query_scalar, PgPool};

use crate::config::Config;
use crate::context::UserInfo;
use crate::error::Error;
use crate::models::vote::HistoryRow;
use crate::quota;
use crate::request::{HistoryParams, RetractParams};
use crate::response::{List, Pagination};
use crate::serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastRequest {
    pub submission_id: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationResponse {
    success: bool,
    message: String,
    submission_id: i32,
    new_vote_count: i64,
}

/// Cast a vote. The quota check, the counter increment and the ledger insert
/// share one transaction, so a rejected insert rolls the increment back.
pub async fn cast(
    user_info: UserInfo,
    Json(CastRequest { submission_id }): Json<CastRequest>,
    db: Data<PgPool>,
    config: Data<Config>,
) -> Result<Json<MutationResponse>, Error> {
    let now = Local::now();
    let (day_start, day_end) = quota::day_bounds(now);
    let mut tx = db.begin().await?;
    // same-user casts queue on the user row, so two transactions cannot
    // both pass the quota check
    query("SELECT id FROM users WHERE id = $1 FOR UPDATE")
        .bind(user_info.id)
        .execute(&mut tx)
        .await?;
    let used: i64 = query_scalar(
        "
        SELECT COUNT(*)
        FROM votes
        WHERE user_id = $1
        AND created_at >= $2
        AND created_at < $3",
    )
    .bind(user_info.id)
    .bind(day_start)
    .bind(day_end)
    .fetch_one(&mut tx)
    .await?;
    if used >= config.daily_vote_limit {
        return Err(Error::BusinessError("daily vote limit reached".into()));
    }
    let new_vote_count: i64 = query_scalar(
        "
        UPDATE submissions
        SET vote_count = vote_count + 1
        WHERE id = $1
        RETURNING vote_count",
    )
    .bind(submission_id)
    .fetch_optional(&mut tx)
    .await?
    .ok_or_else(|| Error::NotFound("submission not found".into()))?;
    let inserted = query(
        "
        INSERT INTO votes (user_id, submission_id)
        VALUES ($1, $2)
        ON CONFLICT (user_id, submission_id) DO NOTHING",
    )
    .bind(user_info.id)
    .bind(submission_id)
    .execute(&mut tx)
    .await?;
    if inserted.rows_affected() == 0 {
        return Err(Error::BusinessError("already voted for this submission".into()));
    }
    tx.commit().await?;
    Ok(Json(MutationResponse {
        success: true,
        message: "vote recorded".into(),
        submission_id,
        new_vote_count,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionBrief {
    id: i32,
    title: String,
    #[serde(rename = "type")]
    submission_type: String,
    content_url: String,
    vote_count: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    id: i32,
    submission_id: i32,
    created_at: DateTime<Local>,
    submission: SubmissionBrief,
}

impl From<HistoryRow> for HistoryItem {
    fn from(row: HistoryRow) -> Self {
        HistoryItem {
            id: row.id,
            submission_id: row.submission_id,
            created_at: row.created_at,
            submission: SubmissionBrief {
                id: row.submission_id,
                title: row.title,
                submission_type: row.submission_type,
                content_url: row.content_url,
                vote_count: row.vote_count,
            },
        }
    }
}

pub async fn history(user_info: UserInfo, Query(params): Query<HistoryParams>, db: Data<PgPool>) -> Result<Json<List<HistoryItem>>, Error> {
    let page = params.page.max(1);
    let limit = params.limit.max(1);
    let (since, until) = params.time_range.bounds(Local::now());
    let mut conn = db.acquire().await?;
    let user: Option<(i32,)> = query_as("SELECT id FROM users WHERE id = $1").bind(user_info.id).fetch_optional(&mut conn).await?;
    if user.is_none() {
        return Err(Error::NotFound("user not found".into()));
    }
    let total: i64 = query_scalar(
        "
        SELECT COUNT(*)
        FROM votes
        WHERE user_id = $1
        AND ($2 IS NULL OR created_at >= $2)
        AND ($3 IS NULL OR created_at <= $3)",
    )
    .bind(user_info.id)
    .bind(since)
    .bind(until)
    .fetch_one(&mut conn)
    .await?;
    let rows: Vec<HistoryRow> = query_as(
        "
        SELECT v.id, v.submission_id, v.created_at, s.title, s.submission_type, s.content_url, s.vote_count
        FROM votes AS v
        JOIN submissions AS s ON v.submission_id = s.id
        WHERE v.user_id = $1
        AND ($2 IS NULL OR v.created_at >= $2)
        AND ($3 IS NULL OR v.created_at <= $3)
        ORDER BY v.created_at DESC
        LIMIT $4
        OFFSET $5",
    )
    .bind(user_info.id)
    .bind(since)
    .bind(until)
    .bind(limit)
    .bind((page - 1) * limit)
    .fetch_all(&mut conn)
    .await?;
    let list = rows.into_iter().map(HistoryItem::from).collect();
    Ok(Json(List::new(list, Pagination::new(total, page, limit))))
}

/// Retract a vote by its id or by the target submission's id. The delete is
/// filtered by the caller's user id, so a vote owned by someone else answers
/// the same not-found as a vote that never existed.
pub async fn retract(user_info: UserInfo, Query(params): Query<RetractParams>, db: Data<PgPool>) -> Result<Json<MutationResponse>, Error> {
    let mut tx = db.begin().await?;
    let deleted: Option<i32> = match (params.vote_id, params.submission_id) {
        (Some(vote_id), _) => {
            query_scalar("DELETE FROM votes WHERE id = $1 AND user_id = $2 RETURNING submission_id")
                .bind(vote_id)
                .bind(user_info.id)
                .fetch_optional(&mut tx)
                .await?
        }
        (None, Some(submission_id)) => {
            query_scalar("DELETE FROM votes WHERE submission_id = $1 AND user_id = $2 RETURNING submission_id")
                .bind(submission_id)
                .bind(user_info.id)
                .fetch_optional(&mut tx)
                .await?
        }
        (None, None) => return Err(Error::BusinessError("voteId or submissionId is required".into())),
    };
    let submission_id = deleted.ok_or_else(|| Error::NotFound("vote not found".into()))?;
    let new_vote_count: i64 = query_scalar(
        "
        UPDATE submissions
        SET vote_count = vote_count - 1
        WHERE id = $1
        RETURNING vote_count",
    )
    .bind(submission_id)
    .fetch_one(&mut tx)
    .await?;
    tx.commit().await?;
    Ok(Json(MutationResponse {
        success: true,
        message: "vote retracted".into(),
        submission_id,
        new_vote_count,
    }))
}
