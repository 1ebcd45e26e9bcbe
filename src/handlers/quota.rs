use actix_web::{web::Data, HttpResponse};
use chrono::Local;
use sqlx::{query_as, query_scalar, PgPool};

use crate::config::Config;
use crate::context::UserInfo;
use crate::error::Error;
use crate::models::user::UserSummary;
use crate::quota;
use crate::serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaStatus {
    daily_limit: i64,
    votes_used: i64,
    remaining_votes: i64,
    can_vote: bool,
    time_until_reset: i64,
    reset_time: String,
    is_guest: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<UserSummary>,
}

impl QuotaStatus {
    /// Zero-quota payload shared by the guest path and the fail-closed
    /// degradation path: never reports a vote as available.
    fn zeroed(daily_limit: i64, is_guest: bool) -> Self {
        let now = Local::now();
        let (_, reset) = quota::day_bounds(now);
        QuotaStatus {
            daily_limit,
            votes_used: 0,
            remaining_votes: 0,
            can_vote: false,
            time_until_reset: quota::millis_until_reset(now),
            reset_time: reset.to_rfc3339(),
            is_guest,
            user: None,
        }
    }
}

pub async fn status(user: Option<UserInfo>, db: Data<PgPool>, config: Data<Config>) -> HttpResponse {
    let limit = config.daily_vote_limit;
    let user = match user {
        Some(user) => user,
        None => return HttpResponse::Ok().json(QuotaStatus::zeroed(limit, true)),
    };
    match lookup(user.id, limit, &db).await {
        Ok(status) => HttpResponse::Ok().json(status),
        Err(e) => {
            log::error!("vote quota lookup failed for user {}: {}", user.id, e);
            HttpResponse::InternalServerError().json(QuotaStatus::zeroed(limit, false))
        }
    }
}

async fn lookup(user_id: i32, limit: i64, db: &PgPool) -> Result<QuotaStatus, Error> {
    let now = Local::now();
    let (day_start, day_end) = quota::day_bounds(now);
    let mut conn = db.acquire().await?;
    let used: i64 = query_scalar(
        "
        SELECT COUNT(*)
        FROM votes
        WHERE user_id = $1
        AND created_at >= $2
        AND created_at < $3",
    )
    .bind(user_id)
    .bind(day_start)
    .bind(day_end)
    .fetch_one(&mut conn)
    .await?;
    let user = query_as::<_, UserSummary>("SELECT id, nickname, email FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(&mut conn)
        .await?;
    let remaining = quota::remaining(limit, used);
    Ok(QuotaStatus {
        daily_limit: limit,
        votes_used: used,
        remaining_votes: remaining,
        can_vote: remaining > 0,
        time_until_reset: quota::millis_until_reset(now),
        reset_time: day_end.to_rfc3339(),
        is_guest: false,
        user,
    })
}
