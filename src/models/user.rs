use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct User {
    pub id: i32,
    pub nickname: String,
    pub email: String,
    pub mobile: String,
    pub password: String,
    pub salt: String,
}

/// Identity subset safe to echo back to the client.
#[derive(Debug, Serialize, FromRow)]
pub struct UserSummary {
    pub id: i32,
    pub nickname: String,
    pub email: String,
}
