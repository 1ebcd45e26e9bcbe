pub mod quota;
pub mod vote;

use actix_web::{
    cookie::{time::OffsetDateTime, CookieBuilder},
    http::StatusCode,
    HttpResponseBuilder,
};
use sqlx::{query, query_as, PgPool};
use std::ops::Add;

use crate::actix_web::{
    cookie::Cookie,
    web::{Data, Json},
    HttpResponse,
};
use crate::error::Error;
use crate::hex::ToHex;
use crate::middlewares::jwt::{Claim, JWT_SECRET, JWT_TOKEN};
use crate::models::user::User;
use crate::rand::{thread_rng, Rng};
use crate::serde::Deserialize;
use crate::sha2::{Digest, Sha256};
use crate::{chrono, dotenv};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

#[derive(Deserialize)]
pub struct Login {
    pub username: String,
    pub password: String,
}

fn hash_password(pass: &str, slt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(pass);
    hasher.update(slt);
    hasher.finalize().encode_hex()
}

pub async fn login(Json(Login { username, password }): Json<Login>, db: Data<PgPool>) -> Result<HttpResponse, Error> {
    let mut conn = db.acquire().await?;
    if let Some(user) = query_as::<_, User>(r#"SELECT * FROM users WHERE email = $1 OR mobile = $1"#)
        .bind(&username)
        .fetch_optional(&mut conn)
        .await?
    {
        if hash_password(&password, &user.salt) != user.password {
            return Err(Error::BusinessError("invalid username or password".into()));
        }
        let claim = Claim {
            user: user.id.to_string(),
            exp: chrono::Utc::now().add(chrono::Duration::days(30)).timestamp(),
        };
        let secret = dotenv::var(JWT_SECRET)?;
        let token = encode(&Header::new(Algorithm::HS256), &claim, &EncodingKey::from_secret(secret.as_bytes()))?;
        return Ok(HttpResponse::build(StatusCode::OK)
            .cookie(Cookie::new(JWT_TOKEN, token.clone()))
            .json(serde_json::json!({ "token": token })));
    }
    Err(Error::BusinessError("invalid username or password".into()))
}

fn random_salt() -> String {
    let chars = vec![
        '1', '2', '3', '4', '5', '6', '7', '8', '9', '0', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B',
        'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
    ];
    let mut slt = String::new();
    let mut rng = thread_rng();
    for _ in 0..32 {
        let i = rng.gen_range(0..chars.len());
        slt.push(chars[i]);
    }
    slt
}

#[derive(Debug, Clone, Deserialize)]
pub struct Signup {
    nickname: String,
    email: String,
    mobile: String,
    password: String,
}

pub async fn signup(
    Json(Signup {
        nickname,
        email,
        mobile,
        password,
    }): Json<Signup>,
    db: Data<PgPool>,
) -> Result<HttpResponse, Error> {
    let slt = random_salt();
    query("INSERT INTO users (nickname, email, mobile, password, salt) VALUES ($1, $2, $3, $4, $5)")
        .bind(nickname)
        .bind(email)
        .bind(mobile)
        .bind(hash_password(&password, &slt))
        .bind(slt)
        .execute(&mut db.acquire().await?)
        .await?;
    Ok(HttpResponse::build(StatusCode::OK).finish())
}

pub async fn logout() -> HttpResponse {
    HttpResponseBuilder::new(StatusCode::OK)
        .cookie(CookieBuilder::new(JWT_TOKEN, "").expires(OffsetDateTime::now_utc()).finish())
        .finish()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn hash_is_deterministic_and_salted() {
        let a = hash_password("ride-or-die", "salt-one");
        assert_eq!(a, hash_password("ride-or-die", "salt-one"));
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, hash_password("ride-or-die", "salt-two"));
        assert_ne!(a, hash_password("ride-or-dye", "salt-one"));
    }

    #[test]
    fn salt_is_32_alphanumeric_chars() {
        let slt = random_salt();
        assert_eq!(slt.len(), 32);
        assert!(slt.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
