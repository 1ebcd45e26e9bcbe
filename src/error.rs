use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::dotenv::Error as DotError;
use crate::jsonwebtoken::errors::Error as JsonWebTokenError;
use crate::thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("dotenv error: {0}")]
    DotEnvError(#[from] DotError),

    #[error("jwt error: {0}")]
    JWTError(#[from] JsonWebTokenError),

    #[error("authentication required")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BusinessError(String),
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Unauthorized => StatusCode::UNAUTHORIZED,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::BusinessError(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "success": false,
            "message": self.to_string(),
        }))
    }
}
