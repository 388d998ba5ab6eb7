use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CMS request error: {0}")]
    CmsRequestError(#[from] reqwest::Error),

    #[error("CMS query failed ({status}): {message}")]
    CmsQueryError { status: u16, message: String },

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Env error: {0}")]
    EnvError(String),

    #[error("Io error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// JSON body of every failed API response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

pub type ErrorResponse = (StatusCode, Json<ErrorBody>);

pub type ApiResult<T> = Result<Json<T>, ErrorResponse>;

impl AppError {
    pub fn to_response(&self) -> ErrorResponse {
        let (status, message) = match self {
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::JwtError(_) => (
                StatusCode::UNAUTHORIZED,
                "Invalid or expired token".to_string(),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            // Backend and internal failures never leak their details.
            AppError::CmsRequestError(_)
            | AppError::CmsQueryError { .. }
            | AppError::DatabaseError(_)
            | AppError::MigrationError(_)
            | AppError::Serialization(_)
            | AppError::InvalidRecord(_)
            | AppError::EnvError(_)
            | AppError::IoError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                UNEXPECTED_ERROR_MESSAGE.to_string(),
            ),
        };

        (status, Json(ErrorBody::new(message)))
    }

    /// Failure response for read endpoints: client errors keep their message,
    /// everything else becomes a generic "Failed to fetch <what>" 500.
    pub fn to_fetch_response(&self, what: &str) -> ErrorResponse {
        match self {
            AppError::BadRequest(_) | AppError::NotFound(_) | AppError::Unauthorized(_) => {
                self.to_response()
            }
            _ => fetch_failed(what),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }
}

pub fn fetch_failed(what: &str) -> ErrorResponse {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::new(format!("Failed to fetch {what}"))),
    )
}

// Extractor rejections surface as 400s with the usual JSON body.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_response().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_errors_hide_details() {
        let err = AppError::CmsQueryError {
            status: 502,
            message: "upstream exploded at node 7".into(),
        };
        let (status, Json(body)) = err.to_response();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, UNEXPECTED_ERROR_MESSAGE);
    }

    #[test]
    fn client_errors_keep_message() {
        let (status, Json(body)) = AppError::BadRequest("email is required".into()).to_response();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "email is required");
    }

    #[test]
    fn fetch_response_names_the_resource() {
        let (status, Json(body)) = AppError::DatabaseError("pool timed out".into())
            .to_fetch_response("divisions");

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Failed to fetch divisions");
    }
}
