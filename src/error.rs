use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Error kinds surfaced by the data-access layer, mapped deterministically
/// to an HTTP status by `IntoResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("record not found")]
    NotFound,

    /// A foreign key in the request does not reference an existing row.
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    #[error("database error: {0}")]
    Database(DieselError),

    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<DieselError> for ApiError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => ApiError::NotFound,
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                ApiError::InvalidReference(info.message().to_string())
            }
            other => ApiError::Database(other),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidReference(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) | ApiError::Pool(_) | ApiError::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("request failed: {}", self);
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
