//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unknown environment '{0}', expected 'development' or 'production'")]
    UnknownEnvironment(String),
    #[error("missing setting: {0}")]
    Missing(String),
    #[error("config load: {0}")]
    Load(#[from] figment::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    /// Request body exceeded the configured limit.
    #[error("{0}")]
    PayloadTooLarge(String),
    /// A write referenced a user, game or publisher that does not exist.
    #[error("{0}")]
    Reference(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("internal: {0}")]
    Internal(String),
}

const INTERNAL_MESSAGE: &str = "Internal server error";

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::Reference(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Db(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            AppError::Db(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => StatusCode::BAD_REQUEST,
            AppError::Db(_) | AppError::Internal(_) | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to API clients. Store and configuration details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            AppError::NotFound(m)
            | AppError::Validation(m)
            | AppError::Reference(m)
            | AppError::PayloadTooLarge(m) => m.clone(),
            AppError::Db(sqlx::Error::RowNotFound) => "Not found".to_string(),
            AppError::Db(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => {
                "Referenced row does not exist".to_string()
            }
            AppError::Db(_) | AppError::Internal(_) | AppError::Config(_) => INTERNAL_MESSAGE.to_string(),
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }
        let body = ErrorBody {
            error: self.user_message(),
        };
        (status, Json(body)).into_response()
    }
}
