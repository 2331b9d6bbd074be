use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::{Display, Error};
use serde_json::json;

/// Failures raised by a [`crate::store::KvStore`] backend.
#[derive(Debug, Display, Error)]
pub enum StoreError {
    #[display("database error: {_0}")]
    Database(#[error(source)] sqlx::Error),

    #[display("store lock poisoned")]
    Poisoned,

    #[display("store unavailable: {_0}")]
    Unavailable(#[error(not(source))] String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                StoreError::Unavailable(e.to_string())
            }
            other => StoreError::Database(other),
        }
    }
}

#[derive(Debug, Display, Error)]
pub enum AppError {
    /// Outside the allowed day / time window.
    #[display("Sorry, currently this service is unavailable")]
    ServiceUnavailable,

    /// Access token mismatch. The message never says why.
    #[display("Invalid submission, please reload the page and try again")]
    Forbidden,

    /// Identifier is not on the allow-list. Callers answer exactly as on success.
    #[display("identifier is not on the allow-list")]
    NotAllowed,

    #[display("{_0}")]
    InvalidInput(#[error(not(source))] String),

    #[display("{_0}")]
    Store(#[error(source)] StoreError),

    #[display("malformed attendance data: {_0}")]
    Serialization(#[error(source)] serde_json::Error),

    #[display("failed to render QR code: {_0}")]
    Render(#[error(not(source))] String),
}

impl AppError {
    /// Text that is safe to put in the `err` query parameter.
    pub fn public_message(&self) -> String {
        match self {
            AppError::ServiceUnavailable | AppError::Forbidden | AppError::InvalidInput(_) => {
                self.to_string()
            }
            _ => "Something went wrong, please try again".to_string(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Store(e)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Serialization(e)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Forbidden | AppError::NotAllowed => StatusCode::FORBIDDEN,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Store(_) | AppError::Serialization(_) | AppError::Render(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.public_message()
        }))
    }
}
