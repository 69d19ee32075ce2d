use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use thiserror::Error;

use crate::routes;

/// The application's error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// A validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Stored session data that fails to deserialize. Fatal to the
    /// session: storage is wiped and the user is sent back to login.
    #[error("Corrupt session data: {0}")]
    CorruptSession(String),

    /// An internal server error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// A `Result` type that uses `AppError` as the error type.
pub type Result<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(ref msg) => {
                tracing::debug!("Validation error: {}", msg);
                (StatusCode::BAD_REQUEST, Html(format!("<p>{}</p>", msg))).into_response()
            }

            AppError::CorruptSession(ref msg) => {
                tracing::warn!("❌ Corrupt session, redirecting to login: {}", msg);
                Redirect::to(routes::LOGIN_PATH).into_response()
            }

            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html("<p>Something went wrong. Please try again later.</p>".to_string()),
                )
                    .into_response()
            }
        }
    }
}
