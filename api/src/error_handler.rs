use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use faq_store::{ErrorKind, FaqError};
use thiserror::Error;

use crate::core::http::response_envelope::ApiResponse;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- IO / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Lower layers ---
    #[error(transparent)]
    Faq(#[from] FaqError),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Faq(_) => StatusCode::BAD_GATEWAY,
            AppError::Bind(_) | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::Faq(e) => match e.kind() {
                ErrorKind::Configuration => "NOT_CONFIGURED",
                ErrorKind::Validation => "INVALID_FAQ_DATA",
                ErrorKind::Transient => "UPSTREAM_ERROR",
                ErrorKind::Consistency => "EMBEDDING_COUNT_MISMATCH",
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        ApiResponse::<()>::error(self.error_code(), self.to_string(), Vec::new())
            .into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;
