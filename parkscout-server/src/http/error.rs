//! API error type with IntoResponse
//!
//! Every failure a handler can hit comes out of the database layer.
//! Callers get a 400 with the triggering error's message as a
//! plain-text body; the same message is logged server-side. No
//! distinction is made between client-caused and server-caused
//! failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// API error type mapping onto the 400 plain-text contract.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Database(e) => tracing::error!("database error: {e}"),
        }

        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}
