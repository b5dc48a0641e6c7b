pub mod events;

use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use calfeed_core::CalFeedError;
use serde::Serialize;

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Errors turned into JSON responses, with a status derived from the cause
pub struct AppError {
    status: StatusCode,
    error: anyhow::Error,
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        AppError {
            status: StatusCode::NOT_FOUND,
            error: anyhow::anyhow!(message.into()),
        }
    }
}

/// Feed outages are the upstream's fault and worth retrying; bad query
/// values are the client's.
fn status_for(error: &anyhow::Error) -> StatusCode {
    if let Some(rejection) = error.downcast_ref::<QueryRejection>() {
        return rejection.status();
    }

    match error.downcast_ref::<CalFeedError>() {
        Some(e) if e.is_feed_unavailable() => StatusCode::BAD_GATEWAY,
        Some(CalFeedError::InvalidMonth(_) | CalFeedError::InvalidDate(_)) => {
            StatusCode::BAD_REQUEST
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = %self.error, "Request failed");
        }

        let body = Json(ErrorResponse {
            error: self.error.to_string(),
        });
        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let error = err.into();
        AppError {
            status: status_for(&error),
            error,
        }
    }
}
