pub mod events;
pub mod grid;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use moncal_core::MoncalError;
use serde::Serialize;

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Convert errors to HTTP responses.
///
/// Core errors keep their meaning on the wire: rejected input is the
/// client's fault (422), a failed store operation is an upstream fault
/// (502), everything else is a plain 500.
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self.0.downcast_ref::<MoncalError>() {
            Some(MoncalError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Some(MoncalError::Persistence(_)) => StatusCode::BAD_GATEWAY,
            Some(MoncalError::MalformedTimestamp(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
