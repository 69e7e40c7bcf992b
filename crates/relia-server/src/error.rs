//! HTTP mapping of the authentication error taxonomy.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use relia_auth::{AuthError, ErrorKind};
use relia_core::error::ReliaError;
use serde::Serialize;

pub struct ApiError(pub AuthError);

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0.kind() {
            ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Internal detail stays in the logs; the body carries a fixed
        // message only.
        let message = match &self.0 {
            AuthError::Internal(detail) => {
                tracing::error!(error = %detail, "request failed");
                "Internal error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(ErrorBody {
            code: status.as_u16(),
            error: message,
        });

        (status, body).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError(err)
    }
}

impl From<ReliaError> for ApiError {
    fn from(err: ReliaError) -> Self {
        ApiError(AuthError::Internal(err.to_string()))
    }
}
