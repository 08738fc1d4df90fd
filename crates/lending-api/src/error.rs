//! HTTP mapping for lending errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use lending_core::LendingError;

/// Error body returned by every endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// A `LendingError` on its way out as an HTTP response.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub LendingError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            LendingError::NotFound { .. } => StatusCode::NOT_FOUND,
            LendingError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            LendingError::Upstream(_) => StatusCode::BAD_GATEWAY,
            LendingError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        } else {
            tracing::debug!(error = %self.0, %status, "Request rejected");
        }
        (status, Json(ErrorResponse { error: self.0.to_string() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let cases = [
            (LendingError::not_found("Borrower", "X"), StatusCode::NOT_FOUND),
            (LendingError::InvalidArgument("bad".into()), StatusCode::BAD_REQUEST),
            (LendingError::Upstream("down".into()), StatusCode::BAD_GATEWAY),
            (
                LendingError::Serialization("oops".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn response_carries_status() {
        let resp = ApiError::from(LendingError::not_found("Deal", "Nope")).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
