//! Request-boundary error taxonomy.
//!
//! Every failure is handled at the request boundary and mapped to an explicit
//! HTTP status; nothing here may take down the listener.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Reasons a webhook request is rejected.
#[derive(Debug, Error)]
pub enum Rejection {
    /// The supplied signature does not match the recomputed one.
    #[error("request signature does not match")]
    AuthenticationFailed,

    /// The inbound body could not be decoded as a message envelope.
    #[error("inbound envelope could not be decoded")]
    DecodeFailed,

    /// The reply envelope could not be serialized.
    #[error("reply envelope could not be encoded")]
    EncodeFailed,
}

/// Rejection response body.
#[derive(Serialize)]
pub struct RejectionBody {
    pub status: &'static str,
}

impl Rejection {
    fn status_code(&self) -> StatusCode {
        match self {
            Rejection::AuthenticationFailed => StatusCode::FORBIDDEN,
            Rejection::DecodeFailed => StatusCode::BAD_REQUEST,
            Rejection::EncodeFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Rejection::AuthenticationFailed => "forbidden",
            Rejection::DecodeFailed => "bad_request",
            Rejection::EncodeFailed => "error",
        }
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        (self.status_code(), Json(RejectionBody { status: self.label() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_status_codes() {
        assert_eq!(
            Rejection::AuthenticationFailed.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(Rejection::DecodeFailed.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            Rejection::EncodeFailed.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
