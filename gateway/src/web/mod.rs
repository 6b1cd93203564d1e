//! Web server module for the platform webhook.
//!
//! This module provides a thin web server that:
//! - Validates request signatures against the shared token
//! - Answers the platform verification handshake
//! - Decodes inbound text messages and replies with a news envelope
//! - Serves a health check

pub mod handlers;
pub mod signature;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub use handlers::{health, webhook, AppState, HealthResponse, WebhookParams};
pub use signature::{make_signature, validate_signature};

/// Build the application router.
///
/// Split out of the binary so integration tests can drive the service
/// in-process.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(webhook).post(webhook))
        .route("/status", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
