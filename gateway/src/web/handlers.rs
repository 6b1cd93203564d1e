//! Webhook endpoint handlers.
//!
//! The webhook handler does exactly three things:
//! 1. Validates the request signature
//! 2. Echoes the verification challenge on GET handshakes
//! 3. Decodes the inbound envelope and writes the XML news reply on POST
//!
//! Each request builds its own values and discards them at response time;
//! there is no shared mutable state between requests.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::envelope::{self, Article};
use crate::error::Rejection;
use crate::web::signature::validate_signature;
use crate::Config;

/// Image shown on the reply news card.
const REPLY_PIC_URL: &str =
    "https://raw.githubusercontent.com/jenkins-infra/wechat/master/images/vscode-pipeline-linter/example1.gif";

/// Link opened when the reply news card is tapped.
const REPLY_LINK_URL: &str = "https://mp.weixin.qq.com/s/4pktvfQ3tJZgqY--VgNgZQ";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Webhook
// =============================================================================

/// Webhook query parameters.
///
/// Absent parameters collapse to empty strings so the signature check always
/// runs over the full algorithm; repeated parameters are considered as their
/// concatenated value.
#[derive(Debug, Default)]
pub struct WebhookParams {
    pub timestamp: String,
    pub nonce: String,
    pub signature: String,
    pub echostr: String,
}

impl WebhookParams {
    /// Fold raw query pairs, concatenating repeated parameters in order.
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = WebhookParams::default();
        for (key, value) in pairs {
            match key.as_str() {
                "timestamp" => params.timestamp.push_str(&value),
                "nonce" => params.nonce.push_str(&value),
                "signature" => params.signature.push_str(&value),
                "echostr" => params.echostr.push_str(&value),
                _ => {}
            }
        }
        params
    }
}

/// Main webhook endpoint, serving both GET handshakes and POST deliveries.
pub async fn webhook(
    State(state): State<AppState>,
    method: Method,
    Query(pairs): Query<Vec<(String, String)>>,
    body: Bytes,
) -> Response {
    let params = WebhookParams::from_pairs(pairs);
    if !validate_signature(
        &state.config.wechat_token,
        &params.timestamp,
        &params.nonce,
        &params.signature,
    ) {
        warn!(method = %method, "webhook_not_from_platform");
        return Rejection::AuthenticationFailed.into_response();
    }

    if method != Method::POST {
        // Verification handshake: the challenge is echoed back verbatim,
        // no wrapping, no encoding.
        info!(echostr_length = params.echostr.len(), "webhook_verified");
        return params.echostr.into_response();
    }

    let inbound = match envelope::decode_inbound(&body) {
        Some(msg) => msg,
        None => {
            warn!(body_length = body.len(), "webhook_decode_failed");
            return Rejection::DecodeFailed.into_response();
        }
    };

    info!(
        from = %inbound.from_user_name,
        content = %inbound.content,
        "webhook_text_received"
    );

    // Reply sender is the inbound recipient and vice versa.
    let article = greeting_article(&inbound.from_user_name);
    match envelope::encode_news_reply(&inbound.to_user_name, &inbound.from_user_name, &[article]) {
        Ok(xml) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/xml; charset=utf-8")],
            xml,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "webhook_encode_failed");
            Rejection::EncodeFailed.into_response()
        }
    }
}

/// Build the single news card greeting the inbound sender.
fn greeting_article(from_user: &str) -> Article {
    let greeting = format!("Hello, {}", from_user);
    Article {
        title: greeting.clone(),
        description: greeting,
        pic_url: REPLY_PIC_URL.to_string(),
        url: REPLY_LINK_URL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webhook_params_repeated_keys_concatenate() {
        let params = WebhookParams::from_pairs(vec![
            ("timestamp".to_string(), "123".to_string()),
            ("nonce".to_string(), "ab".to_string()),
            ("nonce".to_string(), "cde".to_string()),
            ("ignored".to_string(), "x".to_string()),
        ]);
        assert_eq!(params.timestamp, "123");
        assert_eq!(params.nonce, "abcde");
        assert_eq!(params.signature, "");
        assert_eq!(params.echostr, "");
    }

    #[test]
    fn test_greeting_article_names_sender() {
        let article = greeting_article("alice");
        assert_eq!(article.title, "Hello, alice");
        assert_eq!(article.description, "Hello, alice");
        assert_eq!(article.pic_url, REPLY_PIC_URL);
        assert_eq!(article.url, REPLY_LINK_URL);
    }
}
