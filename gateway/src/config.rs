//! Configuration module for environment variable parsing.
//!
//! All configuration is read once at process start and is read-only
//! thereafter. The shared token is deliberately not a compiled-in constant.

use std::env;
use tracing::warn;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared token used to authenticate platform requests
    pub wechat_token: String,

    /// Port for the web server to listen on
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let wechat_token = env::var("WECHAT_TOKEN").unwrap_or_default();
        if wechat_token.is_empty() {
            warn!("WECHAT_TOKEN is not set; signatures will be checked against an empty token");
        }

        Config {
            wechat_token,

            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(18080),
        }
    }
}
