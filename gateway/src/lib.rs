//! WeChat webhook gateway.
//!
//! This library provides the modules behind the `wxgate-web` binary:
//! - `config`: environment-variable configuration
//! - `envelope`: XML codec for inbound messages and replies
//! - `web`: axum router, handlers and signature validation
//!
//! ## Architecture
//!
//! ```text
//! Platform → Webhook → validate signature → decode envelope → encode reply
//! ```

pub mod config;
pub mod envelope;
pub mod error;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use envelope::{
    decode_inbound, encode_news_reply, encode_text_reply, Article, InboundTextMessage,
};
pub use web::AppState;
