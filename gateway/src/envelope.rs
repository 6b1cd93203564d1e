//! XML envelope codec for the platform message exchange.
//!
//! Inbound POST bodies carry an `<xml>` envelope with a text message; replies
//! use the same envelope shape with either a plain text body or a news card
//! list. Element names are the platform's, case-sensitive. Every value here
//! lives for a single request/response cycle and is never persisted.

use std::time::{SystemTime, UNIX_EPOCH};

use quick_xml::se::{SeError, Serializer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to serialize a reply envelope.
///
/// Practically unreachable for the fixed reply shapes; surfaced so the
/// handler can log it and answer with an internal error.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("xml serialization failed: {0}")]
    Xml(#[from] SeError),
}

// =============================================================================
// Envelope Types
// =============================================================================

/// Inbound text message envelope.
///
/// Elements absent from the body default to zero values, matching the
/// platform's sparse payloads.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InboundTextMessage {
    #[serde(default, rename = "ToUserName")]
    pub to_user_name: String,
    #[serde(default, rename = "FromUserName")]
    pub from_user_name: String,
    /// Epoch seconds at which the platform created the message
    #[serde(default, rename = "CreateTime")]
    pub create_time: i64,
    /// Message type tag; `"text"` for the messages handled here
    #[serde(default, rename = "MsgType")]
    pub msg_type: String,
    #[serde(default, rename = "Content")]
    pub content: String,
    #[serde(default, rename = "MsgId")]
    pub msg_id: i64,
}

/// Outbound plain-text reply envelope.
#[derive(Debug, Serialize)]
pub struct OutboundTextReply {
    #[serde(rename = "ToUserName")]
    pub to_user_name: String,
    #[serde(rename = "FromUserName")]
    pub from_user_name: String,
    #[serde(rename = "CreateTime")]
    pub create_time: i64,
    #[serde(rename = "MsgType")]
    pub msg_type: &'static str,
    #[serde(rename = "Content")]
    pub content: String,
}

/// Outbound news reply envelope carrying an ordered article list.
#[derive(Debug, Serialize)]
pub struct OutboundNewsReply {
    #[serde(rename = "ToUserName")]
    pub to_user_name: String,
    #[serde(rename = "FromUserName")]
    pub from_user_name: String,
    #[serde(rename = "CreateTime")]
    pub create_time: i64,
    #[serde(rename = "MsgType")]
    pub msg_type: &'static str,
    /// Always equals the length of the article list
    #[serde(rename = "ArticleCount")]
    pub article_count: usize,
    #[serde(rename = "Articles")]
    pub articles: ArticleList,
}

/// Wrapper producing the `<Articles><item>...</item></Articles>` shape.
#[derive(Debug, Serialize)]
pub struct ArticleList {
    #[serde(rename = "item")]
    pub item: Vec<Article>,
}

/// One news card. All fields are opaque strings; no validation is performed.
#[derive(Debug, Clone, Serialize)]
pub struct Article {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "PicUrl")]
    pub pic_url: String,
    #[serde(rename = "Url")]
    pub url: String,
}

// =============================================================================
// Codec Operations
// =============================================================================

/// Decode an inbound request body as a text message envelope.
///
/// Malformed or non-XML input yields `None`; a bad body is a per-request
/// failure and must never escape the decode boundary.
pub fn decode_inbound(raw: &[u8]) -> Option<InboundTextMessage> {
    let text = std::str::from_utf8(raw).ok()?;
    quick_xml::de::from_str(text).ok()
}

/// Encode a plain-text reply.
///
/// `from_user` is the reply sender (the inbound recipient) and `to_user`
/// the reply recipient (the inbound sender).
pub fn encode_text_reply(
    from_user: &str,
    to_user: &str,
    content: &str,
) -> Result<String, EncodeError> {
    let reply = OutboundTextReply {
        to_user_name: to_user.to_string(),
        from_user_name: from_user.to_string(),
        create_time: epoch_seconds(),
        msg_type: "text",
        content: content.to_string(),
    };
    to_indented_xml(&reply)
}

/// Encode a news reply with the given article list.
///
/// `ArticleCount` is always set to the number of articles passed.
pub fn encode_news_reply(
    from_user: &str,
    to_user: &str,
    articles: &[Article],
) -> Result<String, EncodeError> {
    let reply = OutboundNewsReply {
        to_user_name: to_user.to_string(),
        from_user_name: from_user.to_string(),
        create_time: epoch_seconds(),
        msg_type: "news",
        article_count: articles.len(),
        articles: ArticleList {
            item: articles.to_vec(),
        },
    };
    to_indented_xml(&reply)
}

/// Current wall-clock time in whole seconds since the Unix epoch.
fn epoch_seconds() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// Serialize a reply under the `<xml>` root with two-space indentation.
fn to_indented_xml<T: Serialize>(value: &T) -> Result<String, EncodeError> {
    let mut buf = String::new();
    let mut ser = Serializer::with_root(&mut buf, Some("xml"))?;
    ser.indent(' ', 2);
    value.serialize(ser)?;
    Ok(buf)
}
