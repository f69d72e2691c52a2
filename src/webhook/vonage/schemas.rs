//! # Vonage Webhook Schemas
//!
//! Payloads Vonage posts to the inbound and status webhooks.

use crate::models::recipient::Recipient;
use serde::{Deserialize, Serialize};

/// Inbound message webhook payload
#[derive(Debug, Deserialize, Serialize)]
pub struct InboundMessage {
    /// Vonage id of the message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_uuid: Option<String>,
    /// User who sent the message
    pub from: Recipient,
    pub message: InboundBody,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl InboundMessage {
    /// Text of the message, empty for non text content (images, audio..)
    pub fn text(&self) -> &str {
        self.message.content.text.as_deref().unwrap_or_default()
    }
}

/// `message` object of an inbound payload
#[derive(Debug, Deserialize, Serialize)]
pub struct InboundBody {
    pub content: InboundContent,
}

/// Content of an inbound message
#[derive(Debug, Deserialize, Serialize)]
pub struct InboundContent {
    /// Content type (text, image, audio, location..)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Text body (if type is "text")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Delivery status webhook payload
#[derive(Debug, Deserialize, Serialize)]
pub struct StatusUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_uuid: Option<String>,
    /// Status (submitted, delivered, read, rejected..)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}
