//! # Vonage Outgoing Message Schemas
//!
//! Payloads sent to the Vonage Messages API (v0.1).

use crate::models::recipient::{MessageContent, Recipient};
use serde::{Deserialize, Serialize};

/// Message envelope posted to the send endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct OutgoingMessage {
    /// Bot identity on the recipient's channel
    pub from: Recipient,
    /// User the reply goes to
    pub to: Recipient,
    pub message: OutgoingBody,
}

impl OutgoingMessage {
    pub fn new(from: Recipient, to: Recipient, content: MessageContent) -> Self {
        Self {
            from,
            to,
            message: OutgoingBody { content },
        }
    }
}

/// `message` object of the envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct OutgoingBody {
    pub content: MessageContent,
}

/// Response of the send endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct VonageMessageResponse {
    /// Id Vonage assigned to the accepted message
    pub message_uuid: String,
}
