use serde::{Deserialize, Serialize};

/// Messaging platform a user talks to the bot through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Whatsapp,
    Messenger,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Whatsapp => "whatsapp",
            Channel::Messenger => "messenger",
        }
    }
}

/// One end of a Vonage message, the user on inbound messages and both
/// sender and receiver on outbound ones.
///
/// Serialized as `{"type": "whatsapp", "number": ".."}` or
/// `{"type": "messenger", "id": ".."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Recipient {
    Whatsapp { number: String },
    Messenger { id: String },
}

impl Recipient {
    pub fn channel(&self) -> Channel {
        match self {
            Recipient::Whatsapp { .. } => Channel::Whatsapp,
            Recipient::Messenger { .. } => Channel::Messenger,
        }
    }
}

/// Coordinates sent as a native WhatsApp location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationContent {
    pub lat: f64,
    pub long: f64,
    pub name: String,
    pub address: String,
}

/// Content of an outbound message.
///
/// Serialized the way the Messages API expects it inside
/// `message.content`, e.g. `{"type": "text", "text": "hi"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessageContent {
    Text { text: String },
    Location { location: LocationContent },
}

impl MessageContent {
    pub fn text(text: impl Into<String>) -> Self {
        MessageContent::Text { text: text.into() }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            MessageContent::Text { .. } => "text",
            MessageContent::Location { .. } => "location",
        }
    }
}
