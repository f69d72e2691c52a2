//! # Vonage Messages API Client
//!
//! Sends replies through the Vonage Messages API. The sender identity
//! depends on the channel: a fixed number on WhatsApp, a page id on
//! Messenger.

use super::outgoing_schemas::{OutgoingMessage, VonageMessageResponse};
use crate::{
    config,
    models::recipient::{Channel, MessageContent, Recipient},
    services::MessageDispatcher,
};
use anyhow::{Context, Result};
use async_trait::async_trait;

/// Identities the bot sends from, one per channel
#[derive(Debug, Clone)]
pub struct SenderIdentities {
    pub whatsapp_number: String,
    pub messenger_id: String,
}

impl SenderIdentities {
    /// Sender to use when replying on `channel`
    pub fn for_channel(&self, channel: Channel) -> Recipient {
        match channel {
            Channel::Whatsapp => Recipient::Whatsapp {
                number: self.whatsapp_number.clone(),
            },
            Channel::Messenger => Recipient::Messenger {
                id: self.messenger_id.clone(),
            },
        }
    }
}

/// Vonage API client for sending messages
#[derive(Clone)]
pub struct VonageClient {
    /// HTTP client for making API requests
    client: reqwest::Client,
    /// Messages API send endpoint
    endpoint: String,
    /// Basic auth username
    api_key: String,
    /// Basic auth password
    api_secret: String,
    senders: SenderIdentities,
}

impl VonageClient {
    pub fn new(
        client: reqwest::Client,
        endpoint: String,
        api_key: String,
        api_secret: String,
        senders: SenderIdentities,
    ) -> Self {
        Self {
            client,
            endpoint,
            api_key,
            api_secret,
            senders,
        }
    }

    /// Creates a new Vonage client from [`config::APP_CONFIG`]
    pub fn from_config() -> Result<Self> {
        let app_config = config::APP_CONFIG
            .get()
            .context("failed to get app config")?;

        let client = reqwest::Client::builder()
            .timeout(app_config.http_timeout())
            .build()
            .context("failed to build vonage http client")?;

        Ok(Self::new(
            client,
            app_config.vonage_messages_endpoint.clone(),
            app_config.vonage_api_key.clone(),
            app_config.vonage_api_secret.clone(),
            SenderIdentities {
                whatsapp_number: app_config.whatsapp_sender_number.clone(),
                messenger_id: app_config.messenger_sender_id.clone(),
            },
        ))
    }

    /// Posts a message envelope to the send endpoint
    async fn send_message(&self, message: &OutgoingMessage) -> Result<VonageMessageResponse> {
        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .json(message)
            .send()
            .await
            .context("Failed to send request to Vonage API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());

            anyhow::bail!("Vonage API returned error status {}: {}", status, body);
        }

        response
            .json::<VonageMessageResponse>()
            .await
            .context("Failed to parse Vonage API response")
    }
}

#[async_trait]
impl MessageDispatcher for VonageClient {
    async fn send(&self, to: &Recipient, content: &MessageContent) -> Result<()> {
        let message = OutgoingMessage::new(
            self.senders.for_channel(to.channel()),
            to.clone(),
            content.clone(),
        );

        let response = self.send_message(&message).await?;

        logfire::info!(
            "Message sent: channel={channel} type={kind} uuid={uuid}",
            channel = to.channel().as_str().to_string(),
            kind = content.kind().to_string(),
            uuid = response.message_uuid
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::recipient::LocationContent;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, header, method, path},
    };

    fn senders() -> SenderIdentities {
        SenderIdentities {
            whatsapp_number: "14157386170".into(),
            messenger_id: "107083064136738".into(),
        }
    }

    fn vonage(server: &MockServer) -> VonageClient {
        VonageClient::new(
            reqwest::Client::new(),
            format!("{}/v0.1/messages", server.uri()),
            "key".into(),
            "secret".into(),
            senders(),
        )
    }

    #[test]
    fn test_sender_follows_channel() {
        assert_eq!(
            senders().for_channel(Channel::Whatsapp),
            Recipient::Whatsapp {
                number: "14157386170".into()
            }
        );
        assert_eq!(
            senders().for_channel(Channel::Messenger),
            Recipient::Messenger {
                id: "107083064136738".into()
            }
        );
    }

    #[tokio::test]
    async fn test_send_whatsapp_location() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v0.1/messages"))
            // base64("key:secret")
            .and(header("authorization", "Basic a2V5OnNlY3JldA=="))
            .and(body_json(json!({
                "from": {"type": "whatsapp", "number": "14157386170"},
                "to": {"type": "whatsapp", "number": "447700900000"},
                "message": {"content": {
                    "type": "location",
                    "location": {"lat": 12.93, "long": 77.69, "name": "Sakra Hospital", "address": "Bellandur"}
                }}
            })))
            .respond_with(
                ResponseTemplate::new(202).set_body_json(json!({"message_uuid": "aaaaaaaa-bbbb"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let content = MessageContent::Location {
            location: LocationContent {
                lat: 12.93,
                long: 77.69,
                name: "Sakra Hospital".into(),
                address: "Bellandur".into(),
            },
        };
        let to = Recipient::Whatsapp {
            number: "447700900000".into(),
        };

        assert!(vonage(&server).send(&to, &content).await.is_ok());
    }

    #[tokio::test]
    async fn test_send_messenger_uses_page_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(json!({
                "from": {"type": "messenger", "id": "107083064136738"},
                "to": {"type": "messenger", "id": "3547389432"},
                "message": {"content": {"type": "text", "text": "hello"}}
            })))
            .respond_with(
                ResponseTemplate::new(202).set_body_json(json!({"message_uuid": "cccccccc-dddd"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let to = Recipient::Messenger {
            id: "3547389432".into(),
        };

        assert!(
            vonage(&server)
                .send(&to, &MessageContent::text("hello"))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_send_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid credentials"))
            .mount(&server)
            .await;

        let to = Recipient::Whatsapp {
            number: "447700900000".into(),
        };
        let result = vonage(&server).send(&to, &MessageContent::text("hello")).await;

        let error = result.unwrap_err().to_string();
        assert!(error.contains("401"));
        assert!(error.contains("invalid credentials"));
    }
}
