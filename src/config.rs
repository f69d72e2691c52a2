//! Application configuration loaded from the environment.
//!
//! # Security Notes
//! - Sensitive fields are marked and must never be logged
//! - Production deployments should inject them from a secret manager

use anyhow::{Context, anyhow};
use envconfig::Envconfig;
use std::{sync::OnceLock, time::Duration};

/// Environment variables used to configure the bot.
#[derive(Envconfig, Clone)]
pub struct AppConfig {
    /// Environment name to deploy the app (NON-SENSITIVE)
    /// Values: "local", "dev", "prod"
    #[envconfig(default = "local")]
    pub env: String,

    /// Host address for web server binding (NON-SENSITIVE)
    #[envconfig(default = "0.0.0.0")]
    pub web_server_host: String,

    /// Port for web server binding (NON-SENSITIVE)
    #[envconfig(default = "3000")]
    pub web_server_port: u16,

    /// Vonage API key, username of the send API basic auth (SEMI-SENSITIVE)
    pub vonage_api_key: String,

    /// 🔒 SENSITIVE: Vonage API secret, password of the send API basic auth
    pub vonage_api_secret: String,

    /// 🔒 SENSITIVE: secret used by Vonage to sign webhook JWTs (HS256)
    pub vonage_signature_secret: String,

    /// Expected `iss` claim of signed webhooks (NON-SENSITIVE)
    #[envconfig(default = "Vonage")]
    pub vonage_jwt_issuer: String,

    /// Vonage Messages API endpoint (NON-SENSITIVE)
    #[envconfig(default = "https://messages-sandbox.nexmo.com/v0.1/messages")]
    pub vonage_messages_endpoint: String,

    /// WhatsApp number the bot sends from (NON-SENSITIVE)
    #[envconfig(default = "14157386170")]
    pub whatsapp_sender_number: String,

    /// Messenger page id the bot sends from (NON-SENSITIVE)
    pub messenger_sender_id: String,

    /// GraphQL endpoint of the hospital directory (NON-SENSITIVE)
    #[envconfig(default = "https://bedav.org/graphql")]
    pub directory_endpoint: String,

    /// Max number of hospitals returned by a search
    #[envconfig(default = "10")]
    pub search_result_limit: u32,

    /// Timeout applied to every outbound http request, in seconds
    #[envconfig(default = "10")]
    pub http_timeout_secs: u64,

    /// 🔒 SENSITIVE: logfire write token, telemetry stays local without it
    pub logfire_token: Option<String>,
}

impl AppConfig {
    /// Checks if running in production environment
    pub fn is_prod(&self) -> bool {
        self.env.to_lowercase() == "prod"
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

/// Global application configuration, set once by [`init_config`]
pub static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Reads the environment and stores the resulting [`AppConfig`].
pub fn init_config() -> anyhow::Result<()> {
    let app_config = AppConfig::init_from_env()
        .context("failed to load configuration, check the environment variables")?;

    APP_CONFIG
        .set(app_config)
        .map_err(|_| anyhow!("app config was already initialized"))
}
