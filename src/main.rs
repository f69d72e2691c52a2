//! # Bedav Bot
//!
//! Chat bot answering hospital bed availability questions on WhatsApp and
//! Messenger. Vonage posts inbound messages to the webhooks, replies are
//! built from the bedav hospital directory and sent back through Vonage.

pub mod api;
pub mod config;
pub mod consts;
pub mod errors;
pub mod metric;
pub mod models;
pub mod services;
pub mod webhook;

use anyhow::Context;
use logfire::config::{MetricsOptions, SendToLogfire};
use ntex::web;
use std::sync::Arc;

#[ntex::main]
async fn main() -> anyhow::Result<()> {
    // Initialize configuration
    config::init_config()?;

    let app_config = config::APP_CONFIG
        .get()
        .context("failed to get app config")?;

    // Initialize logging and metrics
    let mut logfire_config = logfire::configure()
        .install_panic_handler()
        .with_metrics(Some(MetricsOptions::default()))
        .send_to_logfire(SendToLogfire::IfTokenPresent);
    if let Some(token) = &app_config.logfire_token {
        logfire_config = logfire_config.with_token(token);
    }
    let shutdown_handler = logfire_config.finish()?;

    if app_config.is_prod() && app_config.vonage_messages_endpoint.contains("sandbox") {
        logfire::warn!(
            "Production replies go to the Vonage sandbox: {endpoint}",
            endpoint = app_config.vonage_messages_endpoint.clone()
        );
    }

    let app_state = create_app_state(app_config)?;

    logfire::info!(
        "Starting bedav bot on {host}:{port}",
        host = app_config.web_server_host.clone(),
        port = i64::from(app_config.web_server_port)
    );

    run_server(app_config, app_state).await?;

    shutdown_handler.shutdown()?;

    Ok(())
}

/// Creates the directory and Vonage clients shared by all workers
fn create_app_state(app_config: &config::AppConfig) -> anyhow::Result<webhook::AppState> {
    let directory = services::directory::BedavDirectory::from_config()?;
    let dispatcher = webhook::vonage::client::VonageClient::from_config()?;

    Ok(webhook::AppState {
        directory: Arc::new(directory),
        dispatcher: Arc::new(dispatcher),
        signature: webhook::vonage::security::SignatureSettings {
            secret: app_config.vonage_signature_secret.clone(),
            issuer: app_config.vonage_jwt_issuer.clone(),
        },
    })
}

/// Configures and starts the web server
async fn run_server(
    app_config: &config::AppConfig,
    app_state: webhook::AppState,
) -> anyhow::Result<()> {
    let server_addr = (
        app_config.web_server_host.as_str(),
        app_config.web_server_port,
    );

    web::server(move || {
        web::App::new()
            .wrap(web::middleware::Logger::default())
            .state(app_state.clone())
            .configure(webhook::routes::vonage)
    })
    .bind(server_addr)?
    .run()
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
