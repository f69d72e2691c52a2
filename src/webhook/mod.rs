//! Webhook handlers for the messaging provider
//!
//! ## Modules
//!
//! - [`vonage`] - Vonage Messages API webhooks (WhatsApp and Messenger)

pub mod routes;
pub mod vonage;

use crate::services::{ImplDirectoryService, ImplMessageDispatcher};

/// State shared by the webhook handlers
#[derive(Clone)]
pub struct AppState {
    pub directory: ImplDirectoryService,
    pub dispatcher: ImplMessageDispatcher,
    pub signature: vonage::security::SignatureSettings,
}
