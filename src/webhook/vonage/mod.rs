//! Vonage Messages API integration module
//!
//! ## Submodules
//!
//! - [`client`] - Vonage API client for sending replies
//! - [`outgoing_schemas`] - Payloads sent to the Messages API
//! - [`routes`] - HTTP endpoint handlers for Vonage webhooks
//! - [`schemas`] - Payloads received on the webhooks
//! - [`security`] - JWT verification of signed webhooks

pub mod client;
pub mod outgoing_schemas;
pub mod routes;
pub mod schemas;
pub mod security;

pub use routes::{inbound, signed_inbound, status};
