//! # API Module
//!
//! Business logic of the hospital bot, independent of the http layer.
//!
//! ## Modules
//!
//! - [`bot`] - Inbound message pipeline, one reply per message
//! - [`cities`] - City alias resolution to directory locality keys
//! - [`formatter`] - Rendering of hospitals into replies
//! - [`intent`] - Classification of message text into intents
//! - [`messages`] - Fixed reply texts

pub mod bot;
pub mod cities;
pub mod formatter;
pub mod intent;
pub mod messages;
