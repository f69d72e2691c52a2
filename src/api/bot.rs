//! # Inbound message pipeline
//!
//! Classifies an inbound message, runs the matching handler against the
//! directory and sends exactly one reply through the user's channel.
//! Every outcome, failures included, produces a reply the user can read.

use super::{cities, formatter, intent, intent::Intent, messages};
use crate::{
    errors::DirectoryError,
    metric,
    models::recipient::{Channel, MessageContent, Recipient},
    services::{DirectoryService, MessageDispatcher},
};

/// Handles the text of one inbound message from `from`.
///
/// Send failures are returned so the caller can log them, nothing is
/// retried.
pub async fn handle_inbound_text(
    text: &str,
    from: &Recipient,
    directory: &dyn DirectoryService,
    dispatcher: &dyn MessageDispatcher,
) -> anyhow::Result<()> {
    let intent = intent::classify(text);
    metric::incr_intent_statds(intent.name());

    logfire::info!(
        "Inbound message: channel={channel} intent={intent}",
        channel = from.channel().as_str().to_string(),
        intent = intent.name().to_string()
    );

    let reply = reply_for(&intent, from.channel(), directory).await;

    match dispatcher.send(from, &reply).await {
        Ok(()) => {
            metric::incr_dispatch_statds("sent");
            Ok(())
        }
        Err(e) => {
            metric::incr_dispatch_statds("failed");
            Err(e.context(format!("failed to send {} reply", intent.name())))
        }
    }
}

/// Builds the reply for a classified message
pub async fn reply_for(
    intent: &Intent,
    channel: Channel,
    directory: &dyn DirectoryService,
) -> MessageContent {
    match intent {
        Intent::Search { query, city } => {
            MessageContent::text(search(query, city.as_deref(), directory).await)
        }
        Intent::Directions { hospital_id } => directions(*hospital_id, channel, directory).await,
        Intent::Help => MessageContent::text(messages::HELP),
        Intent::Cities => MessageContent::text(messages::CITIES.as_str()),
        Intent::Unrecognized => MessageContent::text(messages::UNRECOGNIZED),
    }
}

async fn search(query: &str, city: Option<&str>, directory: &dyn DirectoryService) -> String {
    let Some(city) = city else {
        return messages::MISSING_CITY.to_string();
    };

    let Some(locality_key) = cities::resolve_locality(city) else {
        logfire::info!("Unknown city requested: {city}", city = city.to_string());
        return messages::unknown_city(city);
    };

    match directory.search_hospitals(locality_key, query).await {
        Ok(hospitals) => formatter::format_hospitals(&hospitals),
        Err(e) => upstream_failure(&e),
    }
}

async fn directions(
    hospital_id: Option<u64>,
    channel: Channel,
    directory: &dyn DirectoryService,
) -> MessageContent {
    let Some(hospital_id) = hospital_id else {
        return MessageContent::text(messages::INVALID_HOSPITAL_ID);
    };

    match directory.get_hospital(hospital_id).await {
        Ok(Some(hospital)) => formatter::format_directions(&hospital, channel),
        Ok(None) => MessageContent::text(messages::UNKNOWN_HOSPITAL),
        Err(e) => MessageContent::text(upstream_failure(&e)),
    }
}

fn upstream_failure(error: &DirectoryError) -> String {
    metric::incr_directory_error_statds(error.kind());
    logfire::error!("Directory query failed: {error}", error = error.to_string());

    messages::UPSTREAM_ERROR.to_string()
}
