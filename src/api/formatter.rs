//! # Response Formatter
//!
//! Renders directory records into the text (or location) replies sent
//! back to users. Listings are numbered with the decoded hospital id so
//! users can send `get directions to <id>` straight from a search result.

use super::messages;
use crate::{
    consts,
    models::{
        hospital::{Hospital, ResourceKind},
        recipient::{Channel, LocationContent, MessageContent},
    },
};

/// Formats a single hospital, `hospital_id` is shown as its `(id)` label
pub fn format_hospital(hospital: &Hospital, hospital_id: Option<u64>) -> String {
    let mut formatted = match hospital_id {
        Some(id) => format!("*({id}) {}*\n", hospital.name),
        None => format!("*{}*\n", hospital.name),
    };

    for kind in ResourceKind::ALL {
        let counts = hospital.resource(kind);
        // a zero total means the hospital does not have this resource at all
        if let (Some(available), Some(percentage)) =
            (counts.available, counts.occupied_percentage())
        {
            formatted.push_str(&format!(
                "{indent}_{label} Available_: {available} ({percentage}% Occupied)\n",
                indent = consts::RESOURCE_INDENT,
                label = kind.label(),
            ));
        }
    }

    if let Some(phone) = &hospital.phone {
        formatted.push_str(&format!("{}_Phone_: {phone}\n", consts::RESOURCE_INDENT));
    }

    if let Some(website) = &hospital.website {
        formatted.push_str(&format!("{}_Website_: {website}\n", consts::RESOURCE_INDENT));
    }

    formatted
}

/// Formats a search result, an empty result becomes the "no matches" reply
pub fn format_hospitals(hospitals: &[Hospital]) -> String {
    if hospitals.is_empty() {
        return messages::NO_MATCHES.to_string();
    }

    hospitals
        .iter()
        .map(|hospital| {
            let hospital_id = match hospital.numeric_id() {
                Ok(id) => Some(id),
                Err(e) => {
                    logfire::warn!(
                        "Listing hospital without id: {error}",
                        error = e.to_string()
                    );
                    None
                }
            };
            format_hospital(hospital, hospital_id)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the directions reply for the channel the user wrote from.
///
/// WhatsApp gets a native location pin, Messenger a map link. Without
/// coordinates both get the name and address only.
pub fn format_directions(hospital: &Hospital, channel: Channel) -> MessageContent {
    let address = hospital.address.clone().unwrap_or_default();

    let Some((lat, long)) = hospital.coordinates() else {
        return MessageContent::text(format!(
            "*{}*\n{address}\nSorry, there is no map location for this hospital.",
            hospital.name
        ));
    };

    match channel {
        Channel::Whatsapp => MessageContent::Location {
            location: LocationContent {
                lat,
                long,
                name: hospital.name.clone(),
                address,
            },
        },
        Channel::Messenger => MessageContent::text(format!(
            "*{name}*\n{address}\n{maps}{lat},{long}",
            name = hospital.name,
            maps = consts::GOOGLE_MAPS_SEARCH_URL,
        )),
    }
}
