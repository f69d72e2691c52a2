/// Type prefix of the opaque hospital ids handed out by the directory
pub const HOSPITAL_ID_PREFIX: &str = "Hospital:";

pub const GOOGLE_MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

pub const WEBHOOK_SCOPE: &str = "/webhooks";

/// Signing algorithm accepted on signed webhooks
pub const SIGNED_WEBHOOK_ALG: &str = "HS256";

pub const RESOURCE_INDENT: &str = "    ";
