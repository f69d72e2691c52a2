use crate::consts;
use ntex::web;

/// Configures the Vonage webhook routes.
///
/// These routes are public endpoints, the signed variant authenticates
/// the caller itself.
///
/// # Routes
/// - `POST /webhooks/inbound` - Inbound messages
/// - `POST /webhooks/status` - Message status updates
/// - `POST /webhooks/inbound-message` - Signed inbound messages
pub fn vonage(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope(consts::WEBHOOK_SCOPE).service((
        super::vonage::inbound,
        super::vonage::status,
        super::vonage::signed_inbound,
    )));
}
