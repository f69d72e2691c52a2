//! Vonage webhook endpoint handlers
//!
//! Vonage redelivers webhooks that are not acknowledged, so the unsigned
//! endpoints always answer 200 and user facing errors travel as chat
//! replies. Message processing runs in a spawned task and never delays the
//! acknowledgement.
//!
//! # Security
//!
//! `/inbound-message` only accepts calls carrying a valid signed JWT, see
//! [`security`](super::security). Rejected calls get a 401 and are not
//! processed.

use super::{schemas, security};
use crate::{api::bot, errors, metric, webhook::AppState};
use ntex::{util::Bytes, web};

/// Processes an inbound message in the background
fn spawn_processing(message: schemas::InboundMessage, app_state: &AppState) {
    let directory = app_state.directory.clone();
    let dispatcher = app_state.dispatcher.clone();

    ntex::rt::spawn(async move {
        if let Err(e) = bot::handle_inbound_text(
            message.text(),
            &message.from,
            directory.as_ref(),
            dispatcher.as_ref(),
        )
        .await
        {
            logfire::error!(
                "Failed to handle inbound message: {error}",
                error = format!("{e:#}")
            );
        }
    });
}

fn parse_inbound(body: &[u8]) -> Option<schemas::InboundMessage> {
    match serde_json::from_slice(body) {
        Ok(message) => Some(message),
        Err(e) => {
            logfire::warn!(
                "Failed to parse inbound payload: {error}",
                error = e.to_string()
            );
            None
        }
    }
}

/// Inbound message webhook (POST)
///
/// # Returns
/// - 200 always, even for payloads that cannot be processed
#[web::post("/inbound")]
pub async fn inbound(
    body: Bytes,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let _span = logfire::span!("vonage_inbound_webhook").entered();

    if let Some(message) = parse_inbound(&body) {
        spawn_processing(message, &app_state);
    }

    Ok(web::HttpResponse::Ok().finish())
}

/// Message status webhook (POST), logged and acknowledged
#[web::post("/status")]
pub async fn status(body: Bytes) -> Result<impl web::Responder, web::Error> {
    match serde_json::from_slice::<schemas::StatusUpdate>(&body) {
        Ok(update) => logfire::info!(
            "Message status: uuid={uuid} status={status}",
            uuid = update.message_uuid.unwrap_or_default(),
            status = update.status.unwrap_or_default()
        ),
        Err(e) => logfire::warn!(
            "Failed to parse status payload: {error}",
            error = e.to_string()
        ),
    }

    Ok(web::HttpResponse::Ok().finish())
}

/// Signed inbound message webhook (POST)
///
/// # Returns
/// - 204 if the token and payload hash are valid, the message is then processed
/// - 401 on any verification failure
#[web::post("/inbound-message")]
pub async fn signed_inbound(
    req: web::HttpRequest,
    query: web::types::Query<Vec<(String, String)>>,
    body: Bytes,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let _span = logfire::span!("vonage_signed_inbound_webhook").entered();

    let authorization = req
        .headers()
        .get("authorization")
        .and_then(|value| value.to_str().ok());

    if let Err(e) =
        security::verify_signed_webhook(authorization, &query, &body, &app_state.signature)
    {
        metric::incr_signature_statds(e.reason());
        logfire::warn!(
            "Signed webhook rejected: {reason}",
            reason = e.to_string()
        );
        return Err(errors::WebhookError::Unauthorized.into());
    }

    metric::incr_signature_statds("accepted");
    logfire::info!("Signed webhook verified");

    if let Some(message) = parse_inbound(&body) {
        spawn_processing(message, &app_state);
    }

    Ok(web::HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::recipient::MessageContent,
        services::{MockDirectoryService, MockMessageDispatcher},
        webhook::{routes, vonage::security::tests as signing},
    };
    use ntex::{
        http,
        time::{Millis, sleep},
        web::test,
    };
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    const BODY: &str = r#"{"from":{"type":"whatsapp","number":"447700900000"},"message":{"content":{"type":"text","text":"hi"}}}"#;

    fn app_state(dispatcher: MockMessageDispatcher) -> AppState {
        AppState {
            directory: Arc::new(MockDirectoryService::new()),
            dispatcher: Arc::new(dispatcher),
            signature: signing::settings(),
        }
    }

    /// Dispatcher counting the help replies it is asked to send
    fn counting_dispatcher() -> (MockMessageDispatcher, Arc<AtomicUsize>) {
        let sent = Arc::new(AtomicUsize::new(0));
        let counter = sent.clone();

        let mut dispatcher = MockMessageDispatcher::new();
        dispatcher.expect_send().returning(move |_, content| {
            assert!(matches!(content, MessageContent::Text { .. }));
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        (dispatcher, sent)
    }

    async fn post(
        state: AppState,
        uri: &str,
        authorization: Option<String>,
        body: &'static str,
    ) -> http::StatusCode {
        let app = test::init_service(
            web::App::new()
                .state(state)
                .configure(routes::vonage),
        )
        .await;

        let mut req = test::TestRequest::post().uri(uri).set_payload(body);
        if let Some(authorization) = authorization {
            req = req.header("authorization", authorization);
        }

        test::call_service(&app, req.to_request()).await.status()
    }

    #[ntex::test]
    async fn test_inbound_is_acknowledged_and_processed() {
        let (dispatcher, sent) = counting_dispatcher();

        let code = post(app_state(dispatcher), "/webhooks/inbound", None, BODY).await;
        sleep(Millis(50)).await;

        assert_eq!(code, http::StatusCode::OK);
        assert_eq!(sent.load(Ordering::SeqCst), 1);
    }

    #[ntex::test]
    async fn test_inbound_malformed_payload_is_still_acknowledged() {
        let (dispatcher, sent) = counting_dispatcher();

        let code = post(app_state(dispatcher), "/webhooks/inbound", None, "{not json").await;
        sleep(Millis(50)).await;

        assert_eq!(code, http::StatusCode::OK);
        assert_eq!(sent.load(Ordering::SeqCst), 0);
    }

    #[ntex::test]
    async fn test_status_is_acknowledged() {
        let code = post(
            app_state(MockMessageDispatcher::new()),
            "/webhooks/status",
            None,
            r#"{"message_uuid":"abc","status":"delivered"}"#,
        )
        .await;

        assert_eq!(code, http::StatusCode::OK);
    }

    #[ntex::test]
    async fn test_signed_inbound_valid_token() {
        let (dispatcher, sent) = counting_dispatcher();
        let authorization = format!("Bearer {}", signing::token_for(BODY));

        let code = post(
            app_state(dispatcher),
            "/webhooks/inbound-message",
            Some(authorization),
            BODY,
        )
        .await;
        sleep(Millis(50)).await;

        assert_eq!(code, http::StatusCode::NO_CONTENT);
        assert_eq!(sent.load(Ordering::SeqCst), 1);
    }

    #[ntex::test]
    async fn test_signed_inbound_with_query_params() {
        let (dispatcher, _) = counting_dispatcher();
        let canonical = format!(r#"{{"channel":"sandbox",{}"#, &BODY[1..]);
        let authorization = format!("Bearer {}", signing::token_for(&canonical));

        let code = post(
            app_state(dispatcher),
            "/webhooks/inbound-message?channel=sandbox",
            Some(authorization),
            BODY,
        )
        .await;

        assert_eq!(code, http::StatusCode::NO_CONTENT);
    }

    #[ntex::test]
    async fn test_signed_inbound_without_token_is_rejected() {
        let (dispatcher, sent) = counting_dispatcher();

        let code = post(app_state(dispatcher), "/webhooks/inbound-message", None, BODY).await;
        sleep(Millis(50)).await;

        assert_eq!(code, http::StatusCode::UNAUTHORIZED);
        assert_eq!(sent.load(Ordering::SeqCst), 0);
    }

    #[ntex::test]
    async fn test_signed_inbound_tampered_body_is_rejected() {
        let (dispatcher, sent) = counting_dispatcher();
        let authorization = format!("Bearer {}", signing::token_for(BODY));
        let tampered = r#"{"from":{"type":"whatsapp","number":"447700900000"},"message":{"content":{"type":"text","text":"help"}}}"#;

        let code = post(
            app_state(dispatcher),
            "/webhooks/inbound-message",
            Some(authorization),
            tampered,
        )
        .await;
        sleep(Millis(50)).await;

        assert_eq!(code, http::StatusCode::UNAUTHORIZED);
        assert_eq!(sent.load(Ordering::SeqCst), 0);
    }

    #[ntex::test]
    async fn test_signed_inbound_forged_signature_is_rejected() {
        let (dispatcher, _) = counting_dispatcher();
        let token = signing::token_for(BODY);
        let forged = format!("{}x", &token[..token.len() - 1]);

        let code = post(
            app_state(dispatcher),
            "/webhooks/inbound-message",
            Some(format!("Bearer {forged}")),
            BODY,
        )
        .await;

        assert_eq!(code, http::StatusCode::UNAUTHORIZED);
    }
}
