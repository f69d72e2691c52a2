//! Signature verification for signed Vonage webhooks
//!
//! Vonage signs webhook calls with a JWT (HS256) sent as a bearer token.
//! The token carries a `payload_hash` claim: the SHA-256 of the request
//! payload, so a valid token cannot be replayed with a different body.
//!
//! To verify authenticity:
//! 1. Extract the bearer token from the `Authorization` header
//! 2. Check the JWT header algorithm and HMAC-SHA256 signature with the signature secret
//! 3. Check the `iss` claim (and `exp`/`nbf` when present)
//! 4. Rebuild the payload (query params then body fields) exactly as Vonage
//!    serialized it and compare its SHA-256 with `payload_hash`
//!
//! # Important Notes
//!
//! - The payload is re-serialized as compact JSON keeping key order, which is
//!   how the provider produced the hash; any other serialization breaks every
//!   valid request
//! - Comparisons are constant-time

use crate::{consts, errors::SignatureError};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Map, Number, Value};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Largest float that still maps to an exact integer (2^53)
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Secret and issuer signed webhooks are checked against
#[derive(Debug, Clone)]
pub struct SignatureSettings {
    pub secret: String,
    pub issuer: String,
}

/// JOSE header of the token
#[derive(Debug, Deserialize)]
struct TokenHeader {
    alg: String,
}

/// Claims Vonage puts in a webhook token
#[derive(Debug, Deserialize)]
pub struct WebhookClaims {
    pub iss: String,
    pub payload_hash: String,
    pub iat: Option<i64>,
    pub exp: Option<i64>,
    pub nbf: Option<i64>,
    pub jti: Option<String>,
    pub api_key: Option<String>,
    pub application_id: Option<String>,
}

/// Extracts the token of an `Authorization: Bearer <token>` header
pub fn bearer_token(authorization: Option<&str>) -> Option<&str> {
    let (scheme, token) = authorization?.trim().split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Rebuilds the signed payload: query params first, then body fields.
///
/// Body fields override query params of the same name but keep the query
/// param's position.
pub fn canonical_payload(query: &[(String, String)], body: &[u8]) -> Result<String, SignatureError> {
    let mut payload = Map::new();

    for (key, value) in query {
        payload.insert(key.clone(), Value::String(value.clone()));
    }

    if !body.iter().all(u8::is_ascii_whitespace) {
        let body: Value = serde_json::from_slice(body)
            .map_err(|e| SignatureError::MalformedPayload(e.to_string()))?;

        let Value::Object(fields) = body else {
            return Err(SignatureError::MalformedPayload(
                "body is not an object".to_string(),
            ));
        };

        for (key, value) in fields {
            payload.insert(key, value);
        }
    }

    let mut payload = Value::Object(payload);
    integral_floats_as_integers(&mut payload);

    serde_json::to_string(&payload)
        .map_err(|e| SignatureError::MalformedPayload(e.to_string()))
}

/// Prints whole floats without a fraction (`51.0` as `51`, `1e2` as `100`),
/// as the provider's JSON serializer does.
fn integral_floats_as_integers(value: &mut Value) {
    match value {
        Value::Number(number) if number.is_f64() => {
            let Some(float) = number.as_f64() else {
                return;
            };
            if float.is_finite() && float.fract() == 0.0 && float.abs() <= MAX_EXACT_INTEGER {
                *number = Number::from(float as i64);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(integral_floats_as_integers),
        Value::Object(fields) => fields.values_mut().for_each(integral_floats_as_integers),
        _ => {}
    }
}

/// Lowercase hex SHA-256 of the canonical payload
pub fn payload_hash(canonical_payload: &str) -> String {
    hex::encode(Sha256::digest(canonical_payload.as_bytes()))
}

fn decode_segment<T: DeserializeOwned>(segment: &str) -> Result<T, SignatureError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment.trim_end_matches('='))
        .map_err(|e| SignatureError::MalformedToken(e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| SignatureError::MalformedToken(e.to_string()))
}

/// Verifies the token signature and registered claims.
///
/// `now` is the current unix timestamp, used for the `exp` and `nbf` claims.
pub fn verify_token(
    token: &str,
    settings: &SignatureSettings,
    now: i64,
) -> Result<WebhookClaims, SignatureError> {
    let segments = token.split('.').collect::<Vec<_>>();
    let [header, claims, signature] = segments.as_slice() else {
        return Err(SignatureError::MalformedToken(format!(
            "expected 3 segments, got {}",
            segments.len()
        )));
    };

    let token_header: TokenHeader = decode_segment(header)?;
    if token_header.alg != consts::SIGNED_WEBHOOK_ALG {
        return Err(SignatureError::UnsupportedAlgorithm(token_header.alg));
    }

    let signature = URL_SAFE_NO_PAD
        .decode(signature.trim_end_matches('='))
        .map_err(|e| SignatureError::MalformedToken(e.to_string()))?;

    let mut mac = HmacSha256::new_from_slice(settings.secret.as_bytes())
        .map_err(|e| SignatureError::MalformedToken(e.to_string()))?;
    mac.update(header.as_bytes());
    mac.update(b".");
    mac.update(claims.as_bytes());
    let computed_signature = mac.finalize().into_bytes();

    let is_valid: bool = computed_signature.ct_eq(&signature[..]).into();
    if !is_valid {
        return Err(SignatureError::InvalidSignature);
    }

    let claims: WebhookClaims = decode_segment(claims)?;

    if claims.iss != settings.issuer {
        return Err(SignatureError::IssuerMismatch(claims.iss));
    }

    if claims.exp.is_some_and(|exp| exp <= now) {
        return Err(SignatureError::Expired);
    }

    if claims.nbf.is_some_and(|nbf| nbf > now) {
        return Err(SignatureError::NotYetValid);
    }

    Ok(claims)
}

/// Verifies a signed webhook request end to end
pub fn verify_signed_webhook(
    authorization: Option<&str>,
    query: &[(String, String)],
    body: &[u8],
    settings: &SignatureSettings,
) -> Result<WebhookClaims, SignatureError> {
    let token = bearer_token(authorization).ok_or(SignatureError::MissingToken)?;
    let claims = verify_token(token, settings, chrono::Utc::now().timestamp())?;

    let computed_hash = payload_hash(&canonical_payload(query, body)?);
    let claimed_hash = claims.payload_hash.to_lowercase();

    let is_valid: bool = computed_hash.as_bytes().ct_eq(claimed_hash.as_bytes()).into();
    if !is_valid {
        return Err(SignatureError::PayloadHashMismatch);
    }

    Ok(claims)
}
