use derive_more::{Display, Error};
use ntex::{http, web};

/// Failures talking to the hospital directory
#[derive(Debug, Display, Error, PartialEq)]
pub enum DirectoryError {
    /// The request never produced a usable http response
    #[display("directory transport error: {_0}")]
    Transport(#[error(not(source))] String),
    /// The response was not the shape we asked for
    #[display("directory schema error: {_0}")]
    Schema(#[error(not(source))] String),
}

impl DirectoryError {
    pub fn kind(&self) -> &'static str {
        match self {
            DirectoryError::Transport(_) => "transport",
            DirectoryError::Schema(_) => "schema",
        }
    }
}

/// Reasons a signed webhook is rejected
#[derive(Debug, Display, Error, PartialEq)]
pub enum SignatureError {
    #[display("no bearer token in authorization header")]
    MissingToken,
    #[display("bearer token is not a valid JWT: {_0}")]
    MalformedToken(#[error(not(source))] String),
    #[display("unsupported signing algorithm: {_0}")]
    UnsupportedAlgorithm(#[error(not(source))] String),
    #[display("token signature does not match")]
    InvalidSignature,
    #[display("unexpected token issuer: {_0}")]
    IssuerMismatch(#[error(not(source))] String),
    #[display("token is expired")]
    Expired,
    #[display("token is not valid yet")]
    NotYetValid,
    #[display("payload hash does not match the token claim")]
    PayloadHashMismatch,
    #[display("signed payload is not a json object: {_0}")]
    MalformedPayload(#[error(not(source))] String),
}

impl SignatureError {
    pub fn reason(&self) -> &'static str {
        match self {
            SignatureError::MissingToken => "missing_token",
            SignatureError::MalformedToken(_) => "malformed_token",
            SignatureError::UnsupportedAlgorithm(_) => "unsupported_algorithm",
            SignatureError::InvalidSignature => "invalid_signature",
            SignatureError::IssuerMismatch(_) => "issuer_mismatch",
            SignatureError::Expired => "expired",
            SignatureError::NotYetValid => "not_yet_valid",
            SignatureError::PayloadHashMismatch => "payload_hash_mismatch",
            SignatureError::MalformedPayload(_) => "malformed_payload",
        }
    }
}

/// Errors returned to the messaging provider
#[derive(Debug, Display, Error)]
pub enum WebhookError {
    Unauthorized,
}

impl web::error::WebResponseError for WebhookError {
    fn error_response(&self, _: &web::HttpRequest) -> web::HttpResponse {
        web::HttpResponse::build(self.status_code()).finish()
    }

    fn status_code(&self) -> http::StatusCode {
        match *self {
            WebhookError::Unauthorized => http::StatusCode::UNAUTHORIZED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_error_display() {
        let err = DirectoryError::Schema("missing data.hospital".into());

        assert_eq!(err.kind(), "schema");
        assert_eq!(err.to_string(), "directory schema error: missing data.hospital");
    }

    #[test]
    fn test_signature_error_reason() {
        assert_eq!(SignatureError::MissingToken.reason(), "missing_token");
        assert_eq!(
            SignatureError::IssuerMismatch("Mallory".into()).to_string(),
            "unexpected token issuer: Mallory"
        );
    }
}
