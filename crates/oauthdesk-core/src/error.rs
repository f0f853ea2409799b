// ── Core error types ──
//
// User-facing errors from oauthdesk-core. Consumers never match on HTTP
// plumbing directly; the `From<oauthdesk_api::Error>` impl sorts transport
// failures into the taxonomy the stores hand back to callers.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to server at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    // ── Authentication errors ────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    #[error("No active session")]
    NotSignedIn,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Entity not found: {entity_type} with id {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error("Validation failed: {message}")]
    ValidationFailed {
        message: String,
        /// Server-provided error code, if any.
        code: Option<String>,
    },

    #[error("Unexpected response shape: {message}")]
    Decode { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        code: Option<String>,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Store errors ─────────────────────────────────────────────────
    #[error("The {store} store is no longer running")]
    StoreClosed { store: &'static str },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Whether signing in again could resolve this error.
    pub fn requires_sign_in(&self) -> bool {
        matches!(self, Self::AuthenticationFailed { .. } | Self::NotSignedIn)
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<oauthdesk_api::Error> for CoreError {
    fn from(err: oauthdesk_api::Error) -> Self {
        match err {
            oauthdesk_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            oauthdesk_api::Error::InvalidToken(reason) => CoreError::AuthenticationFailed {
                message: format!("stored token is unusable: {reason}"),
            },
            oauthdesk_api::Error::Forbidden { message } => CoreError::PermissionDenied { message },
            oauthdesk_api::Error::Transport(ref e) => {
                let url = e
                    .url()
                    .map_or_else(|| "<unknown>".into(), ToString::to_string);
                if e.is_timeout() {
                    CoreError::Timeout { url }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url,
                        reason: e.to_string(),
                    }
                } else if e.is_decode() {
                    CoreError::Decode {
                        message: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        code: None,
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            oauthdesk_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            oauthdesk_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            oauthdesk_api::Error::Rejected { message, code, .. } => {
                CoreError::ValidationFailed { message, code }
            }
            oauthdesk_api::Error::Api {
                message,
                status: 404,
                ..
            } => CoreError::NotFound {
                entity_type: "resource".into(),
                identifier: message,
            },
            oauthdesk_api::Error::Api {
                message,
                code,
                status,
            } => CoreError::Api {
                message,
                code,
                status: Some(status),
            },
            oauthdesk_api::Error::Deserialization { message, body: _ } => {
                CoreError::Decode { message }
            }
        }
    }
}
