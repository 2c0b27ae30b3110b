// ── Core error types ──
//
// User-facing errors from scolara-core. Consumers never handle raw
// transport errors; the `From<scolara_api::Error>` impl translates them
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Session errors ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    AuthFailed { message: String },

    #[error("Session expired -- sign in again")]
    SessionExpired,

    #[error("Not signed in")]
    Unauthenticated,

    /// A role grant the mapping table does not know. Flagged instead of
    /// silently defaulting to a guessed role.
    #[error("No application role mapped for server role {role:?}")]
    UnmappedRole { role: String },

    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach server: {reason}")]
    ConnectionFailed { reason: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Not found: {identifier}")]
    NotFound { identifier: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<scolara_api::Error> for CoreError {
    fn from(err: scolara_api::Error) -> Self {
        match err {
            scolara_api::Error::Authentication { message } => CoreError::AuthFailed { message },
            scolara_api::Error::SessionExpired => CoreError::SessionExpired,
            scolara_api::Error::Transport(ref e) => {
                if e.is_connect() || e.is_timeout() {
                    CoreError::ConnectionFailed {
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            scolara_api::Error::InvalidUrl(e) => CoreError::ValidationFailed {
                message: format!("invalid URL: {e}"),
            },
            scolara_api::Error::Api { status: 404, body } => CoreError::NotFound {
                identifier: if body.is_empty() {
                    "resource".into()
                } else {
                    body
                },
            },
            scolara_api::Error::Api { status, body } => CoreError::Api {
                message: body,
                status: Some(status),
            },
            scolara_api::Error::Deserialization { message, body: _ }
            | scolara_api::Error::Encode(message) => CoreError::ValidationFailed { message },
        }
    }
}
