use thiserror::Error;

/// Top-level error type for the `scolara-api` crate.
///
/// Covers every failure mode of the transport layer: authentication,
/// HTTP transport, non-success API responses, and response-schema
/// mismatches. `scolara-core` maps these into user-facing variants.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login exchange failed or returned no usable token.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The server answered 401. The stored token has already been
    /// cleared by the time this error is observed.
    #[error("Session expired -- re-authentication required")]
    SessionExpired,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── API ─────────────────────────────────────────────────────────
    /// Non-success HTTP status, with the raw response text.
    #[error("API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// Response body failed schema validation, with the raw body for
    /// debugging. Surfaced rather than silently coerced.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// Request body could not be encoded as JSON.
    #[error("Failed to encode request body: {0}")]
    Encode(String),
}

impl Error {
    /// Returns `true` if this error means the session is no longer valid
    /// and re-authentication might resolve it.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::SessionExpired | Self::Authentication { .. })
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }

    /// The HTTP status code, if one was observed.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::SessionExpired => Some(401),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
