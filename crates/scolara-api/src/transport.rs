// Shared transport configuration for building reqwest::Client instances.

use std::time::Duration;

use crate::error::Error;

/// Transport settings shared by every [`crate::ApiClient`].
///
/// Deliberately small: no retries and no timeout handling beyond the
/// single request timeout. The server is close (often on the same LAN)
/// and the UI owns user-visible retry affordances.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    /// Accept self-signed certificates. Self-hosted school servers
    /// frequently run without a trusted CA.
    pub danger_accept_invalid_certs: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            danger_accept_invalid_certs: false,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("scolara/", env!("CARGO_PKG_VERSION")));

        if self.danger_accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        builder.build().map_err(Error::Transport)
    }
}
