//! Shared configuration for Scolara clients.
//!
//! TOML file + `SCOLARA_*` environment variables, the OS-keyring-backed
//! token slot, and translation into a ready-to-use [`Coordinator`].

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use scolara_api::{ApiClient, TransportConfig};
use scolara_core::Coordinator;

mod token;

pub use token::KeyringTokenStore;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring unavailable: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config ──────────────────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// API base URL.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Accept self-signed TLS certificates.
    #[serde(default)]
    pub insecure: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            timeout: default_timeout(),
            insecure: false,
        }
    }
}

fn default_api_base() -> String {
    "http://localhost:8000".into()
}

fn default_timeout() -> u64 {
    30
}

impl Config {
    /// The parsed base URL.
    pub fn base_url(&self) -> Result<url::Url, ConfigError> {
        self.api_base.parse().map_err(|_| ConfigError::Validation {
            field: "api_base".into(),
            reason: format!("invalid URL: {}", self.api_base),
        })
    }

    /// Translate into transport settings.
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            timeout: Duration::from_secs(self.timeout),
            danger_accept_invalid_certs: self.insecure,
        }
    }

    /// Build an [`ApiClient`] against this config with the given token
    /// slot.
    pub fn api_client(
        &self,
        tokens: Arc<dyn scolara_api::TokenStore>,
    ) -> Result<ApiClient, ConfigError> {
        let base_url = self.base_url()?;
        ApiClient::new(base_url, tokens, &self.transport()).map_err(|e| ConfigError::Validation {
            field: "transport".into(),
            reason: e.to_string(),
        })
    }

    /// Build a [`Coordinator`] with the keyring-backed token slot.
    ///
    /// The usual composition root for an interactive client: call this,
    /// then `restore_session()` to revalidate any persisted token.
    pub fn coordinator(&self) -> Result<Coordinator, ConfigError> {
        let tokens = Arc::new(KeyringTokenStore::open_default()?);
        Ok(Coordinator::new(self.api_client(tokens)?))
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "scolara", "scolara").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("scolara");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the config from defaults, the config file, and `SCOLARA_*`
/// environment variables, in increasing precedence.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Like [`load_config`], with an explicit file path (tests, overrides).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SCOLARA_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning defaults if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_localhost() {
        let cfg = Config::default();
        assert_eq!(cfg.api_base, "http://localhost:8000");
        assert_eq!(cfg.timeout, 30);
        assert!(!cfg.insecure);
        assert!(cfg.base_url().is_ok());
    }

    #[test]
    fn toml_file_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                "api_base = \"https://sis.district.example\"\ntimeout = 10\n",
            )?;

            let cfg = load_config_from(Path::new("config.toml")).expect("config loads");
            assert_eq!(cfg.api_base, "https://sis.district.example");
            assert_eq!(cfg.timeout, 10);
            assert!(!cfg.insecure);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", "api_base = \"https://from-file.example\"")?;
            jail.set_env("SCOLARA_API_BASE", "https://from-env.example");

            let cfg = load_config_from(Path::new("config.toml")).expect("config loads");
            assert_eq!(cfg.api_base, "https://from-env.example");
            Ok(())
        });
    }

    #[test]
    fn invalid_base_url_is_a_validation_error() {
        let cfg = Config {
            api_base: "not a url".into(),
            ..Config::default()
        };
        assert!(matches!(
            cfg.base_url(),
            Err(ConfigError::Validation { .. })
        ));
    }
}
