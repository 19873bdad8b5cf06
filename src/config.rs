//! Runtime configuration.
//!
//! Sources, lowest to highest priority:
//! 1. `Config::default()`
//! 2. TOML file (`roster.toml`, or the path in `ROSTER_CONFIG`)
//! 3. Environment variables with the `ROSTER_` prefix, nested with `__`
//!    (`ROSTER_BASIC__LISTEN_ADDR` -> `basic.listen_addr`)

use crate::error::RosterError;
use axum_extra::extract::cookie::Key;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_CONFIG_FILE: &str = "roster.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub basic: BasicConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BasicConfig {
    pub listen_addr: String,
    pub database_url: String,
    pub loglevel: String,
    /// Master key for encrypting session and flash cookies. At least 64 bytes.
    /// A random key is generated per process when unset.
    pub secret_key: Option<String>,
    /// Drop the `Secure` attribute from cookies. The built-in listener is plain
    /// HTTP, so this stays on unless a TLS-terminating proxy sits in front.
    pub insecure_cookie: bool,
    pub session_ttl_minutes: i64,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:5000".to_string(),
            database_url: "sqlite:students.db".to_string(),
            loglevel: "info".to_string(),
            secret_key: None,
            insecure_cookie: true,
            session_ttl_minutes: 720,
        }
    }
}

/// The single administrative account seeded at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            email: "admin@example.com".to_string(),
            password: "admin123".to_string(),
        }
    }
}

impl Config {
    /// Load from defaults, the TOML file and `ROSTER_*` environment variables.
    pub fn load() -> Result<Self, RosterError> {
        let path = std::env::var_os("ROSTER_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::figment(path).extract().map_err(RosterError::from)
    }

    fn figment(path: PathBuf) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("ROSTER_").split("__"))
    }

    /// Cookie encryption key. `Ok(None)` means no key was configured.
    pub fn cookie_key(&self) -> Result<Option<Key>, RosterError> {
        match self.basic.secret_key.as_deref() {
            None => Ok(None),
            Some(secret) => Key::try_from(secret.as_bytes())
                .map(Some)
                .map_err(|_| RosterError::InvalidSecretKey),
        }
    }
}
