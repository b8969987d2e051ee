use std::{
    fs,
    net::SocketAddr,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ServerError;

/// Environment variable overriding [`Settings::host`].
pub const HOST_ENV: &str = "PVTMIX_HOST";

/// Environment variable overriding [`Settings::port`].
pub const PORT_ENV: &str = "PVTMIX_PORT";

/// Environment variable overriding [`Settings::log_filter`].
pub const LOG_ENV: &str = "PVTMIX_LOG";

/// Settings file picked up from the working directory when none is given.
pub const DEFAULT_SETTINGS_FILE: &str = "pvtmix.toml";

/// Server settings.
///
/// Settings are layered, with later layers winning:
/// 1. [`Settings::default`]
/// 2. a TOML settings file
/// 3. `PVTMIX_*` environment variables
/// 4. command-line flags
///
/// ```toml
/// host = "0.0.0.0"
/// port = 8080
/// log_filter = "pvtmix=debug,info"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Host name or address to listen on.
    pub host: String,

    /// TCP port to listen on.
    pub port: u16,

    /// `tracing` filter directive, e.g. `info` or `pvtmix_correlations=debug`.
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: String::from("localhost"),
            port: 8000,
            log_filter: String::from("info"),
        }
    }
}

impl Settings {
    /// Loads settings from a file and the process environment.
    ///
    /// If `path` is `None`, [`DEFAULT_SETTINGS_FILE`] is read when it exists
    /// in the working directory and skipped otherwise.
    ///
    /// # Errors
    ///
    /// Fails if the settings file cannot be read or parsed, or if an
    /// environment override has the wrong type.
    pub fn load(path: Option<&Path>) -> Result<Self, ServerError> {
        let settings = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = PathBuf::from(DEFAULT_SETTINGS_FILE);
                if default_path.is_file() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };

        settings.with_env(|name| std::env::var(name).ok())
    }

    /// Reads settings from a TOML file. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::ReadSettings`] or [`ServerError::ParseSettings`].
    pub fn from_file(path: &Path) -> Result<Self, ServerError> {
        let contents = fs::read_to_string(path).map_err(|source| ServerError::ReadSettings {
            path: path.to_path_buf(),
            source,
        })?;

        let settings = toml::from_str(&contents).map_err(|source| ServerError::ParseSettings {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "loaded settings file");
        Ok(settings)
    }

    /// Applies `PVTMIX_*` overrides read through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::InvalidEnv`] if `PVTMIX_PORT` is not a valid port.
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(HOST_ENV) {
            self.host = host;
        }
        if let Some(port) = lookup(PORT_ENV) {
            self.port = port.trim().parse().map_err(|_| ServerError::InvalidEnv {
                name: PORT_ENV,
                value: port,
            })?;
        }
        if let Some(filter) = lookup(LOG_ENV) {
            self.log_filter = filter;
        }
        Ok(self)
    }

    /// Applies command-line overrides.
    #[must_use]
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// Resolves the host and port to a socket address.
    ///
    /// # Errors
    ///
    /// Fails if the host name cannot be resolved.
    pub async fn socket_addr(&self) -> Result<SocketAddr, ServerError> {
        let mut addrs = tokio::net::lookup_host((self.host.as_str(), self.port))
            .await
            .map_err(|source| ServerError::Resolve {
                host: self.host.clone(),
                port: self.port,
                source,
            })?;

        addrs.next().ok_or_else(|| ServerError::NoAddress {
            host: self.host.clone(),
            port: self.port,
        })
    }
}
