// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Service configuration.
//!
//! Sources, later ones winning:
//!
//! 1. compiled defaults
//! 2. the YAML file named by `USER_SERVICE_CONFIG` (default `config.yaml`,
//!    skipped when missing)
//! 3. `USER_SERVICE_*` environment variables, `__` separating sections
//!
//! ```yaml
//! server:
//!   host: 0.0.0.0
//!   port: 8080
//! store:
//!   unique: [email, username]
//! paging:
//!   default_limit: 20
//!   max_limit: 100
//! log:
//!   filter: info
//!   json: false
//! ```
//!
//! `USER_SERVICE_SERVER__PORT=9000` overrides `server.port`.

use std::net::SocketAddr;

use docshape::PagingPolicy;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Yaml}
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the YAML file.
pub const CONFIG_PATH_ENV: &str = "USER_SERVICE_CONFIG";

/// YAML file read when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Prefix of overriding environment variables.
pub const ENV_PREFIX: &str = "USER_SERVICE_";

/// Configuration that cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source failed to parse or a value has the wrong type.
    #[error(transparent)]
    Source(#[from] Box<figment::Error>),

    /// A value parsed but is out of range.
    #[error("invalid configuration `{key}`: {reason}")]
    Invalid {
        /// Dotted key.
        key:    &'static str,
        /// What is wrong.
        reason: &'static str
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Source(Box::new(err))
    }
}

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Listener.
    pub server: ServerConfig,

    /// Document store.
    pub store: StoreConfig,

    /// Search paging.
    pub paging: PagingConfig,

    /// Logging.
    pub log: LogConfig
}

/// Listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,

    /// Bind port.
    pub port: u16
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080
        }
    }
}

/// Document store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Collection override, the entity's own collection when unset.
    pub collection: Option<String>,

    /// Storage fields whose values must be unique.
    pub unique: Vec<String>
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            collection: None,
            unique:     vec!["email".to_string(), "username".to_string()]
        }
    }
}

/// Search paging settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagingConfig {
    /// Page size when the client sends none.
    pub default_limit: i64,

    /// Largest page size a client may request.
    pub max_limit: i64
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_limit: PagingPolicy::DEFAULT_LIMIT,
            max_limit:     PagingPolicy::DEFAULT_MAX_LIMIT
        }
    }
}

impl PagingConfig {
    /// Policy handed to the filter descriptor.
    pub fn policy(&self) -> PagingPolicy {
        PagingPolicy::new(self.default_limit, self.max_limit)
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing-subscriber` filter directive, overridden by `RUST_LOG`.
    pub filter: String,

    /// Emit JSON lines instead of human readable output.
    pub json: bool
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info,user_service=debug,docshape_core=debug".to_string(),
            json:   false
        }
    }
}

impl Config {
    /// Defaults, then the YAML file, then the environment.
    pub fn figment() -> Figment {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]).split("__"))
    }

    /// Load from the standard sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source is malformed or a value is out of
    /// range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    /// Extract and check a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is out of range.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.check()?;
        Ok(config)
    }

    /// Socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the host is not an IP address.
    pub fn addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = self
            .server
            .host
            .parse()
            .map_err(|_| ConfigError::Invalid {
                key:    "server.host",
                reason: "not an IP address"
            })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    fn check(&self) -> Result<(), ConfigError> {
        self.addr()?;
        if self.paging.default_limit < 1 {
            return Err(ConfigError::Invalid {
                key:    "paging.default_limit",
                reason: "must be positive"
            });
        }
        if self.paging.max_limit < self.paging.default_limit {
            return Err(ConfigError::Invalid {
                key:    "paging.max_limit",
                reason: "must not be below paging.default_limit"
            });
        }
        if self
            .store
            .collection
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(ConfigError::Invalid {
                key:    "store.collection",
                reason: "must not be blank"
            });
        }
        Ok(())
    }
}
