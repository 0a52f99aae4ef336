use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, Result};

/// Default bind address (loopback, port 5000)
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";

/// Default PostgreSQL connection string
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/ads";

/// Default maximum connections for the pool.
/// Kept low for a single-table service.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Top-level adboard configuration
///
/// Resolved from defaults, then `~/.adboard/config.toml` (or an explicit
/// path), then environment variables. Command-line flags are applied on top
/// by the binary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdboardConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Address to bind the HTTP listener to
    pub bind: SocketAddr,
    /// Allow any CORS origin instead of localhost only
    pub cors_permissive: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            cors_permissive: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl AdboardConfig {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, `~/.adboard/config.toml`
    /// is read if present and built-in defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CoreError::ConfigNotFound {
                        path: path.to_path_buf(),
                    });
                }
                Self::from_file(path)?
            }
            None => {
                let default_path = Self::config_path();
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    tracing::debug!(path = ?default_path, "no config file, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_env(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Get config file path: ~/.adboard/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".adboard/config.toml")
    }

    /// Parse a config file without applying environment overrides.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| CoreError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config = toml::from_str(&content).map_err(|source| CoreError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = ?path, "loaded config file");
        Ok(config)
    }

    /// Apply `DATABASE_URL` and `ADBOARD_BIND` overrides.
    ///
    /// Takes a lookup function so callers (and tests) control the source.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL").filter(|u| !u.is_empty()) {
            self.database.url = url;
        }

        if let Some(bind) = lookup("ADBOARD_BIND").filter(|b| !b.is_empty()) {
            self.server.bind = bind.parse().map_err(|_| {
                CoreError::config(format!("ADBOARD_BIND is not a socket address: {}", bind))
            })?;
        }

        Ok(())
    }

    /// Reject values the server cannot start with.
    ///
    /// Not called by `load`; flag overrides are applied first.
    pub fn validate(&self) -> Result<()> {
        if self.database.url.trim().is_empty() {
            return Err(CoreError::config("database.url is empty"));
        }
        if self.database.max_connections == 0 {
            return Err(CoreError::config("database.max_connections must be at least 1"));
        }
        Ok(())
    }
}
