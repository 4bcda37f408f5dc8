//! Server configuration.
//!
//! Configuration is read from a TOML file and then overridden by command-line
//! flags. Every key is optional:
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 5000
//!
//! [catalog]
//! path = "data/braids.json"
//!
//! [security]
//! hsts = false
//! ```

use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind to (an IP address, not a hostname)
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

/// Braid catalog source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CatalogConfig {
    /// Catalog JSON file. The embedded catalog is used when unset.
    /// Relative paths are resolved against the config file's directory.
    pub path: Option<PathBuf>,
}

/// Response hardening options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SecurityConfig {
    /// Send `Strict-Transport-Security`. Only enable behind HTTPS.
    pub hsts: bool,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// HTTP listener settings
    pub server: ServerConfig,
    /// Catalog source
    pub catalog: CatalogConfig,
    /// Response hardening
    pub security: SecurityConfig,
}

impl Config {
    /// Config file picked up from the working directory when no path is given.
    pub const DEFAULT_FILE: &'static str = "braid-calc.toml";

    /// Loads configuration.
    ///
    /// With an explicit `path` the file must exist. Without one,
    /// [`Config::DEFAULT_FILE`] is read if present, otherwise defaults are used.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default_path = PathBuf::from(Self::DEFAULT_FILE);
                if !default_path.exists() {
                    return Ok(Self::default());
                }
                default_path
            }
        };

        let content = fs::read_to_string(&path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let mut config = Self::from_toml_str(&content)
            .context(format!("Failed to parse config file: {}", path.display()))?;

        if let Some(catalog_path) = config.catalog.path.take() {
            config.catalog.path = Some(resolve_relative(&path, catalog_path));
        }

        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from TOML text without touching the filesystem.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty host, port 0, or a host that is not an IP address.
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            anyhow::bail!("server.host must not be empty");
        }
        if self.server.port == 0 {
            anyhow::bail!("server.port must be between 1 and 65535");
        }
        self.socket_addr()?;
        Ok(())
    }

    /// Socket address built from host and port.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let host = self.server.host.trim();
        let ip = host
            .parse::<IpAddr>()
            .context(format!("Invalid listen address: {host} is not an IP address"))?;
        Ok(SocketAddr::new(ip, self.server.port))
    }
}

fn resolve_relative(config_path: &Path, catalog_path: PathBuf) -> PathBuf {
    if catalog_path.is_absolute() {
        return catalog_path;
    }
    match config_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(catalog_path),
        _ => catalog_path,
    }
}
