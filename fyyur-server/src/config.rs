//! Runtime settings
//!
//! Priority order (highest to lowest):
//! 1. Command line flags / environment (applied by the binary)
//! 2. `~/.fyyur/config.toml`
//! 3. Built-in defaults

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ServerError, ServerResult};
use crate::http::ServerConfig;

/// Default database location, relative to the working directory.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://fyyur.db";

/// Settings file contents; every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub database_url: String,
    pub bind: SocketAddr,
    pub max_connections: u32,
    pub request_timeout_secs: u64,
    pub cors_permissive: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let server = ServerConfig::default();
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind: server.bind_addr,
            max_connections: 5,
            request_timeout_secs: server.request_timeout.as_secs(),
            cors_permissive: server.cors_permissive,
        }
    }
}

impl Settings {
    /// Load `~/.fyyur/config.toml`, falling back to defaults when absent.
    pub fn load() -> ServerResult<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load settings from an explicit TOML file.
    pub fn load_from(path: &Path) -> ServerResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings = toml::from_str(&content).map_err(|source| ServerError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Config file path: ~/.fyyur/config.toml
    pub fn config_path() -> Option<PathBuf> {
        config_dir().map(|dir| dir.join("config.toml"))
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            cors_permissive: self.cors_permissive,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

/// The fyyur config directory (~/.fyyur)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".fyyur"))
}

/// Load environment variables from .env files.
///
/// The current directory wins over `~/.fyyur/.env`; dotenvy never overwrites
/// variables that are already set.
pub fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded .env from {}", path.display());
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() {
            match dotenvy::from_path(&env_file) {
                Ok(()) => debug!("Loaded .env from {}", env_file.display()),
                Err(e) => debug!("Failed to load {}: {}", env_file.display(), e),
            }
        }
    }
}
