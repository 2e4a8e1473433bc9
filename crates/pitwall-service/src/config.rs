//! Service configuration
//!
//! Settings come from an optional YAML file and are then overridden by
//! environment variables:
//!
//! - `PITWALL_DATA_DIR`: directory holding the collection documents
//! - `PITWALL_BIND_ADDRESS`: HTTP listen address
//! - `PITWALL_EDITORS`: editor logins as `user=pass;user2=pass2`
//! - `PITWALL_ENABLE_CORS`: `true` or `false`
//! - `PITWALL_LOG`: `tracing` filter directive

use std::fmt;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use pitwall_store::StoreConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ServiceError;

/// Environment variable overriding [`StoreConfig::data_dir`]
pub const ENV_DATA_DIR: &str = "PITWALL_DATA_DIR";
/// Environment variable overriding [`HttpConfig::bind_address`]
pub const ENV_BIND_ADDRESS: &str = "PITWALL_BIND_ADDRESS";
/// Environment variable replacing [`ServiceConfig::editors`]
pub const ENV_EDITORS: &str = "PITWALL_EDITORS";
/// Environment variable overriding [`HttpConfig::enable_cors`]
pub const ENV_ENABLE_CORS: &str = "PITWALL_ENABLE_CORS";
/// Environment variable overriding [`ServiceConfig::log_filter`]
pub const ENV_LOG: &str = "PITWALL_LOG";

/// Complete service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Record store settings
    pub store: StoreConfig,
    /// HTTP listener settings
    pub http: HttpConfig,
    /// Logins allowed to use the editor routes
    pub editors: Vec<EditorLogin>,
    /// `tracing` filter directive
    pub log_filter: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            http: HttpConfig::default(),
            editors: Vec::new(),
            log_filter: "info".to_string(),
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Address the HTTP server binds to
    pub bind_address: SocketAddr,
    /// Answer cross-origin requests from any origin
    pub enable_cors: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from((Ipv4Addr::LOCALHOST, 8080)),
            enable_cors: true,
        }
    }
}

/// Username and password of an editor
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorLogin {
    /// Basic auth username
    pub username: String,
    /// Basic auth password
    pub password: String,
}

impl EditorLogin {
    /// Create a login
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Whether the given credentials match this login
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

impl fmt::Debug for EditorLogin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorLogin")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl FromStr for EditorLogin {
    type Err = ServiceError;

    /// Parse `user=pass`; the password may itself contain `=`
    fn from_str(entry: &str) -> std::result::Result<Self, Self::Err> {
        match entry.split_once('=') {
            Some((username, password)) if !username.is_empty() => {
                Ok(Self::new(username, password))
            }
            _ => Err(ServiceError::InvalidEditor {
                entry: entry.split('=').next().unwrap_or_default().to_string(),
            }),
        }
    }
}

/// Parse a `;` separated list of `user=pass` entries
///
/// Blank entries are skipped, so a trailing `;` is accepted.
pub fn parse_editors(list: &str) -> std::result::Result<Vec<EditorLogin>, ServiceError> {
    list.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(EditorLogin::from_str)
        .collect()
}

impl ServiceConfig {
    /// Load the configuration file, if any, then apply environment overrides
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_path(path).await?,
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub async fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: ServiceConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Apply overrides from `lookup`, which resolves an environment variable name
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(data_dir) = lookup(ENV_DATA_DIR) {
            self.store.data_dir = PathBuf::from(data_dir);
        }

        if let Some(address) = lookup(ENV_BIND_ADDRESS) {
            self.http.bind_address = address
                .parse()
                .with_context(|| format!("Invalid {ENV_BIND_ADDRESS}: {address}"))?;
        }

        if let Some(enabled) = lookup(ENV_ENABLE_CORS) {
            self.http.enable_cors = enabled
                .trim()
                .parse()
                .with_context(|| format!("Invalid {ENV_ENABLE_CORS}: {enabled}"))?;
        }

        if let Some(editors) = lookup(ENV_EDITORS) {
            self.editors = parse_editors(&editors).with_context(|| format!("Invalid {ENV_EDITORS}"))?;
        }

        if let Some(filter) = lookup(ENV_LOG) {
            self.log_filter = filter;
        }

        Ok(())
    }

    /// Warn about settings that leave the service half usable
    pub fn validate(&self) {
        if self.editors.is_empty() {
            warn!("No editors configured, every editor route will be refused");
        }
        if !self.store.atomic_writes {
            warn!("Atomic writes disabled, a crash mid-write can truncate a collection");
        }
    }
}
