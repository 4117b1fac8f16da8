use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Origin of the ICA shopping list API
pub const DEFAULT_BASE_URL: &str = "https://handla.api.ica.se";

/// Keyring service used when the config file carries no password
pub const KEYRING_SERVICE: &str = "ica-shopping-list";

/// Environment variable pointing at an alternative config file
pub const CONFIG_ENV: &str = "ICA_SHOPPING_LIST_CONFIG";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("No password configured for {0} and none stored in the keyring")]
    MissingPassword(String),
    #[error("Keyring error: {0}")]
    Keyring(String),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Shopping list configuration, as read from `config.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    pub username: String,
    /// Falls back to the OS keyring when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Title of the remote list to mirror
    #[serde(rename = "listname")]
    pub list_name: String,
    /// Store sorting applied when the list has to be created
    #[serde(rename = "storesorting", default, skip_serializing_if = "Option::is_none")]
    pub store_sorting: Option<i64>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Replaces the built-in product name to article group table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_groups: Option<HashMap<String, u32>>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Credentials for the login endpoint
#[derive(Clone)]
pub struct SyncCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for SyncCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl SyncConfig {
    /// Default config file location (e.g. ~/.config/ica-shopping-list/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("ica-shopping-list").join("config.toml"))
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate config contents
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: SyncConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.username.trim().is_empty() {
            return Err(ConfigError::Invalid("username must not be empty".to_string()));
        }
        if self.list_name.is_empty() {
            return Err(ConfigError::Invalid("listname must not be empty".to_string()));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::Invalid(
                "base_url must start with http:// or https://".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Sorting store sent when creating the list
    pub fn sorting_store(&self) -> i64 {
        self.store_sorting.unwrap_or(0)
    }

    /// Get credentials: config file first, then keyring
    pub fn credentials(&self) -> Result<SyncCredentials, ConfigError> {
        if let Some(password) = &self.password {
            return Ok(SyncCredentials {
                username: self.username.clone(),
                password: password.clone(),
            });
        }

        let entry = keyring::Entry::new(KEYRING_SERVICE, &self.username)
            .map_err(|e| ConfigError::Keyring(e.to_string()))?;
        let password = entry
            .get_password()
            .map_err(|_| ConfigError::MissingPassword(self.username.clone()))?;

        Ok(SyncCredentials {
            username: self.username.clone(),
            password,
        })
    }
}

/// Store a password in the OS keyring for later config-less logins
pub fn store_password(username: &str, password: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, username)
        .map_err(|e| ConfigError::Keyring(e.to_string()))?;
    entry
        .set_password(password)
        .map_err(|e| ConfigError::Keyring(e.to_string()))
}
