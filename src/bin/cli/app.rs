use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use ica_shopping_list_lib::sync::SyncConfig;
use ica_shopping_list_lib::AppState;

/// Resolve and load the config file
pub fn load_config(path: Option<&Path>) -> Result<SyncConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => SyncConfig::default_path().context("Failed to get config directory")?,
    };
    SyncConfig::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))
}

/// Shared application state for CLI commands
pub struct App {
    pub config: SyncConfig,
    pub state: Arc<AppState>,
}

impl App {
    /// Load the config and fetch the current list
    pub async fn connect(config_path: Option<&Path>) -> Result<Self> {
        let config = load_config(config_path)?;
        let state = AppState::from_config(&config).context("Failed to set up shopping list")?;
        state
            .refresh()
            .await
            .with_context(|| format!("Failed to load list '{}'", config.list_name))?;

        Ok(Self {
            config,
            state: Arc::new(state),
        })
    }
}
