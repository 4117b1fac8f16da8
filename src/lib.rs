use std::sync::Arc;

use thiserror::Error;

pub mod events;
pub mod intents;
pub mod server;
pub mod services;
pub mod shopping;
pub mod sync;

#[cfg(test)]
mod testing;

use events::EventBus;
use shopping::{ArticleGroups, ShoppingData};
use sync::{ConfigError, SyncClient, SyncConfig, SyncError};

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),
}

/// Everything the host surfaces share: the list mirror and its event bus
pub struct AppState {
    pub shopping: Arc<ShoppingData>,
    pub events: EventBus,
}

impl AppState {
    pub fn new(shopping: ShoppingData) -> Self {
        Self {
            shopping: Arc::new(shopping),
            events: EventBus::default(),
        }
    }

    /// Build the client stack from a config. Nothing is fetched yet; the
    /// first request logs in and resolves the list.
    pub fn from_config(config: &SyncConfig) -> Result<Self, SetupError> {
        let credentials = config.credentials()?;
        let client = SyncClient::from_config(config, credentials)?;

        let groups = match &config.article_groups {
            Some(map) => ArticleGroups::from_map(map.clone()),
            None => ArticleGroups::builtin(),
        };

        log::info!(
            "Shopping list '{}' for {} via {}",
            config.list_name,
            config.username,
            config.base_url()
        );

        Ok(Self::new(ShoppingData::new(client, Box::new(groups))))
    }

    /// Load the list from the remote side, firing an update on success
    pub async fn refresh(&self) -> Result<shopping::Items, SyncError> {
        let items = self.shopping.load().await?;
        self.events.fire_list_updated();
        Ok(items)
    }
}
