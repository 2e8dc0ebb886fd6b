//! Application state shared by all commands.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use ht_core::config::AppConfig;
use ht_core::profile::{ProfileRecord, Role};
use ht_resolver::ProfileResolver;
use ht_store::{DocumentStore, ProfileStore, SqliteStore, TimeoutStore};

pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<dyn DocumentStore>,
}

impl AppState {
    /// Open the configured database, creating it and its directory if needed.
    pub fn open(config: AppConfig) -> Result<Self> {
        let path = match &config.database_path {
            Some(path) => path.clone(),
            None => default_database_path().context("no data directory for this platform")?,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
        let store = SqliteStore::open(&path)
            .with_context(|| format!("cannot open database {}", path.display()))?;
        tracing::debug!("Opened profile database {}", path.display());
        Ok(Self::with_store(config, store))
    }

    /// State over any store; every call is bounded by the configured timeout.
    pub fn with_store<S: DocumentStore + 'static>(config: AppConfig, store: S) -> Self {
        let store = TimeoutStore::new(store, config.store_timeout_ms);
        Self {
            config,
            store: Arc::new(store),
        }
    }

    pub fn profiles(&self, role: Role) -> ProfileStore {
        ProfileStore::for_role(self.store.clone(), role, &self.config)
    }

    pub fn resolver<P: ProfileRecord>(&self) -> ProfileResolver<P> {
        ProfileResolver::new(self.profiles(P::ROLE))
    }
}

fn default_database_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("hometutions").join("profiles.db"))
}
