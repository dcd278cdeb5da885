//! Composition root: store adapter, roster and service assembled from config.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use arena_core::CombatantSpec;
use arena_runtime::{ArenaService, CombatantStore, FileCombatantStore, InMemoryCombatantStore};

use crate::config::{ClientConfig, StoreKind};
use crate::{Client, roster};

/// Builder for constructing a [`Client`].
///
/// The roster comes from, in order: [`ClientBuilder::roster`], the
/// `roster_path` of the config, the built-in roster.
#[derive(Default)]
pub struct ClientBuilder {
    config: ClientConfig,
    roster: Option<Vec<CombatantSpec>>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Enrol this roster instead of loading one.
    pub fn roster(mut self, roster: Vec<CombatantSpec>) -> Self {
        self.roster = Some(roster);
        self
    }

    /// Opens the store, enrols the roster and builds the service.
    pub async fn build(self) -> Result<Client> {
        let store: Arc<dyn CombatantStore> = match self.config.store {
            StoreKind::Memory => Arc::new(InMemoryCombatantStore::new()),
            StoreKind::File => {
                let dir = self.config.data_dir();
                let store = FileCombatantStore::open(&dir)
                    .with_context(|| format!("Failed to open store in {}", dir.display()))?;
                info!(path = %store.path().display(), "file store opened");
                Arc::new(store)
            }
        };

        let roster = match (self.roster, &self.config.roster_path) {
            (Some(roster), _) => roster,
            (None, Some(path)) => roster::load(path)?,
            (None, None) => roster::builtin()?,
        };

        let service = ArenaService::builder(store)
            .config(self.config.arena.clone())
            .build();
        service
            .seed_roster(roster)
            .await
            .context("Failed to enrol roster")?;

        Ok(Client {
            service,
            config: self.config,
        })
    }
}
