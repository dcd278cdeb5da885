//! Command-line client for the arena.
//!
//! The [`Client`] is the composition root: it turns a [`ClientConfig`] into a
//! ready [`ArenaService`] (store adapter, ranking cache, enrolled roster) and
//! runs [`Command`]s against it, rendering every result as JSON.

mod builder;

pub mod commands;
pub mod config;
pub mod logging;
pub mod roster;

pub use builder::ClientBuilder;
pub use commands::{Cli, Command};
pub use config::{ClientConfig, StoreKind};

use arena_runtime::ArenaService;

/// Assembled arena client.
pub struct Client {
    service: ArenaService,
    config: ClientConfig,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn service(&self) -> &ArenaService {
        &self.service
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}
