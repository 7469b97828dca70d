//! Persistence of user records.

pub mod file;
pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::config::{StoreBackend, StoreConfig};
use crate::domain::{UserId, UserRecord};

pub use file::JsonFileStore;
pub use memory::InMemoryUserStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Load-by-id / save-whole-record storage of user records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn load(&self, id: UserId) -> Result<Option<UserRecord>, StoreError>;
    async fn save(&self, record: UserRecord) -> Result<UserRecord, StoreError>;
}

pub struct Repositories {
    pub users: Arc<dyn UserStore>,
}

impl Repositories {
    pub async fn new(cfg: &StoreConfig) -> Result<Self> {
        let users: Arc<dyn UserStore> = match cfg.backend {
            StoreBackend::Memory => Arc::new(InMemoryUserStore::default()),
            StoreBackend::File => Arc::new(JsonFileStore::open(&cfg.path).await?),
        };
        info!(backend = ?cfg.backend, "user store ready");
        Ok(Self { users })
    }

    pub fn with_store(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }
}
