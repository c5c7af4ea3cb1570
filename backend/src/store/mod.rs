pub mod memory;
pub mod sql;

use std::sync::Arc;

use async_trait::async_trait;
use shared::models::{CreatePollRequest, Poll};
use tracing::info;
use uuid::Uuid;

use crate::config::{AppConfig, StoreKind};

pub use memory::MemoryPollStore;
pub use sql::SqlPollStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Poll not found")]
    NotFound,
    #[error("Database error: {0}")]
    Persistence(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Persistence(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Persistence(format!("corrupt option list: {}", e))
    }
}

/// Storage contract for polls and their vote ledgers. Implementations must be
/// thread-safe and behave identically from the caller's point of view.
#[async_trait]
pub trait PollStore: Send + Sync {
    /// Persist a new poll and a zeroed ledger entry per option, all or nothing.
    async fn create(&self, request: CreatePollRequest) -> Result<Poll, StoreError>;

    /// Current snapshot of one poll, including its ledger.
    async fn get(&self, id: Uuid) -> Result<Poll, StoreError>;

    /// Every poll, newest first.
    async fn get_all(&self) -> Result<Vec<Poll>, StoreError>;

    /// Remove a poll and its ledger. Fails with `NotFound` when the id is unknown.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;

    /// Record one ballot: bump the voter count and every declared option named
    /// in `options`. Undeclared names are ignored.
    async fn add_vote(&self, id: Uuid, options: &[String]) -> Result<(), StoreError>;

    /// Release backing resources on shutdown. Nothing to do for volatile stores.
    async fn close(&self) {}
}

pub async fn open_store(config: &AppConfig) -> Result<Arc<dyn PollStore>, StoreError> {
    match config.store {
        StoreKind::Memory => {
            info!("📋 Using in-memory poll store");
            Ok(Arc::new(MemoryPollStore::new()))
        }
        StoreKind::Sqlite => {
            info!("📋 Using SQLite poll store at {}", config.database_url);
            let store = SqlPollStore::connect(&config.database_url, config.max_connections).await?;
            Ok(Arc::new(store))
        }
    }
}
