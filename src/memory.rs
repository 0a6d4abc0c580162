//! In-memory limiter store for single-process operation.
//!
//! Fast, lock-based store holding the record in process memory. State is not
//! persisted across restarts; use it in tests and embedded callers that do
//! not want a file on disk.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::policy::RateLimitRecord;
use crate::store::{RateLimitStore, StoreResult};

/// In-memory limiter store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    record: Arc<RwLock<Option<RateLimitRecord>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RateLimitStore for InMemoryStore {
    async fn load(&self) -> StoreResult<Option<RateLimitRecord>> {
        Ok(self.record.read().await.clone())
    }

    async fn save(&self, record: &RateLimitRecord) -> StoreResult<()> {
        *self.record.write().await = Some(record.clone());
        Ok(())
    }

    async fn clear(&self) -> StoreResult<()> {
        *self.record.write().await = None;
        Ok(())
    }
}
