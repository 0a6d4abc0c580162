//! Pluggable storage seam for limiter state.
//!
//! The store holds at most one [`RateLimitRecord`] per profile. Injecting it
//! as a trait lets callers swap the file-backed store for an in-memory one in
//! tests and embedded use.

use async_trait::async_trait;

use crate::policy::RateLimitRecord;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from limiter storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Trait for limiter state storage.
///
/// `load` must report unparsable persisted data as `Ok(None)` rather than an
/// error, so a corrupt store self-heals into the never-attempted state.
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Read the stored record, `None` if absent or unparsable.
    async fn load(&self) -> StoreResult<Option<RateLimitRecord>>;

    /// Overwrite the stored record.
    async fn save(&self, record: &RateLimitRecord) -> StoreResult<()>;

    /// Remove the record, resetting to the never-attempted state.
    async fn clear(&self) -> StoreResult<()>;
}

/// Owned trait object for store injection.
pub type BoxedStore = Box<dyn RateLimitStore>;
