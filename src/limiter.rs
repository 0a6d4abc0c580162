//! The limiter callers interact with: a store plus the decision policy.
//!
//! All methods are advisory and fail-open. A store that cannot be read is
//! treated as holding no record, and a failed write only costs persistence of
//! the current attempt; neither ever surfaces as an error to the caller.

use std::time::Duration;

use chrono::Utc;
use tracing::warn;

use crate::config::RateLimitConfig;
use crate::file::FileStore;
use crate::memory::InMemoryStore;
use crate::policy::{self, RateLimitRecord, RateLimitStatus};
use crate::store::BoxedStore;

/// Course-generation rate limiter over a pluggable store.
pub struct RateLimiter {
    store: BoxedStore,
    config: RateLimitConfig,
}

impl RateLimiter {
    /// Create a limiter over an injected store.
    pub fn new(store: BoxedStore, config: RateLimitConfig) -> Self {
        Self { store, config }
    }

    /// Limiter persisting to the default per-user state file.
    pub fn file_backed(config: RateLimitConfig) -> Self {
        Self::new(Box::new(FileStore::new(FileStore::default_path())), config)
    }

    /// Ephemeral limiter holding state in process memory.
    pub fn in_memory(config: RateLimitConfig) -> Self {
        Self::new(Box::new(InMemoryStore::new()), config)
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    fn now_ms() -> i64 {
        Utc::now().timestamp_millis()
    }

    /// Decide whether a new attempt may proceed right now.
    pub async fn check(&self) -> RateLimitStatus {
        self.check_at(Self::now_ms()).await
    }

    /// [`check`](Self::check) with an explicit clock, for deterministic tests.
    pub async fn check_at(&self, now: i64) -> RateLimitStatus {
        let record = self.load_or_none().await;
        policy::evaluate(now, record.as_ref(), &self.config)
    }

    /// Count one attempt against the limit, returning the persisted record.
    pub async fn record(&self) -> RateLimitRecord {
        self.record_at(Self::now_ms()).await
    }

    /// [`record`](Self::record) with an explicit clock.
    pub async fn record_at(&self, now: i64) -> RateLimitRecord {
        let record = self.load_or_none().await;
        let updated = policy::record_attempt(now, record.as_ref(), &self.config);
        if let Err(e) = self.store.save(&updated).await {
            // The decision for this call stands; only persistence is lost.
            warn!("Failed to persist rate limit state: {}", e);
        }
        updated
    }

    /// Reset to the never-attempted state.
    pub async fn clear(&self) {
        if let Err(e) = self.store.clear().await {
            warn!("Failed to clear rate limit state: {}", e);
        }
    }

    /// Time until the current window or cooldown resets, `None` once elapsed.
    pub async fn time_until_reset(&self) -> Option<Duration> {
        let now = Self::now_ms();
        let status = self.check_at(now).await;
        let remaining = status.reset_time? - now;
        (remaining > 0).then(|| Duration::from_millis(remaining as u64))
    }

    async fn load_or_none(&self) -> Option<RateLimitRecord> {
        match self.store.load().await {
            Ok(record) => record,
            Err(e) => {
                warn!("Failed to load rate limit state, treating as absent: {}", e);
                None
            }
        }
    }
}
