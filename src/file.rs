//! File-backed limiter store.
//!
//! Persists the single record as one JSON object in one file, scoped to the
//! user profile: it survives restarts but is not shared across machines.
//! There is no cross-process locking; two processes recording "at once" can
//! under- or over-count by one attempt, which is an accepted limitation of
//! this advisory limiter.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::warn;

use crate::policy::RateLimitRecord;
use crate::store::{RateLimitStore, StoreResult};

/// Fixed state file name, the single key the record lives under.
pub const STATE_FILE: &str = "course_generation_rate_limit.json";

/// File-backed limiter store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store at an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store using the fixed state file name under `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(STATE_FILE))
    }

    /// Default location under the per-user data directory.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("courselimit")
            .join(STATE_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RateLimitStore for FileStore {
    async fn load(&self) -> StoreResult<Option<RateLimitRecord>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&contents) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                // Corrupt state self-heals into "never attempted".
                warn!(
                    "Discarding unparsable rate limit state at {}: {}",
                    self.path.display(),
                    e
                );
                Ok(None)
            }
        }
    }

    async fn save(&self, record: &RateLimitRecord) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string(record)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }

    async fn clear(&self) -> StoreResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_returns_none_without_file() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::in_dir(dir.path());
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_state_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let record = RateLimitRecord {
            attempts: 3,
            window_start: 100,
            cooldown_start: Some(120),
        };

        {
            let store = FileStore::in_dir(dir.path());
            store.save(&record).await.unwrap();
        }

        let store = FileStore::in_dir(dir.path());
        assert_eq!(store.load().await.unwrap(), Some(record));
    }

    #[tokio::test]
    async fn test_corrupt_state_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::in_dir(dir.path());
        tokio::fs::write(store.path(), "not valid json{").await.unwrap();

        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("state").join(STATE_FILE));

        store.save(&RateLimitRecord::new(0)).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(RateLimitRecord::new(0)));
    }

    #[tokio::test]
    async fn test_clear_removes_file_and_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::in_dir(dir.path());
        store.save(&RateLimitRecord::new(0)).await.unwrap();

        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);

        // Clearing an already-empty store is not an error.
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_stored_bytes_are_stable_across_rewrite() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::in_dir(dir.path());
        let record = RateLimitRecord {
            attempts: 2,
            window_start: 50,
            cooldown_start: None,
        };

        store.save(&record).await.unwrap();
        let first = tokio::fs::read(store.path()).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        store.save(&loaded).await.unwrap();
        let second = tokio::fs::read(store.path()).await.unwrap();

        assert_eq!(first, second);
    }
}
