//! # taxon-store
//!
//! Durable storage for the taxon history log.
//!
//! The log is one JSON file in the application data directory: a bounded,
//! most-recent-first sequence of past single-query searches. Writes go through
//! a temp file and rename so a crash mid-write never leaves a truncated slot.
//!
//! The read-prepend-write update is not atomic across concurrent writers;
//! simultaneous submissions can lose an entry. Accepted for the expected
//! single-user usage rather than worth file locking.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use taxon_core::defaults::HISTORY_CAP;
use taxon_core::{defaults, Error, HistoryItem, HistoryStore, Result};

/// History log persisted to a single JSON file.
pub struct FileHistoryStore {
    path: PathBuf,
}

impl FileHistoryStore {
    /// Open a store backed by `path`. The file is created lazily on the first
    /// record; a missing file reads as an empty log.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Open the default store in the platform data directory.
    ///
    /// `TAXON_DATA_DIR` overrides the location; otherwise the platform data
    /// directory (falling back to the current directory) is used.
    pub fn from_env() -> Self {
        let dir = std::env::var("TAXON_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(defaults::DATA_DIR_NAME)
            });
        Self::open(dir.join(defaults::HISTORY_FILE))
    }

    /// Path of the underlying slot.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<HistoryItem>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::History(format!("failed to read history: {}", e))),
        };

        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(e) => {
                // A corrupt slot is not worth failing every search over; start fresh.
                warn!(path = %self.path.display(), error = %e, "History slot unreadable, resetting");
                Ok(Vec::new())
            }
        }
    }

    /// Replace the whole stored sequence. Temp file + rename keeps the slot
    /// readable at every instant.
    async fn persist(&self, items: &[HistoryItem]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::History(format!("failed to create data dir: {}", e)))?;
        }

        let json = serde_json::to_string_pretty(items)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| Error::History(format!("failed to write history: {}", e)))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| Error::History(format!("failed to replace history: {}", e)))?;
        Ok(())
    }
}

#[async_trait]
impl HistoryStore for FileHistoryStore {
    #[instrument(skip(self, item), fields(subsystem = "store", component = "history", op = "record"))]
    async fn record(&self, item: HistoryItem) -> Result<()> {
        let mut items = self.load().await?;
        items.insert(0, item);
        items.truncate(HISTORY_CAP);
        self.persist(&items).await?;
        debug!(count = items.len(), "History item recorded");
        Ok(())
    }

    async fn read(&self) -> Result<Vec<HistoryItem>> {
        self.load().await
    }

    async fn clear(&self) -> Result<()> {
        self.persist(&[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taxon_core::CategoryHint;

    fn store_in(dir: &tempfile::TempDir) -> FileHistoryStore {
        FileHistoryStore::open(dir.path().join("history.json"))
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.read().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recorded_item_reads_back_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let item = HistoryItem::new("Frozen french fries", CategoryHint::Goods);
        store.record(item.clone()).await.unwrap();

        let read = store.read().await.unwrap();
        assert_eq!(read.len(), 1);
        assert_eq!(read[0], item);
    }

    #[tokio::test]
    async fn test_log_is_most_recent_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        for i in 0..3 {
            store
                .record(HistoryItem::new(format!("query {}", i), CategoryHint::AutoDetect))
                .await
                .unwrap();
        }

        let read = store.read().await.unwrap();
        assert_eq!(read[0].query, "query 2");
        assert_eq!(read[2].query, "query 0");
    }

    #[tokio::test]
    async fn test_log_truncates_to_cap_evicting_oldest() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        for i in 0..20 {
            store
                .record(HistoryItem::new(format!("query {}", i), CategoryHint::AutoDetect))
                .await
                .unwrap();
        }

        let read = store.read().await.unwrap();
        assert_eq!(read.len(), HISTORY_CAP);
        assert_eq!(read[0].query, "query 19");
        // The 4 oldest (0-3) are gone; the oldest survivor is query 4.
        assert_eq!(read.last().unwrap().query, "query 4");
    }

    #[tokio::test]
    async fn test_log_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let store = FileHistoryStore::open(&path);
        store
            .record(HistoryItem::new("Solar cookers", CategoryHint::Goods))
            .await
            .unwrap();
        drop(store);

        let reopened = FileHistoryStore::open(&path);
        let read = reopened.read().await.unwrap();
        assert_eq!(read.len(), 1);
        assert_eq!(read[0].query, "Solar cookers");
    }

    #[tokio::test]
    async fn test_clear_resets_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store
            .record(HistoryItem::new("Namkeens", CategoryHint::Goods))
            .await
            .unwrap();
        store.clear().await.unwrap();

        assert!(store.read().await.unwrap().is_empty());
        // A cleared slot stays durable: reopening still reads empty.
        let reopened = FileHistoryStore::open(store.path());
        assert!(reopened.read().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_slot_resets_instead_of_failing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = FileHistoryStore::open(&path);
        assert!(store.read().await.unwrap().is_empty());

        store
            .record(HistoryItem::new("Carton boxes", CategoryHint::Goods))
            .await
            .unwrap();
        assert_eq!(store.read().await.unwrap().len(), 1);
    }
}
