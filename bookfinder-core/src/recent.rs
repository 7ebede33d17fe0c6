//! Recently viewed books, most recent first
//!
//! The list is never capped or expired. Storage faults never reach the caller:
//! reads degrade to an empty list and failed writes return an empty list.
//! Individual malformed records are skipped on read.

use crate::error::StorageError;
use crate::storage::StorageProvider;
use crate::types::ViewedBookRecord;
use std::sync::Arc;

/// Storage key holding the JSON-encoded list
pub const STORAGE_KEY: &str = "previously-viewed-books";

/// Store for the recently viewed list
#[derive(Clone)]
pub struct RecentlyViewed {
    storage: Arc<dyn StorageProvider>,
}

impl RecentlyViewed {
    pub fn new(storage: Arc<dyn StorageProvider>) -> Self {
        Self { storage }
    }

    /// Load the list; absent, unreadable, or malformed storage yields an empty list
    pub fn load(&self) -> Vec<ViewedBookRecord> {
        let raw = match self.storage.read(STORAGE_KEY) {
            Ok(raw) => raw,
            Err(StorageError::NotFound(_)) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read recently viewed books: {}", e);
                return Vec::new();
            }
        };

        let entries: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Ignoring malformed recently viewed list: {}", e);
                return Vec::new();
            }
        };

        // a bad record costs only itself
        entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("Skipping malformed recently viewed record: {}", e);
                    None
                }
            })
            .collect()
    }

    /// Move `record` to the head of the list and persist it
    ///
    /// An empty return value means persistence failed and the stored list is
    /// in an unknown state, not that the list is empty.
    pub fn upsert(&self, record: ViewedBookRecord) -> Vec<ViewedBookRecord> {
        match self.try_upsert(record) {
            Ok(records) => records,
            Err(e) => {
                tracing::error!("Failed to save recently viewed books: {}", e);
                Vec::new()
            }
        }
    }

    /// Forget every viewed book
    pub fn clear(&self) -> crate::Result<()> {
        match self.storage.delete(STORAGE_KEY) {
            Ok(()) | Err(StorageError::NotFound(_)) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn try_upsert(&self, record: ViewedBookRecord) -> Result<Vec<ViewedBookRecord>, StorageError> {
        let mut records = self.load();
        records.retain(|r| r.book_id != record.book_id);
        tracing::debug!(book_id = %record.book_id, "Recording viewed book");
        records.insert(0, record);

        let json = serde_json::to_string(&records)?;
        self.storage.write(STORAGE_KEY, &json)?;
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, StorageResult};
    use chrono::{Duration, TimeZone, Utc};

    /// Storage whose writes always fail, as with an exhausted quota
    struct FullStorage(MemoryStorage);

    impl StorageProvider for FullStorage {
        fn read(&self, key: &str) -> StorageResult<String> {
            self.0.read(key)
        }

        fn write(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::BackendError("quota exceeded".to_string()))
        }

        fn delete(&self, key: &str) -> StorageResult<()> {
            self.0.delete(key)
        }

        fn exists(&self, key: &str) -> StorageResult<bool> {
            self.0.exists(key)
        }
    }

    fn record(id: &str, minutes: i64) -> ViewedBookRecord {
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        ViewedBookRecord::new(
            id,
            format!("Title {}", id),
            "Author",
            base + Duration::minutes(minutes),
        )
    }

    fn store() -> (RecentlyViewed, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        (RecentlyViewed::new(storage.clone()), storage)
    }

    #[test]
    fn test_load_without_storage_entry() {
        let (recent, _) = store();
        assert!(recent.load().is_empty());
    }

    #[test]
    fn test_load_invalid_json() {
        let (recent, storage) = store();
        storage.write(STORAGE_KEY, "{not json").unwrap();
        assert!(recent.load().is_empty());

        storage.write(STORAGE_KEY, r#"{"bookId": "OL1W"}"#).unwrap();
        assert!(recent.load().is_empty());
    }

    #[test]
    fn test_upsert_prepends() {
        let (recent, _) = store();
        recent.upsert(record("OL1W", 0));
        let records = recent.upsert(record("OL2W", 1));

        let ids: Vec<_> = records.iter().map(|r| r.book_id.as_str()).collect();
        assert_eq!(ids, ["OL2W", "OL1W"]);
        assert_eq!(recent.load(), records);
    }

    #[test]
    fn test_upsert_is_idempotent_by_book_id() {
        let (recent, _) = store();
        recent.upsert(record("OL1W", 0));
        recent.upsert(record("OL2W", 1));
        let records = recent.upsert(record("OL1W", 2));

        assert_eq!(records.len(), 2);
        assert_eq!(records[0], record("OL1W", 2));
        assert_eq!(records.iter().filter(|r| r.book_id == "OL1W").count(), 1);
    }

    #[test]
    fn test_malformed_record_does_not_discard_the_rest() {
        let (recent, storage) = store();
        storage
            .write(
                STORAGE_KEY,
                r#"[
                    {"bookId": "OL1W", "title": "A", "author": "X", "viewedAt": "2024-05-01T10:00:00Z"},
                    {"bookId": "OL2W", "title": "B", "author": "Y", "viewedAt": "last tuesday"},
                    {"bookId": "OL3W", "title": "C", "author": "Z", "viewedAt": "2024-05-01T09:00:00Z"}
                ]"#,
            )
            .unwrap();

        let ids: Vec<_> = recent.load().into_iter().map(|r| r.book_id).collect();
        assert_eq!(ids, ["OL1W", "OL3W"]);

        let records = recent.upsert(record("OL4W", 0));
        let ids: Vec<_> = records.iter().map(|r| r.book_id.as_str()).collect();
        assert_eq!(ids, ["OL4W", "OL1W", "OL3W"]);
    }

    #[test]
    fn test_upsert_over_malformed_storage_starts_fresh() {
        let (recent, storage) = store();
        storage.write(STORAGE_KEY, "garbage").unwrap();
        let records = recent.upsert(record("OL1W", 0));
        assert_eq!(records, vec![record("OL1W", 0)]);
    }

    #[test]
    fn test_upsert_persistence_failure_returns_empty() {
        let recent = RecentlyViewed::new(Arc::new(FullStorage(MemoryStorage::new())));
        assert!(recent.upsert(record("OL1W", 0)).is_empty());
    }

    #[test]
    fn test_clear() {
        let (recent, _) = store();
        recent.clear().unwrap();
        recent.upsert(record("OL1W", 0));
        recent.clear().unwrap();
        assert!(recent.load().is_empty());
    }

    #[test]
    fn test_list_is_not_capped() {
        let (recent, _) = store();
        for i in 0..250 {
            recent.upsert(record(&format!("OL{}W", i), i));
        }
        let records = recent.load();
        assert_eq!(records.len(), 250);
        assert_eq!(records[0].book_id, "OL249W");
    }
}
