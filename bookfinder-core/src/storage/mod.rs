//! On-device key/value storage
//!
//! Access is synchronous; every call completes before it returns.

use crate::error::StorageError;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{PoisonError, RwLock};

/// Result type for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Abstract storage provider trait
pub trait StorageProvider: Send + Sync {
    /// Read the value stored under `key`
    fn read(&self, key: &str) -> StorageResult<String>;

    /// Replace the value stored under `key`
    fn write(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove the value stored under `key`
    fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check if a value exists under `key`
    fn exists(&self, key: &str) -> StorageResult<bool>;
}

/// Local filesystem storage provider, one JSON file per key
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    /// Create a new local storage provider with the given root directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of this store
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a key to its file, rejecting keys that escape the root
    fn full_path(&self, key: &str) -> StorageResult<PathBuf> {
        let mut normalized = PathBuf::new();
        for component in Path::new(key).components() {
            match component {
                Component::Normal(c) => normalized.push(c),
                Component::CurDir => {}
                Component::ParentDir | Component::Prefix(_) | Component::RootDir => {
                    return Err(StorageError::BackendError(
                        "Path traversal attempt detected".to_string(),
                    ));
                }
            }
        }
        if normalized.as_os_str().is_empty() {
            return Err(StorageError::BackendError("Empty storage key".to_string()));
        }

        normalized.set_extension("json");
        Ok(self.root.join(normalized))
    }
}

impl StorageProvider for LocalStorage {
    fn read(&self, key: &str) -> StorageResult<String> {
        let path = self.full_path(key)?;
        Ok(std::fs::read_to_string(path)?)
    }

    /// Writes to a temp file then renames to avoid partial writes
    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.full_path(key)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, value)?;
        std::fs::rename(&temp_path, &path)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        let path = self.full_path(key)?;
        Ok(std::fs::remove_file(path)?)
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        let path = self.full_path(key)?;
        Ok(path.try_exists()?)
    }
}

/// In-memory storage provider (for testing)
#[derive(Default)]
pub struct MemoryStorage {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageProvider for MemoryStorage {
    fn read(&self, key: &str) -> StorageResult<String> {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        self.data
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        self.data
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
            .ok_or_else(|| StorageError::NotFound(key.to_string()))?;
        Ok(())
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self
            .data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new();

        storage.write("recent", "[]").unwrap();
        assert_eq!(storage.read("recent").unwrap(), "[]");
        assert!(storage.exists("recent").unwrap());
        assert!(!storage.exists("missing").unwrap());

        storage.delete("recent").unwrap();
        assert!(matches!(storage.read("recent"), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_local_storage() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("nested"));

        assert!(matches!(storage.read("recent"), Err(StorageError::NotFound(_))));

        storage.write("recent", r#"[{"a":1}]"#).unwrap();
        assert_eq!(storage.read("recent").unwrap(), r#"[{"a":1}]"#);
        assert!(temp_dir.path().join("nested/recent.json").exists());
        assert!(!temp_dir.path().join("nested/recent.json.tmp").exists());

        storage.delete("recent").unwrap();
        assert!(!storage.exists("recent").unwrap());
    }

    #[test]
    fn test_local_storage_rejects_traversal() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        assert!(storage.write("../escape", "x").is_err());
        assert!(storage.read("/etc/passwd").is_err());
        assert!(storage.read("").is_err());
    }
}
