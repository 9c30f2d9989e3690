//! File-backed key/value storage.
//!
//! Each namespace maps to a directory; each key maps to a `{key}.json`
//! file inside it. Used for the persisted session profile and theme
//! preference. No schema versioning.

use std::path::{Path, PathBuf};
use std::{fs, io};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to create storage directory: {0}")]
    CreateDir(#[source] io::Error),
    #[error("Failed to write to storage: {0}")]
    Write(#[source] io::Error),
    #[error("Failed to delete from storage: {0}")]
    Delete(#[source] io::Error),
    #[error("Failed to clear storage: {0}")]
    Clear(#[source] io::Error),
}

/// A namespaced store rooted at one directory.
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Open the store for a namespace under the platform data directory,
    /// falling back to a relative `cache/` root when that is unavailable.
    pub fn open(namespace: &str) -> Self {
        let safe_namespace = sanitize_namespace(namespace);

        let root = match dirs::data_local_dir() {
            Some(data_dir) => data_dir
                .join("etecnotes")
                .join("app_data")
                .join(safe_namespace),
            None => PathBuf::from("cache").join("app_data").join(safe_namespace),
        };

        Self { root }
    }

    /// Pin the store to an explicit root. Used by tests.
    pub fn open_at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn file_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", sanitize_key(key)))
    }

    pub fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.file_path(key)).ok()
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root).map_err(StorageError::CreateDir)?;
        fs::write(self.file_path(key), value).map_err(StorageError::Write)
    }

    pub fn delete(&self, key: &str) -> Result<(), StorageError> {
        let file_path = self.file_path(key);
        if file_path.exists() {
            fs::remove_file(file_path).map_err(StorageError::Delete)?;
        }
        Ok(())
    }

    pub fn keys(&self) -> Vec<String> {
        if !self.root.exists() {
            return Vec::new();
        }
        fs::read_dir(&self.root)
            .ok()
            .map(|entries| {
                entries
                    .flatten()
                    .filter_map(|entry| {
                        let path = entry.path();
                        if path.extension().and_then(|e| e.to_str()) == Some("json") {
                            path.file_stem()
                                .and_then(|s| s.to_str())
                                .map(|s| s.to_string())
                        } else {
                            None
                        }
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        if self.root.exists() {
            fs::remove_dir_all(&self.root).map_err(StorageError::Clear)?;
        }
        Ok(())
    }
}

/// Sanitize a namespace for filesystem use
fn sanitize_namespace(namespace: &str) -> String {
    namespace
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Sanitize a storage key for filesystem use
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .take(64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_namespace() {
        assert_eq!(sanitize_namespace("etecnotes"), "etecnotes");
        assert_eq!(sanitize_namespace("my app!@#"), "my_app___");
        assert_eq!(sanitize_namespace("/path/to/file"), "_path_to_file");
    }

    #[test]
    fn test_sanitize_key() {
        assert_eq!(sanitize_key("user"), "user");
        assert_eq!(sanitize_key("user:preferences"), "user_preferences");
        let long: String = "k".repeat(100);
        assert_eq!(sanitize_key(&long).len(), 64);
    }
}
