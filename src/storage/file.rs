//! JSON file backend with atomic writes
//!
//! Each container document gets its own file under the data directory,
//! named `<key>.json`. Writes go through a temp file and rename so a crash
//! mid-write cannot corrupt previously saved data.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::DataPaths;
use crate::error::{Error, Result};

use super::StorageBackend;

/// Stores each container document as a pretty-printed JSON file
pub struct JsonFileBackend {
    data_dir: PathBuf,
}

impl JsonFileBackend {
    /// Create a backend rooted at the given data directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Create a backend rooted at the data directory described by `paths`
    ///
    /// Ensures the directories exist before any document is written.
    pub fn from_paths(paths: &DataPaths) -> Result<Self> {
        paths.ensure_directories()?;
        Ok(Self::new(paths.data_dir()))
    }

    /// Get the file path backing the given key
    pub fn document_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }

    /// Write a document atomically (write to temp, then rename)
    ///
    /// This ensures that the file is either completely written or not
    /// modified at all, preventing corruption on crashes or power failures.
    fn write_atomic(path: &Path, document: &str) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Storage(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        // Create temp file in same directory (important for atomic rename)
        let temp_path = path.with_extension("json.tmp");

        let file = File::create(&temp_path)
            .map_err(|e| Error::Storage(format!("Failed to create temp file: {}", e)))?;

        let mut writer = BufWriter::new(file);
        writer
            .write_all(document.as_bytes())
            .map_err(|e| Error::Storage(format!("Failed to write data: {}", e)))?;

        writer
            .flush()
            .map_err(|e| Error::Storage(format!("Failed to flush data: {}", e)))?;

        // Sync to disk before rename
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| Error::Storage(format!("Failed to sync data: {}", e)))?;

        // Atomic rename
        fs::rename(&temp_path, path).map_err(|e| {
            // Try to clean up temp file if rename fails
            let _ = fs::remove_file(&temp_path);
            Error::Storage(format!("Failed to rename temp file: {}", e))
        })?;

        Ok(())
    }
}

impl StorageBackend for JsonFileBackend {
    fn save(&self, key: &str, document: &str) -> Result<()> {
        Self::write_atomic(&self.document_path(key), document)
    }

    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.document_path(key);

        if !path.exists() {
            return Ok(None);
        }

        let document = fs::read_to_string(&path)
            .map_err(|e| Error::Storage(format!("Failed to read {}: {}", path.display(), e)))?;

        Ok(Some(document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_key_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(temp_dir.path());

        assert_eq!(backend.load("transactions").unwrap(), None);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(temp_dir.path());

        backend.save("savings", r#"{"savings": []}"#).unwrap();

        let loaded = backend.load("savings").unwrap();
        assert_eq!(loaded.as_deref(), Some(r#"{"savings": []}"#));
    }

    #[test]
    fn test_save_replaces_previous_document() {
        let temp_dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(temp_dir.path());

        backend.save("transactions", "first").unwrap();
        backend.save("transactions", "second").unwrap();

        assert_eq!(backend.load("transactions").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_key_maps_to_json_file() {
        let temp_dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(temp_dir.path());

        backend.save("incomeStreams", "{}").unwrap();

        assert!(temp_dir.path().join("incomeStreams.json").exists());
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(temp_dir.path());

        backend.save("savings", "{}").unwrap();

        assert!(temp_dir.path().join("savings.json").exists());
        assert!(!temp_dir.path().join("savings.json.tmp").exists());
    }

    #[test]
    fn test_creates_missing_data_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("data").join("tallybook");
        let backend = JsonFileBackend::new(&nested);

        backend.save("savings", "{}").unwrap();

        assert!(nested.join("savings.json").exists());
    }

    #[test]
    fn test_from_paths_uses_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DataPaths::with_base_dir(temp_dir.path().to_path_buf());
        let backend = JsonFileBackend::from_paths(&paths).unwrap();

        assert!(paths.data_dir().exists());

        backend.save("transactions", "{}").unwrap();
        assert!(paths.data_dir().join("transactions.json").exists());
    }
}
