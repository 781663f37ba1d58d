//! In-memory backend
//!
//! Keeps documents in a map instead of on disk. Used by tests and by
//! callers who want a throwaway store without a data directory.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{Error, Result};

use super::StorageBackend;

/// Stores container documents in process memory
#[derive(Default)]
pub struct MemoryBackend {
    documents: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend seeded with existing documents
    pub fn with_documents(documents: HashMap<String, String>) -> Self {
        Self {
            documents: RwLock::new(documents),
        }
    }
}

impl StorageBackend for MemoryBackend {
    fn save(&self, key: &str, document: &str) -> Result<()> {
        let mut documents = self
            .documents
            .write()
            .map_err(|e| Error::Storage(format!("Failed to acquire write lock: {}", e)))?;

        documents.insert(key.to_string(), document.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>> {
        let documents = self
            .documents
            .read()
            .map_err(|e| Error::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(documents.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_backend_loads_nothing() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.load("transactions").unwrap(), None);
    }

    #[test]
    fn test_save_and_load() {
        let backend = MemoryBackend::new();

        backend.save("savings", r#"{"savings": []}"#).unwrap();

        assert_eq!(
            backend.load("savings").unwrap().as_deref(),
            Some(r#"{"savings": []}"#)
        );
    }

    #[test]
    fn test_save_replaces_previous_document() {
        let backend = MemoryBackend::new();

        backend.save("savings", "first").unwrap();
        backend.save("savings", "second").unwrap();

        assert_eq!(backend.load("savings").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_with_documents() {
        let mut seeded = HashMap::new();
        seeded.insert("transactions".to_string(), "{}".to_string());

        let backend = MemoryBackend::with_documents(seeded);

        assert_eq!(backend.load("transactions").unwrap().as_deref(), Some("{}"));
        assert_eq!(backend.load("savings").unwrap(), None);
    }
}
