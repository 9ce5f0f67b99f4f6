//! # Document Storage
//!
//! Persistence boundary for committed snapshots. The session hands the
//! current document to a store once the save debounce settles; the store
//! decides where it goes.

use funnel_document::{Document, DocumentError};
use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Where builder documents are loaded from and saved to
pub trait DocumentStore {
    /// Load the stored document, `None` if nothing has been saved yet
    fn load(&self) -> Result<Option<Document>, StoreError>;

    fn save(&mut self, doc: &Document) -> Result<(), StoreError>;
}

/// Pretty-printed JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStore for JsonFileStore {
    fn load(&self) -> Result<Option<Document>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(Some(Document::from_json(&content)?))
    }

    fn save(&mut self, doc: &Document) -> Result<(), StoreError> {
        let json = doc.to_json_pretty()?;

        // Write next to the target and rename so readers never see a torn file
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// In-memory store. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<Document>>>,
    saves: Rc<Cell<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(doc: Document) -> Self {
        let store = Self::new();
        *store.slot.borrow_mut() = Some(doc);
        store
    }

    /// Last saved document
    pub fn saved(&self) -> Option<Document> {
        self.slot.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> Result<Option<Document>, StoreError> {
        Ok(self.slot.borrow().clone())
    }

    fn save(&mut self, doc: &Document) -> Result<(), StoreError> {
        *self.slot.borrow_mut() = Some(doc.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use funnel_document::initial_document;

    #[test]
    fn test_json_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("funnels.json"));

        assert!(store.load().unwrap().is_none());

        let doc = initial_document();
        store.save(&doc).unwrap();
        assert_eq!(store.load().unwrap(), Some(doc));
        assert!(!dir.path().join("funnels.json.tmp").exists());
    }

    #[test]
    fn test_json_file_store_rejects_invalid_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("funnels.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Document(_))));
    }

    #[test]
    fn test_memory_store_clones_share_slot() {
        let store = MemoryStore::new();
        let mut writer = store.clone();

        writer.save(&initial_document()).unwrap();
        assert_eq!(store.saved(), Some(initial_document()));
        assert_eq!(store.save_count(), 1);
    }
}
