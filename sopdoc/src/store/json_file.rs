//! Directory-backed JSON store
//!
//! The workspace stand-in for the hosted backend: tabs live in `tabs.json`
//! (array order is the persisted tab order), each document in
//! `documents/<tab_id>.json`. Every operation reads and rewrites whole files,
//! matching the backend's whole-record semantics.

use super::{apply_reorder, SopStore, StoreError};
use crate::content_model::{Document, Tab, TabPatch};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Mutable store rooted at a directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Open (or designate) a store rooted at `root`
    ///
    /// The directory is created lazily on the first write.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn tabs_path(&self) -> PathBuf {
        self.root.join("tabs.json")
    }

    fn document_path(&self, tab_id: &str) -> PathBuf {
        self.root.join("documents").join(format!("{}.json", tab_id))
    }

    fn load_tabs(&self) -> Result<Vec<Tab>, StoreError> {
        let path = self.tabs_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&path)
            .map_err(|e| StoreError::Unavailable(format!("reading {}: {}", path.display(), e)))?;
        serde_json::from_str(&raw)
            .map_err(|e| StoreError::Unavailable(format!("parsing {}: {}", path.display(), e)))
    }

    fn save_tabs(&self, tabs: &[Tab]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)
            .map_err(|e| StoreError::Unavailable(format!("creating store dir: {}", e)))?;
        let raw = serde_json::to_string_pretty(tabs)
            .map_err(|e| StoreError::Unavailable(format!("encoding tabs: {}", e)))?;
        fs::write(self.tabs_path(), raw)
            .map_err(|e| StoreError::Unavailable(format!("writing tabs: {}", e)))
    }

    fn save_document(&self, doc: &Document) -> Result<(), StoreError> {
        let path = self.document_path(&doc.tab_id);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StoreError::Unavailable(format!("creating documents dir: {}", e)))?;
        }
        let raw = serde_json::to_string_pretty(doc)
            .map_err(|e| StoreError::Unavailable(format!("encoding document: {}", e)))?;
        fs::write(&path, raw)
            .map_err(|e| StoreError::Unavailable(format!("writing {}: {}", path.display(), e)))
    }
}

impl SopStore for JsonFileStore {
    fn has_sop_data(&self) -> Result<bool, StoreError> {
        Ok(!self.load_tabs()?.is_empty())
    }

    fn fetch_all_tabs(&self) -> Result<Vec<Tab>, StoreError> {
        self.load_tabs()
    }

    fn fetch_document_by_tab_id(&self, tab_id: &str) -> Result<Option<Document>, StoreError> {
        let path = self.document_path(tab_id);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)
            .map_err(|e| StoreError::Unavailable(format!("reading {}: {}", path.display(), e)))?;
        let doc = serde_json::from_str(&raw)
            .map_err(|e| StoreError::Unavailable(format!("parsing {}: {}", path.display(), e)))?;
        Ok(Some(doc))
    }

    fn create_tab(&mut self, tab: Tab) -> Result<Tab, StoreError> {
        let mut tabs = self.load_tabs()?;
        if tabs.iter().any(|t| t.id == tab.id) {
            return Err(StoreError::DuplicateId(tab.id));
        }
        tabs.push(tab.clone());
        self.save_tabs(&tabs)?;
        Ok(tab)
    }

    fn update_tab(&mut self, id: &str, patch: &TabPatch) -> Result<(), StoreError> {
        let mut tabs = self.load_tabs()?;
        let tab = tabs
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        tab.apply(patch);
        self.save_tabs(&tabs)
    }

    fn delete_tab(&mut self, id: &str) -> Result<(), StoreError> {
        let mut tabs = self.load_tabs()?;
        let before = tabs.len();
        tabs.retain(|t| t.id != id);
        if tabs.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.save_tabs(&tabs)?;
        // Cascade: the tab's document goes with it
        let doc_path = self.document_path(id);
        if doc_path.exists() {
            fs::remove_file(&doc_path).map_err(|e| {
                StoreError::Unavailable(format!("removing {}: {}", doc_path.display(), e))
            })?;
        }
        debug!("deleted tab '{}' and its document", id);
        Ok(())
    }

    fn reorder_tabs(&mut self, ids: &[String]) -> Result<(), StoreError> {
        let mut tabs = self.load_tabs()?;
        apply_reorder(&mut tabs, ids);
        self.save_tabs(&tabs)
    }

    fn create_document(&mut self, doc: Document) -> Result<Document, StoreError> {
        let tabs = self.load_tabs()?;
        if !tabs.iter().any(|t| t.id == doc.tab_id) {
            return Err(StoreError::NotFound(doc.tab_id));
        }
        if self.document_path(&doc.tab_id).exists() {
            return Err(StoreError::DuplicateId(doc.tab_id));
        }
        self.save_document(&doc)?;
        Ok(doc)
    }

    fn update_document(&mut self, doc: &Document) -> Result<(), StoreError> {
        if !self.document_path(&doc.tab_id).exists() {
            return Err(StoreError::NotFound(doc.tab_id.clone()));
        }
        self.save_document(doc)
    }

    fn seed_sop_data(
        &mut self,
        tabs: Vec<Tab>,
        documents: Vec<Document>,
    ) -> Result<(), StoreError> {
        if self.has_sop_data()? {
            return Err(StoreError::DuplicateId("sop dataset".to_string()));
        }
        self.save_tabs(&tabs)?;
        for doc in &documents {
            self.save_document(doc)?;
        }
        debug!(
            "seeded store at {} with {} tabs",
            self.root.display(),
            tabs.len()
        );
        Ok(())
    }
}
