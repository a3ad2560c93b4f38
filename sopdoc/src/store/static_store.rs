//! Read-only dataset bundled into the binary
//!
//! The default SOP set ships as TOML files compiled in with `include_str!`.
//! The static store serves it as-is and rejects every mutation: callers must
//! seed a mutable store first.

use super::{SopStore, StoreError};
use crate::content_model::{Document, Tab, TabPatch};
use serde::Deserialize;

/// One bundled dataset file: a tab and its document
#[derive(Debug, Deserialize)]
struct DatasetFile {
    tab: Tab,
    document: Document,
}

/// The bundled dataset files, in tab order
const BUNDLED: &[&str] = &[
    include_str!("../dataset/technical.toml"),
    include_str!("../dataset/onboarding.toml"),
];

/// Immutable, in-memory document set
#[derive(Debug, Clone)]
pub struct StaticStore {
    tabs: Vec<Tab>,
    documents: Vec<Document>,
}

impl StaticStore {
    /// Parse the dataset compiled into the binary
    ///
    /// # Returns
    /// * `Ok(StaticStore)` - Dataset parsed
    /// * `Err(toml::de::Error)` - A bundled file is malformed
    pub fn bundled() -> Result<Self, toml::de::Error> {
        let mut tabs = Vec::new();
        let mut documents = Vec::new();
        for raw in BUNDLED {
            let file: DatasetFile = toml::from_str(raw)?;
            tabs.push(file.tab);
            documents.push(file.document);
        }
        Ok(Self { tabs, documents })
    }

    /// Build a static store from explicit parts (used by tests)
    pub fn from_parts(tabs: Vec<Tab>, documents: Vec<Document>) -> Self {
        Self { tabs, documents }
    }

    /// Clone the full dataset for seeding a mutable store
    pub fn dataset(&self) -> (Vec<Tab>, Vec<Document>) {
        (self.tabs.clone(), self.documents.clone())
    }
}

impl SopStore for StaticStore {
    fn has_sop_data(&self) -> Result<bool, StoreError> {
        Ok(!self.tabs.is_empty())
    }

    fn fetch_all_tabs(&self) -> Result<Vec<Tab>, StoreError> {
        Ok(self.tabs.clone())
    }

    fn fetch_document_by_tab_id(&self, tab_id: &str) -> Result<Option<Document>, StoreError> {
        Ok(self
            .documents
            .iter()
            .find(|doc| doc.tab_id == tab_id)
            .cloned())
    }

    fn create_tab(&mut self, _tab: Tab) -> Result<Tab, StoreError> {
        Err(StoreError::NotInitialized)
    }

    fn update_tab(&mut self, _id: &str, _patch: &TabPatch) -> Result<(), StoreError> {
        Err(StoreError::NotInitialized)
    }

    fn delete_tab(&mut self, _id: &str) -> Result<(), StoreError> {
        Err(StoreError::NotInitialized)
    }

    fn reorder_tabs(&mut self, _ids: &[String]) -> Result<(), StoreError> {
        Err(StoreError::NotInitialized)
    }

    fn create_document(&mut self, _doc: Document) -> Result<Document, StoreError> {
        Err(StoreError::NotInitialized)
    }

    fn update_document(&mut self, _doc: &Document) -> Result<(), StoreError> {
        Err(StoreError::NotInitialized)
    }

    fn seed_sop_data(
        &mut self,
        _tabs: Vec<Tab>,
        _documents: Vec<Document>,
    ) -> Result<(), StoreError> {
        Err(StoreError::NotInitialized)
    }
}
