//! In-memory mutable store
//!
//! Backs unit and integration tests; `fail_writes` turns every mutation into
//! an `Unavailable` error without touching stored data, which is exactly the
//! failure shape the synchronization controller has to roll back from.

use super::{apply_reorder, SopStore, StoreError};
use crate::content_model::{Document, Tab, TabPatch};
use std::collections::HashMap;

/// Mutable store held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    tabs: Vec<Tab>,
    documents: HashMap<String, Document>,
    /// When set, every mutating call fails without changing state
    pub fail_writes: bool,
    /// When set, tab and document fetches fail; the `has_sop_data` probe
    /// still answers so authority can be established with fetches down
    pub fail_reads: bool,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes {
            Err(StoreError::Unavailable("injected write failure".to_string()))
        } else {
            Ok(())
        }
    }

    fn check_readable(&self) -> Result<(), StoreError> {
        if self.fail_reads {
            Err(StoreError::Unavailable("injected read failure".to_string()))
        } else {
            Ok(())
        }
    }
}

impl SopStore for MemoryStore {
    fn has_sop_data(&self) -> Result<bool, StoreError> {
        Ok(!self.tabs.is_empty())
    }

    fn fetch_all_tabs(&self) -> Result<Vec<Tab>, StoreError> {
        self.check_readable()?;
        Ok(self.tabs.clone())
    }

    fn fetch_document_by_tab_id(&self, tab_id: &str) -> Result<Option<Document>, StoreError> {
        self.check_readable()?;
        Ok(self.documents.get(tab_id).cloned())
    }

    fn create_tab(&mut self, tab: Tab) -> Result<Tab, StoreError> {
        self.check_writable()?;
        if self.tabs.iter().any(|t| t.id == tab.id) {
            return Err(StoreError::DuplicateId(tab.id));
        }
        self.tabs.push(tab.clone());
        Ok(tab)
    }

    fn update_tab(&mut self, id: &str, patch: &TabPatch) -> Result<(), StoreError> {
        self.check_writable()?;
        let tab = self
            .tabs
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        tab.apply(patch);
        Ok(())
    }

    fn delete_tab(&mut self, id: &str) -> Result<(), StoreError> {
        self.check_writable()?;
        let before = self.tabs.len();
        self.tabs.retain(|t| t.id != id);
        if self.tabs.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.documents.remove(id);
        Ok(())
    }

    fn reorder_tabs(&mut self, ids: &[String]) -> Result<(), StoreError> {
        self.check_writable()?;
        apply_reorder(&mut self.tabs, ids);
        Ok(())
    }

    fn create_document(&mut self, doc: Document) -> Result<Document, StoreError> {
        self.check_writable()?;
        if !self.tabs.iter().any(|t| t.id == doc.tab_id) {
            return Err(StoreError::NotFound(doc.tab_id));
        }
        if self.documents.contains_key(&doc.tab_id) {
            return Err(StoreError::DuplicateId(doc.tab_id));
        }
        self.documents.insert(doc.tab_id.clone(), doc.clone());
        Ok(doc)
    }

    fn update_document(&mut self, doc: &Document) -> Result<(), StoreError> {
        self.check_writable()?;
        if !self.documents.contains_key(&doc.tab_id) {
            return Err(StoreError::NotFound(doc.tab_id.clone()));
        }
        self.documents.insert(doc.tab_id.clone(), doc.clone());
        Ok(())
    }

    fn seed_sop_data(
        &mut self,
        tabs: Vec<Tab>,
        documents: Vec<Document>,
    ) -> Result<(), StoreError> {
        self.check_writable()?;
        if !self.tabs.is_empty() {
            return Err(StoreError::DuplicateId("sop dataset".to_string()));
        }
        self.documents = documents
            .into_iter()
            .map(|doc| (doc.tab_id.clone(), doc))
            .collect();
        self.tabs = tabs;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(id: &str) -> Tab {
        Tab {
            id: id.to_string(),
            label: id.to_string(),
            icon: String::new(),
            description: String::new(),
        }
    }

    #[test]
    fn test_fail_writes_leaves_state_untouched() {
        let mut store = MemoryStore::new();
        store.create_tab(tab("a")).unwrap();

        store.fail_writes = true;
        assert!(matches!(
            store.create_tab(tab("b")),
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(
            store.delete_tab("a"),
            Err(StoreError::Unavailable(_))
        ));

        // Reads still work and see the pre-failure state
        assert_eq!(store.fetch_all_tabs().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_tab_cascades() {
        let mut store = MemoryStore::new();
        store.create_tab(tab("a")).unwrap();
        store
            .create_document(Document {
                id: "doc-a".to_string(),
                tab_id: "a".to_string(),
                title: "A".to_string(),
                description: String::new(),
                version: String::new(),
                last_updated: String::new(),
                sections: Vec::new(),
            })
            .unwrap();

        store.delete_tab("a").unwrap();
        assert!(store.fetch_document_by_tab_id("a").unwrap().is_none());
    }
}
