//! Store adapters for tabs and documents
//!
//! The trait mirrors the hosted backend's request/response surface; the crate
//! ships three implementations behind it: a read-only dataset bundled at
//! build time, a JSON-file store for a workspace directory, and an in-memory
//! store used by tests.

// Submodules
mod json_file;
mod memory;
mod static_store;

// Re-export public types
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use static_store::StaticStore;

use crate::content_model::{Document, Tab, TabPatch};
use thiserror::Error;

/// Errors surfaced by store adapters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A tab or document with this id already exists
    #[error("a record with id '{0}' already exists")]
    DuplicateId(String),

    /// No tab or document with this id
    #[error("no record with id '{0}'")]
    NotFound(String),

    /// The active store is the read-only bundled dataset
    #[error("store is read-only; initialize the remote store first")]
    NotInitialized,

    /// The adapter failed (I/O, backend, malformed payload); non-fatal to
    /// the caller, which rolls back by reloading
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// The store contract for SOP tabs and documents
///
/// All methods are request/response operations that may fail with a reported,
/// non-fatal [`StoreError`]. Deleting a tab cascades to its document; that is
/// the one cascading delete the system upholds.
pub trait SopStore {
    /// Whether any tabs exist in this store
    fn has_sop_data(&self) -> Result<bool, StoreError>;

    /// All tabs in their persisted order
    fn fetch_all_tabs(&self) -> Result<Vec<Tab>, StoreError>;

    /// The document owned by `tab_id`, if one exists
    fn fetch_document_by_tab_id(&self, tab_id: &str) -> Result<Option<Document>, StoreError>;

    /// Append a new tab; fails with `DuplicateId` if the id is taken
    fn create_tab(&mut self, tab: Tab) -> Result<Tab, StoreError>;

    /// Apply a partial update to an existing tab
    fn update_tab(&mut self, id: &str, patch: &TabPatch) -> Result<(), StoreError>;

    /// Delete a tab and, transitively, its document
    fn delete_tab(&mut self, id: &str) -> Result<(), StoreError>;

    /// Persist a new total order; ids not listed keep their relative order
    /// at the end
    fn reorder_tabs(&mut self, ids: &[String]) -> Result<(), StoreError>;

    /// Create the document for a tab; at most one document per tab
    fn create_document(&mut self, doc: Document) -> Result<Document, StoreError>;

    /// Replace an existing document wholesale
    fn update_document(&mut self, doc: &Document) -> Result<(), StoreError>;

    /// Bulk-load the bundled dataset; used exactly once to bootstrap an
    /// empty store
    fn seed_sop_data(&mut self, tabs: Vec<Tab>, documents: Vec<Document>) -> Result<(), StoreError>;
}

/// Apply a reorder request to a tab list in place
///
/// Listed ids take the new order; unknown ids in the request are ignored and
/// unlisted tabs keep their relative order at the end. Shared by the mutable
/// store implementations.
pub(crate) fn apply_reorder(tabs: &mut Vec<Tab>, ids: &[String]) {
    let mut reordered = Vec::with_capacity(tabs.len());
    for id in ids {
        if let Some(pos) = tabs.iter().position(|t| &t.id == id) {
            reordered.push(tabs.remove(pos));
        }
    }
    reordered.append(tabs);
    *tabs = reordered;
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
    fn test_apply_reorder_moves_listed_ids() {
        let mut tabs = vec![tab("a"), tab("b"), tab("c")];
        apply_reorder(&mut tabs, &["c".to_string(), "a".to_string()]);
        let ids: Vec<&str> = tabs.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_apply_reorder_ignores_unknown_ids() {
        let mut tabs = vec![tab("a"), tab("b")];
        apply_reorder(&mut tabs, &["ghost".to_string(), "b".to_string()]);
        let ids: Vec<&str> = tabs.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
