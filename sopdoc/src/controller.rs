//! Synchronization controller
//!
//! Arbitrates between the bundled read-only dataset and a mutable store, and
//! keeps the session caches converged with whichever one is authoritative.
//! On open it probes the mutable store: if it holds data, that store is
//! authoritative and only the tab list is fetched eagerly; documents are
//! fetched lazily per tab and cached for the session. If it is empty, the
//! bundled dataset is served read-only until `initialize` seeds the store.
//!
//! Every mutation is optimistic: the cache changes first, the store call
//! follows, and a store failure is answered by re-fetching the affected
//! entry: rollback by reload rather than inverse-operation replay, so the
//! in-memory state always matches some snapshot the store could return.

use crate::content_model::{Document, Tab, TabPatch};
use crate::store::{SopStore, StaticStore, StoreError};
use log::{debug, info, warn};
use std::collections::HashMap;

/// Session-scoped front end over the static and mutable stores
pub struct SyncController<S: SopStore> {
    bundled: StaticStore,
    store: S,
    store_authoritative: bool,
    tabs: Vec<Tab>,
    /// Set when the eager tab fetch at open failed; cleared once a later
    /// fetch succeeds
    tabs_stale: bool,
    /// Lazy per-tab document cache; entries are whole-value replacements and
    /// never evicted during the session
    documents: HashMap<String, Document>,
}

impl<S: SopStore> SyncController<S> {
    /// Open a controller, probing the mutable store for existing data
    ///
    /// A failed probe degrades to the bundled dataset instead of failing the
    /// open; the store stays reachable for a later `initialize`.
    pub fn open(bundled: StaticStore, store: S) -> Self {
        let store_authoritative = match store.has_sop_data() {
            Ok(has_data) => has_data,
            Err(e) => {
                warn!("store probe failed, serving bundled dataset: {}", e);
                false
            }
        };

        let mut tabs_stale = false;
        let tabs = if store_authoritative {
            match store.fetch_all_tabs() {
                Ok(tabs) => tabs,
                Err(e) => {
                    warn!("eager tab fetch failed, will retry on next read: {}", e);
                    tabs_stale = true;
                    Vec::new()
                }
            }
        } else {
            bundled.fetch_all_tabs().unwrap_or_default()
        };

        info!(
            "controller open: {} authoritative, {} tabs",
            if store_authoritative {
                "mutable store"
            } else {
                "bundled dataset"
            },
            tabs.len()
        );

        Self {
            bundled,
            store,
            store_authoritative,
            tabs,
            tabs_stale,
            documents: HashMap::new(),
        }
    }

    /// Whether the mutable store is authoritative
    pub fn is_initialized(&self) -> bool {
        self.store_authoritative
    }

    /// Seed the mutable store from the bundled dataset and flip authority
    ///
    /// # Returns
    /// * `Ok(())` - Store seeded; subsequent reads and writes hit the store
    /// * `Err(StoreError)` - Seeding failed; the bundled dataset stays
    ///   authoritative
    pub fn initialize(&mut self) -> Result<(), StoreError> {
        let (tabs, documents) = self.bundled.dataset();
        self.store.seed_sop_data(tabs.clone(), documents)?;
        self.store_authoritative = true;
        self.tabs = tabs;
        self.tabs_stale = false;
        self.documents.clear();
        info!("mutable store seeded from bundled dataset");
        Ok(())
    }

    /// The cached tab list, in persisted order
    ///
    /// If the eager fetch at open failed, it is retried here until the
    /// store answers, so reads converge instead of serving an empty list
    /// for the whole session.
    pub fn tabs(&mut self) -> &[Tab] {
        if self.tabs_stale {
            match self.store.fetch_all_tabs() {
                Ok(tabs) => {
                    self.tabs = tabs;
                    self.tabs_stale = false;
                }
                Err(e) => warn!("tab fetch retry failed: {}", e),
            }
        }
        &self.tabs
    }

    /// The document for `tab_id`, fetching and caching on first access
    pub fn document(&mut self, tab_id: &str) -> Result<Option<&Document>, StoreError> {
        if !self.documents.contains_key(tab_id) {
            debug!("document cache miss for tab '{}'", tab_id);
            let fetched = if self.store_authoritative {
                self.store.fetch_document_by_tab_id(tab_id)?
            } else {
                self.bundled.fetch_document_by_tab_id(tab_id)?
            };
            match fetched {
                Some(doc) => {
                    self.documents.insert(tab_id.to_string(), doc);
                }
                None => return Ok(None),
            }
        }
        Ok(self.documents.get(tab_id))
    }

    /// Every document currently loaded in the session cache, in tab order
    ///
    /// This is the snapshot the search indexer scans; it reflects whatever
    /// has been loaded so far, not the full store.
    pub fn loaded_documents(&self) -> Vec<&Document> {
        self.tabs
            .iter()
            .filter_map(|tab| self.documents.get(&tab.id))
            .collect()
    }

    /// Load every tab's document into the cache (used before whole-set search)
    pub fn load_all_documents(&mut self) -> Result<(), StoreError> {
        let ids: Vec<String> = self.tabs().iter().map(|t| t.id.clone()).collect();
        for id in ids {
            self.document(&id)?;
        }
        Ok(())
    }

    /// Create a tab, optimistically appending it to the cached list
    pub fn create_tab(&mut self, tab: Tab) -> Result<(), StoreError> {
        self.require_initialized()?;
        if self.tabs.iter().any(|t| t.id == tab.id) {
            return Err(StoreError::DuplicateId(tab.id));
        }
        self.tabs.push(tab.clone());
        if let Err(e) = self.store.create_tab(tab) {
            self.reload_tabs();
            return Err(e);
        }
        Ok(())
    }

    /// Patch a tab, optimistically updating the cached list
    pub fn update_tab(&mut self, id: &str, patch: TabPatch) -> Result<(), StoreError> {
        self.require_initialized()?;
        let tab = self
            .tabs
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        tab.apply(&patch);
        if let Err(e) = self.store.update_tab(id, &patch) {
            self.reload_tabs();
            return Err(e);
        }
        Ok(())
    }

    /// Delete a tab; its document leaves the cache in the same step
    pub fn delete_tab(&mut self, id: &str) -> Result<(), StoreError> {
        self.require_initialized()?;
        if !self.tabs.iter().any(|t| t.id == id) {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.tabs.retain(|t| t.id != id);
        self.documents.remove(id);
        if let Err(e) = self.store.delete_tab(id) {
            self.reload_tabs();
            return Err(e);
        }
        Ok(())
    }

    /// Persist a new tab order
    ///
    /// Pure optimistic write: reordering is idempotent, so a failure is
    /// reported but triggers no reload.
    pub fn reorder_tabs(&mut self, ids: &[String]) -> Result<(), StoreError> {
        self.require_initialized()?;
        crate::store::apply_reorder(&mut self.tabs, ids);
        self.store.reorder_tabs(ids)
    }

    /// Create a document for `tab_id` and cache it
    pub fn create_document(&mut self, doc: Document) -> Result<(), StoreError> {
        self.require_initialized()?;
        if self.documents.contains_key(&doc.tab_id) {
            return Err(StoreError::DuplicateId(doc.tab_id));
        }
        let tab_id = doc.tab_id.clone();
        self.documents.insert(tab_id.clone(), doc.clone());
        if let Err(e) = self.store.create_document(doc) {
            // The optimistic entry is wrong; drop it so the next read
            // fetches ground truth
            self.documents.remove(&tab_id);
            return Err(e);
        }
        Ok(())
    }

    /// Replace a document, optimistically swapping the cached value
    pub fn update_document(&mut self, doc: Document) -> Result<(), StoreError> {
        self.require_initialized()?;
        let tab_id = doc.tab_id.clone();
        self.documents.insert(tab_id.clone(), doc.clone());
        if let Err(e) = self.store.update_document(&doc) {
            self.reload_document(&tab_id);
            return Err(e);
        }
        Ok(())
    }

    fn require_initialized(&self) -> Result<(), StoreError> {
        if self.store_authoritative {
            Ok(())
        } else {
            Err(StoreError::NotInitialized)
        }
    }

    /// Rollback by reload: replace the cached tab list with ground truth
    fn reload_tabs(&mut self) {
        warn!("tab mutation failed, reloading tab list from store");
        match self.store.fetch_all_tabs() {
            Ok(tabs) => {
                self.tabs = tabs;
                self.tabs_stale = false;
            }
            Err(e) => warn!("tab reload failed, keeping optimistic list: {}", e),
        }
    }

    /// Rollback by reload for a single document cache entry
    fn reload_document(&mut self, tab_id: &str) {
        warn!(
            "document mutation failed, reloading '{}' from store",
            tab_id
        );
        match self.store.fetch_document_by_tab_id(tab_id) {
            Ok(Some(doc)) => {
                self.documents.insert(tab_id.to_string(), doc);
            }
            Ok(None) => {
                self.documents.remove(tab_id);
            }
            Err(e) => {
                // Drop the entry entirely; the next read refetches
                warn!("document reload failed, evicting cache entry: {}", e);
                self.documents.remove(tab_id);
            }
        }
    }
}
