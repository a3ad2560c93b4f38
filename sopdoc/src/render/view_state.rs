//! Transient expansion state
//!
//! Which sections are open is per-session UI state and is never persisted.
//! Whenever the active document changes the set resets to "first section
//! expanded, rest collapsed"; search navigation force-expands the target
//! without collapsing anything else.

use crate::content_model::Document;
use crate::search::SearchResult;
use std::collections::HashSet;

/// Expansion set plus the active tab
#[derive(Debug, Default)]
pub struct ViewState {
    active_tab: Option<String>,
    expanded: HashSet<String>,
}

impl ViewState {
    /// Fresh state with nothing active
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently active tab id
    pub fn active_tab(&self) -> Option<&str> {
        self.active_tab.as_deref()
    }

    /// Switch to `doc`, resetting expansion to its first section
    pub fn activate_document(&mut self, doc: &Document) {
        self.active_tab = Some(doc.tab_id.clone());
        self.expanded.clear();
        if let Some(first) = doc.first_section_id() {
            self.expanded.insert(first.to_string());
        }
    }

    /// Whether the section with `id` is expanded
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Flip one section open or closed
    pub fn toggle(&mut self, id: &str) {
        if !self.expanded.remove(id) {
            self.expanded.insert(id.to_string());
        }
    }

    /// Expand a section without touching the rest of the set
    pub fn force_expand(&mut self, id: &str) {
        self.expanded.insert(id.to_string());
    }

    /// Expand every section of `doc`
    pub fn expand_all(&mut self, doc: &Document) {
        for id in doc.section_ids() {
            self.expanded.insert(id.to_string());
        }
    }

    /// Navigate to a search result
    ///
    /// Switches to the result's tab (resetting expansion if the tab actually
    /// changes), force-expands the matched section and returns the anchor to
    /// scroll to. Clearing the query box is the caller's concern.
    pub fn reveal(&mut self, result: &SearchResult, doc: &Document) -> String {
        if self.active_tab.as_deref() != Some(result.tab_id.as_str()) {
            self.activate_document(doc);
        }
        self.force_expand(&result.section_id);
        format!("#{}", result.section_id)
    }
}
