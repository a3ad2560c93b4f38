//! Document model: metadata plus one top-level section list

use super::section::Section;
use serde::{Deserialize, Serialize};

/// The full SOP content for one tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Document identifier
    pub id: String,
    /// Owning tab; exactly one document may exist per tab
    pub tab_id: String,
    /// Document title
    pub title: String,
    /// Short description shown under the title
    #[serde(default)]
    pub description: String,
    /// Free-form version string (e.g. "2.1")
    #[serde(default)]
    pub version: String,
    /// ISO date of the last update
    #[serde(default)]
    pub last_updated: String,
    /// Top-level sections in display order
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Document {
    /// Every section id in the document, in tree order
    pub fn section_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        for section in &self.sections {
            section.collect_ids(&mut ids);
        }
        ids
    }

    /// Id of the first top-level section, if any
    pub fn first_section_id(&self) -> Option<&str> {
        self.sections.first().map(|s| s.id.as_str())
    }

    /// Authored checked state of the checklist item with `item_id`, if the
    /// item appears anywhere in this document
    pub fn checklist_default(&self, item_id: &str) -> Option<bool> {
        self.sections
            .iter()
            .find_map(|s| s.checklist_default(item_id))
    }
}
