//! Section tree model

use super::blocks::ContentBlock;
use serde::{Deserialize, Serialize};

/// A titled, orderable, optionally-nested container of content blocks
///
/// Section ids are unique within their owning document (not globally) and
/// double as anchor targets for search-result navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Lower-kebab identifier, unique per document
    pub id: String,
    /// Section title
    pub title: String,
    /// Nesting level, 1 through [`Section::MAX_LEVEL`]
    pub level: u8,
    /// Content blocks in display order
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    /// Nested subsections
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subsections: Vec<Section>,
}

impl Section {
    /// Deepest level a section may have
    pub const MAX_LEVEL: u8 = 3;

    /// Create an empty section, clamping the level into range
    pub fn new(id: impl Into<String>, title: impl Into<String>, level: u8) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            level: level.clamp(1, Self::MAX_LEVEL),
            content: Vec::new(),
            subsections: Vec::new(),
        }
    }

    /// Level a direct child of this section takes
    pub fn child_level(&self) -> u8 {
        (self.level + 1).min(Self::MAX_LEVEL)
    }

    /// Whether the editor may add subsections below this section
    pub fn can_nest(&self) -> bool {
        self.level < Self::MAX_LEVEL
    }

    /// Collect this section's id and the ids of all nested subsections
    pub fn collect_ids<'a>(&'a self, out: &mut Vec<&'a str>) {
        out.push(&self.id);
        for sub in &self.subsections {
            sub.collect_ids(out);
        }
    }

    /// Authored checked state of the checklist item with `item_id`, searching
    /// this section and its subsections
    pub fn checklist_default(&self, item_id: &str) -> Option<bool> {
        for block in &self.content {
            if let ContentBlock::Checklist { checklist_items } = block {
                if let Some(item) = checklist_items.iter().find(|i| i.id == item_id) {
                    return Some(item.default_checked);
                }
            }
        }
        self.subsections
            .iter()
            .find_map(|sub| sub.checklist_default(item_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_level() {
        assert_eq!(Section::new("a", "A", 0).level, 1);
        assert_eq!(Section::new("a", "A", 7).level, 3);
    }

    #[test]
    fn test_child_level_caps_at_max() {
        let top = Section::new("top", "Top", 1);
        assert_eq!(top.child_level(), 2);
        assert!(top.can_nest());

        let deep = Section::new("deep", "Deep", 3);
        assert_eq!(deep.child_level(), 3);
        assert!(!deep.can_nest());
    }

    #[test]
    fn test_collect_ids_walks_subsections() {
        let mut root = Section::new("root", "Root", 1);
        let mut child = Section::new("child", "Child", 2);
        child.subsections.push(Section::new("leaf", "Leaf", 3));
        root.subsections.push(child);

        let mut ids = Vec::new();
        root.collect_ids(&mut ids);
        assert_eq!(ids, vec!["root", "child", "leaf"]);
    }
}
