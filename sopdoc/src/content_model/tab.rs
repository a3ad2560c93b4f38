//! Tab registry entries

use serde::{Deserialize, Serialize};

/// A named entry point selecting exactly one document
///
/// The registry's total order is the array position under which tabs are
/// stored; the order is persisted and reorderable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    /// Stable lower-kebab identifier, URL/key-safe
    pub id: String,
    /// Display label
    pub label: String,
    /// Symbolic icon name (resolved by the presentation layer)
    #[serde(default)]
    pub icon: String,
    /// One-line description
    #[serde(default)]
    pub description: String,
}

/// Partial update applied to an existing tab
///
/// `None` fields are left untouched; the id itself is immutable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabPatch {
    /// New display label
    pub label: Option<String>,
    /// New symbolic icon name
    pub icon: Option<String>,
    /// New description
    pub description: Option<String>,
}

impl Tab {
    /// Apply a partial update in place
    pub fn apply(&mut self, patch: &TabPatch) {
        if let Some(label) = &patch.label {
            self.label = label.clone();
        }
        if let Some(icon) = &patch.icon {
            self.icon = icon.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_only_touches_set_fields() {
        let mut tab = Tab {
            id: "technical".to_string(),
            label: "Technical SOP".to_string(),
            icon: "wrench".to_string(),
            description: "Build and deploy".to_string(),
        };

        tab.apply(&TabPatch {
            label: Some("Engineering SOP".to_string()),
            icon: None,
            description: None,
        });

        assert_eq!(tab.label, "Engineering SOP");
        assert_eq!(tab.icon, "wrench");
        assert_eq!(tab.description, "Build and deploy");
    }
}
