//! Typed content blocks
//!
//! This module defines the atomic units of SOP document content
//! (paragraphs, headings, code blocks, alerts, lists, checklists, tables).

use super::error::ModelError;
use serde::{Deserialize, Serialize};

/// Severity of an alert block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    /// Something to watch out for
    Warning,
    /// Neutral information
    Info,
    /// Confirmation of a good state
    Success,
    /// Must not be ignored
    Critical,
}

/// A single item inside a checklist block
///
/// The `default_checked` flag is only a fallback: the authoritative checked
/// state lives in the checklist progress store, keyed by `id` alone. Two
/// items with the same id in different documents share completion state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    /// Identifier, unique within its block
    pub id: String,
    /// Item text shown next to the checkbox
    pub text: String,
    /// Checked state used when the progress store has no entry for `id`
    #[serde(default)]
    pub default_checked: bool,
}

/// Discriminant for [`ContentBlock`] without any payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum BlockKind {
    Paragraph,
    Heading,
    Code,
    Alert,
    List,
    Checklist,
    Table,
    Divider,
}

/// One typed unit of document content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    /// A paragraph of plain text
    Paragraph {
        #[serde(default)]
        content: String,
    },

    /// An inline heading within a section body
    Heading {
        #[serde(default)]
        content: String,
    },

    /// A code block with an optional language tag
    Code {
        #[serde(default)]
        content: String,
        #[serde(default)]
        language: String,
    },

    /// A callout with a severity level
    #[serde(rename_all = "camelCase")]
    Alert {
        alert_type: AlertType,
        #[serde(default)]
        content: String,
    },

    /// An ordered or unordered list of plain-text items
    List {
        #[serde(default)]
        items: Vec<String>,
        #[serde(default)]
        ordered: bool,
    },

    /// A checklist whose completion state is user-scoped
    #[serde(rename_all = "camelCase")]
    Checklist {
        #[serde(default)]
        checklist_items: Vec<ChecklistItem>,
    },

    /// A table; every row has exactly as many cells as there are headers
    Table {
        #[serde(default)]
        headers: Vec<String>,
        #[serde(default)]
        rows: Vec<Vec<String>>,
    },

    /// A horizontal rule
    Divider,
}

impl ContentBlock {
    /// Get the discriminant of this block
    pub fn kind(&self) -> BlockKind {
        match self {
            ContentBlock::Paragraph { .. } => BlockKind::Paragraph,
            ContentBlock::Heading { .. } => BlockKind::Heading,
            ContentBlock::Code { .. } => BlockKind::Code,
            ContentBlock::Alert { .. } => BlockKind::Alert,
            ContentBlock::List { .. } => BlockKind::List,
            ContentBlock::Checklist { .. } => BlockKind::Checklist,
            ContentBlock::Table { .. } => BlockKind::Table,
            ContentBlock::Divider => BlockKind::Divider,
        }
    }

    /// Create an empty block of the given kind
    ///
    /// # Returns
    /// * `ContentBlock` - A block with every type-specific field at its default
    pub fn empty(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Paragraph => ContentBlock::Paragraph {
                content: String::new(),
            },
            BlockKind::Heading => ContentBlock::Heading {
                content: String::new(),
            },
            BlockKind::Code => ContentBlock::Code {
                content: String::new(),
                language: String::new(),
            },
            BlockKind::Alert => ContentBlock::Alert {
                alert_type: AlertType::Info,
                content: String::new(),
            },
            BlockKind::List => ContentBlock::List {
                items: vec![String::new()],
                ordered: false,
            },
            BlockKind::Checklist => ContentBlock::Checklist {
                checklist_items: vec![ChecklistItem {
                    id: next_item_id(&[]),
                    text: String::new(),
                    default_checked: false,
                }],
            },
            BlockKind::Table => ContentBlock::Table {
                headers: vec!["Column 1".to_string()],
                rows: vec![vec![String::new()]],
            },
            BlockKind::Divider => ContentBlock::Divider,
        }
    }

    /// The textual `content` carried across type switches
    ///
    /// Only paragraph, heading, code and alert blocks carry plain `content`;
    /// every other kind contributes nothing.
    fn carried_content(&self) -> Option<&str> {
        match self {
            ContentBlock::Paragraph { content }
            | ContentBlock::Heading { content }
            | ContentBlock::Code { content, .. }
            | ContentBlock::Alert { content, .. } => Some(content),
            _ => None,
        }
    }

    /// Switch this block to another kind
    ///
    /// `content` is preserved only among {paragraph, heading, code, alert};
    /// all type-specific fields of the target kind are reset to their
    /// defaults (a new list gets one empty item, a new table one column).
    pub fn convert_to(&self, kind: BlockKind) -> ContentBlock {
        let carried = self.carried_content().unwrap_or("").to_string();
        match ContentBlock::empty(kind) {
            ContentBlock::Paragraph { .. } => ContentBlock::Paragraph { content: carried },
            ContentBlock::Heading { .. } => ContentBlock::Heading { content: carried },
            ContentBlock::Code { language, .. } => ContentBlock::Code {
                content: carried,
                language,
            },
            ContentBlock::Alert { alert_type, .. } => ContentBlock::Alert {
                alert_type,
                content: carried,
            },
            other => other,
        }
    }

    /// Append a column to a table block
    ///
    /// Every row receives an empty cell so rows stay rectangular.
    ///
    /// # Returns
    /// * `Ok(())` - Column appended
    /// * `Err(ModelError::NotATable)` - This block is not a table
    pub fn add_column(&mut self, header: &str) -> Result<(), ModelError> {
        match self {
            ContentBlock::Table { headers, rows } => {
                headers.push(header.to_string());
                for row in rows.iter_mut() {
                    row.push(String::new());
                }
                Ok(())
            }
            _ => Err(ModelError::NotATable),
        }
    }

    /// Remove column `index` from a table block
    ///
    /// Removes cell `index` from every row in the same operation, so no row
    /// is ever left ragged. The last remaining column cannot be removed.
    pub fn remove_column(&mut self, index: usize) -> Result<(), ModelError> {
        match self {
            ContentBlock::Table { headers, rows } => {
                if index >= headers.len() {
                    return Err(ModelError::ColumnOutOfRange {
                        index,
                        width: headers.len(),
                    });
                }
                if headers.len() == 1 {
                    return Err(ModelError::LastColumn);
                }
                headers.remove(index);
                for row in rows.iter_mut() {
                    if index < row.len() {
                        row.remove(index);
                    }
                }
                Ok(())
            }
            _ => Err(ModelError::NotATable),
        }
    }
}

/// Pick an item id not already used within `items`
///
/// Ids follow the `item-N` pattern; the first free N wins, so the result is
/// deterministic for a given list.
pub fn next_item_id(items: &[ChecklistItem]) -> String {
    let mut n = items.len() + 1;
    loop {
        let candidate = format!("item-{}", n);
        if !items.iter().any(|item| item.id == candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_switch_preserves_text_content() {
        let block = ContentBlock::Paragraph {
            content: "restart the service".to_string(),
        };

        let heading = block.convert_to(BlockKind::Heading);
        assert_eq!(
            heading,
            ContentBlock::Heading {
                content: "restart the service".to_string()
            }
        );

        let code = heading.convert_to(BlockKind::Code);
        assert_eq!(
            code,
            ContentBlock::Code {
                content: "restart the service".to_string(),
                language: String::new()
            }
        );

        let alert = code.convert_to(BlockKind::Alert);
        match alert {
            ContentBlock::Alert {
                alert_type,
                content,
            } => {
                assert_eq!(alert_type, AlertType::Info);
                assert_eq!(content, "restart the service");
            }
            other => panic!("expected alert, got {:?}", other),
        }
    }

    #[test]
    fn test_type_switch_to_list_discards_content() {
        let block = ContentBlock::Paragraph {
            content: "will be discarded".to_string(),
        };

        let list = block.convert_to(BlockKind::List);
        assert_eq!(
            list,
            ContentBlock::List {
                items: vec![String::new()],
                ordered: false
            }
        );
    }

    #[test]
    fn test_table_columns_stay_rectangular() {
        let mut table = ContentBlock::Table {
            headers: vec!["Step".to_string(), "Owner".to_string()],
            rows: vec![
                vec!["Deploy".to_string(), "Ops".to_string()],
                vec!["Verify".to_string(), "QA".to_string()],
            ],
        };

        table.add_column("Due").unwrap();
        table.remove_column(0).unwrap();
        table.add_column("Notes").unwrap();
        table.remove_column(2).unwrap();

        if let ContentBlock::Table { headers, rows } = &table {
            for row in rows {
                assert_eq!(row.len(), headers.len());
            }
            assert_eq!(headers, &vec!["Owner".to_string(), "Due".to_string()]);
        } else {
            panic!("table changed kind");
        }
    }

    #[test]
    fn test_remove_column_out_of_range() {
        let mut table = ContentBlock::empty(BlockKind::Table);
        let err = table.remove_column(5).unwrap_err();
        assert!(matches!(
            err,
            ModelError::ColumnOutOfRange { index: 5, width: 1 }
        ));
    }

    #[test]
    fn test_last_column_cannot_be_removed() {
        let mut table = ContentBlock::empty(BlockKind::Table);
        assert!(matches!(
            table.remove_column(0),
            Err(ModelError::LastColumn)
        ));
    }

    #[test]
    fn test_column_ops_reject_non_tables() {
        let mut block = ContentBlock::Divider;
        assert!(matches!(block.add_column("x"), Err(ModelError::NotATable)));
    }

    #[test]
    fn test_block_tagged_serialization() {
        let block = ContentBlock::Alert {
            alert_type: AlertType::Critical,
            content: "do not skip".to_string(),
        };
        let json = serde_json::to_string(&block).unwrap();
        assert!(json.contains("\"type\":\"alert\""));
        assert!(json.contains("\"alertType\":\"critical\""));

        let back: ContentBlock = serde_json::from_str(&json).unwrap();
        assert_eq!(back, block);
    }

    #[test]
    fn test_next_item_id_skips_taken_ids() {
        let items = vec![
            ChecklistItem {
                id: "item-2".to_string(),
                text: String::new(),
                default_checked: false,
            },
            ChecklistItem {
                id: "item-3".to_string(),
                text: String::new(),
                default_checked: false,
            },
        ];
        assert_eq!(next_item_id(&items), "item-4");
        assert_eq!(next_item_id(&[]), "item-1");
    }
}
