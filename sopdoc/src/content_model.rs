//! Content model for SOP documents
//!
//! This module defines the document tree: tabs select documents, documents
//! own an ordered list of sections, sections nest up to three levels deep and
//! carry typed content blocks.

// Submodules
mod blocks;
mod document;
mod error;
mod section;
mod slug;
mod tab;

// Re-export public types
pub use blocks::{next_item_id, AlertType, BlockKind, ChecklistItem, ContentBlock};
pub use document::Document;
pub use error::ModelError;
pub use section::Section;
pub use slug::slugify;
pub use tab::{Tab, TabPatch};
