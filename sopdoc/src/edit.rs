//! Path-addressed document editing
//!
//! Every operation takes a `Document`, an explicit index path into its
//! section tree and returns a new `Document` value; callers swap the whole
//! value into their cache. A path is a slice of child indices: `[]` addresses
//! the top-level section list, `[1, 0]` the first subsection of the second
//! top-level section. Nothing here talks to a store; persistence is the
//! synchronization controller's job.

use crate::content_model::{
    slugify, BlockKind, ContentBlock, Document, ModelError, Section,
};
use thiserror::Error;

/// Direction for move operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    /// Towards index 0
    Up,
    /// Towards the end of the list
    Down,
}

/// Errors raised at the edit boundary
///
/// These are validation failures; none of them reaches a store adapter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// The index path does not address a section in this document
    #[error("no section at path {path:?}")]
    InvalidPath {
        /// The offending path
        path: Vec<usize>,
    },

    /// A child index is outside its list
    #[error("index {index} out of range ({len} entries)")]
    IndexOutOfRange {
        /// The requested index
        index: usize,
        /// Length of the addressed list
        len: usize,
    },

    /// Adding a subsection would nest below the deepest allowed level
    #[error("sections cannot nest below level 3")]
    MaxDepthExceeded,

    /// The normalized section id is already used elsewhere in the document
    #[error("section id '{0}' is already used in this document")]
    DuplicateSectionId(String),

    /// The section id normalized to an empty slug
    #[error("section id may not be empty after normalization")]
    EmptySectionId,

    /// Structural block failure (table column operations)
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Borrow the section addressed by `path`
fn section_at_mut<'a>(doc: &'a mut Document, path: &[usize]) -> Result<&'a mut Section, EditError> {
    let invalid = || EditError::InvalidPath {
        path: path.to_vec(),
    };
    let (first, rest) = path.split_first().ok_or_else(invalid)?;
    let mut current = doc.sections.get_mut(*first).ok_or_else(invalid)?;
    for &index in rest {
        current = current.subsections.get_mut(index).ok_or_else(invalid)?;
    }
    Ok(current)
}

/// Borrow the sibling list that `parent` owns (`[]` = the top-level list)
fn child_list_mut<'a>(
    doc: &'a mut Document,
    parent: &[usize],
) -> Result<&'a mut Vec<Section>, EditError> {
    if parent.is_empty() {
        Ok(&mut doc.sections)
    } else {
        Ok(&mut section_at_mut(doc, parent)?.subsections)
    }
}

/// Section ids used anywhere in `doc`, except inside the subtree at `skip`
fn ids_outside_subtree(doc: &Document, skip: &[usize]) -> Vec<String> {
    fn walk(sections: &[Section], prefix: &mut Vec<usize>, skip: &[usize], out: &mut Vec<String>) {
        for (i, section) in sections.iter().enumerate() {
            prefix.push(i);
            if prefix.as_slice() != skip {
                out.push(section.id.clone());
                walk(&section.subsections, prefix, skip, out);
            }
            prefix.pop();
        }
    }
    let mut out = Vec::new();
    walk(&doc.sections, &mut Vec::new(), skip, &mut out);
    out
}

/// Pick a fresh section id of the form `new-section`, `new-section-2`, ...
fn fresh_section_id(doc: &Document) -> String {
    let taken = doc.section_ids().iter().map(|s| s.to_string()).collect::<Vec<_>>();
    if !taken.iter().any(|id| id == "new-section") {
        return "new-section".to_string();
    }
    let mut n = 2;
    loop {
        let candidate = format!("new-section-{}", n);
        if !taken.iter().any(|id| id == &candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Append a blank section under `parent` (`[]` appends at the top level)
///
/// The new section takes the parent's child level; adding below level 3 is a
/// hard error rather than a hidden control.
pub fn add_section(doc: &Document, parent: &[usize]) -> Result<Document, EditError> {
    let mut next = doc.clone();
    let level = if parent.is_empty() {
        1
    } else {
        let parent_section = section_at_mut(&mut next, parent)?;
        if !parent_section.can_nest() {
            return Err(EditError::MaxDepthExceeded);
        }
        parent_section.child_level()
    };
    let id = fresh_section_id(doc);
    let section = Section::new(id, "New Section", level);
    child_list_mut(&mut next, parent)?.push(section);
    Ok(next)
}

/// Replace the section at `path` with `section`
///
/// The incoming id is normalized to a lower-kebab slug before acceptance and
/// must stay unique within the document. Level is pinned to the old value,
/// since a section's level is a property of its position, not of its payload.
pub fn update_section(
    doc: &Document,
    path: &[usize],
    mut section: Section,
) -> Result<Document, EditError> {
    section.id = slugify(&section.id);
    if section.id.is_empty() {
        return Err(EditError::EmptySectionId);
    }

    let outside = ids_outside_subtree(doc, path);
    let mut incoming = Vec::new();
    section.collect_ids(&mut incoming);
    for id in &incoming {
        if outside.iter().any(|other| other == id) {
            return Err(EditError::DuplicateSectionId(id.to_string()));
        }
    }

    let mut next = doc.clone();
    let target = section_at_mut(&mut next, path)?;
    section.level = target.level;
    *target = section;
    Ok(next)
}

/// Delete the section at `path`, including its subtree
pub fn delete_section(doc: &Document, path: &[usize]) -> Result<Document, EditError> {
    let (index, parent) = split_last(path)?;
    let mut next = doc.clone();
    let siblings = child_list_mut(&mut next, parent)?;
    if index >= siblings.len() {
        return Err(EditError::IndexOutOfRange {
            index,
            len: siblings.len(),
        });
    }
    siblings.remove(index);
    Ok(next)
}

/// Move the section at `path` one slot up or down among its siblings
///
/// Moving past either end of the list is a no-op, not an error.
pub fn move_section(
    doc: &Document,
    path: &[usize],
    direction: MoveDirection,
) -> Result<Document, EditError> {
    let (index, parent) = split_last(path)?;
    let mut next = doc.clone();
    let siblings = child_list_mut(&mut next, parent)?;
    if index >= siblings.len() {
        return Err(EditError::IndexOutOfRange {
            index,
            len: siblings.len(),
        });
    }
    match direction {
        MoveDirection::Up if index > 0 => siblings.swap(index, index - 1),
        MoveDirection::Down if index + 1 < siblings.len() => siblings.swap(index, index + 1),
        _ => {}
    }
    Ok(next)
}

/// Append an empty block of `kind` to the section at `section_path`
pub fn add_block(
    doc: &Document,
    section_path: &[usize],
    kind: BlockKind,
) -> Result<Document, EditError> {
    let mut next = doc.clone();
    section_at_mut(&mut next, section_path)?
        .content
        .push(ContentBlock::empty(kind));
    Ok(next)
}

/// Replace the block at `index` within the section at `section_path`
///
/// This replaces the block wholesale; type changes made through the editor
/// should go through [`convert_block`] so field preservation applies.
pub fn update_block(
    doc: &Document,
    section_path: &[usize],
    index: usize,
    block: ContentBlock,
) -> Result<Document, EditError> {
    let mut next = doc.clone();
    let slot = block_at_mut(&mut next, section_path, index)?;
    *slot = block;
    Ok(next)
}

/// Switch the block at `index` to another kind
///
/// Applies the preservation rule: plain `content` survives among paragraph,
/// heading, code and alert; everything else resets to defaults.
pub fn convert_block(
    doc: &Document,
    section_path: &[usize],
    index: usize,
    kind: BlockKind,
) -> Result<Document, EditError> {
    let mut next = doc.clone();
    let slot = block_at_mut(&mut next, section_path, index)?;
    *slot = slot.convert_to(kind);
    Ok(next)
}

/// Delete the block at `index` within the section at `section_path`
pub fn delete_block(
    doc: &Document,
    section_path: &[usize],
    index: usize,
) -> Result<Document, EditError> {
    let mut next = doc.clone();
    let section = section_at_mut(&mut next, section_path)?;
    if index >= section.content.len() {
        return Err(EditError::IndexOutOfRange {
            index,
            len: section.content.len(),
        });
    }
    section.content.remove(index);
    Ok(next)
}

/// Move the block at `index` one slot up or down; boundary moves are no-ops
pub fn move_block(
    doc: &Document,
    section_path: &[usize],
    index: usize,
    direction: MoveDirection,
) -> Result<Document, EditError> {
    let mut next = doc.clone();
    let section = section_at_mut(&mut next, section_path)?;
    if index >= section.content.len() {
        return Err(EditError::IndexOutOfRange {
            index,
            len: section.content.len(),
        });
    }
    match direction {
        MoveDirection::Up if index > 0 => section.content.swap(index, index - 1),
        MoveDirection::Down if index + 1 < section.content.len() => {
            section.content.swap(index, index + 1)
        }
        _ => {}
    }
    Ok(next)
}

/// Append a column to the table block at `index`
pub fn add_table_column(
    doc: &Document,
    section_path: &[usize],
    index: usize,
    header: &str,
) -> Result<Document, EditError> {
    let mut next = doc.clone();
    block_at_mut(&mut next, section_path, index)?.add_column(header)?;
    Ok(next)
}

/// Remove column `column` from the table block at `index`
pub fn remove_table_column(
    doc: &Document,
    section_path: &[usize],
    index: usize,
    column: usize,
) -> Result<Document, EditError> {
    let mut next = doc.clone();
    block_at_mut(&mut next, section_path, index)?.remove_column(column)?;
    Ok(next)
}

fn block_at_mut<'a>(
    doc: &'a mut Document,
    section_path: &[usize],
    index: usize,
) -> Result<&'a mut ContentBlock, EditError> {
    let section = section_at_mut(doc, section_path)?;
    let len = section.content.len();
    section
        .content
        .get_mut(index)
        .ok_or(EditError::IndexOutOfRange { index, len })
}

fn split_last(path: &[usize]) -> Result<(usize, &[usize]), EditError> {
    path.split_last()
        .map(|(last, parent)| (*last, parent))
        .ok_or(EditError::InvalidPath { path: Vec::new() })
}
