//! Substring search over loaded documents
//!
//! A naive, deterministic scan: case-insensitive substring matching in
//! document → section order, one result per section, capped. No index is
//! kept; every query walks the snapshot it is given.

use crate::content_model::{ContentBlock, Document, Section};
use itertools::Itertools;
use std::time::{Duration, Instant};

/// Hard cap on returned results
pub const MAX_RESULTS: usize = 15;

/// Characters kept on each side of a content match
const SNIPPET_RADIUS: usize = 25;

/// Maximum matched list-item length before truncation
const LIST_ITEM_LIMIT: usize = 60;

/// One search hit, keyed by `(tab_id, section_id)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Tab owning the matched document
    pub tab_id: String,
    /// Section the match sits in; doubles as the navigation anchor
    pub section_id: String,
    /// Title of the matched section
    pub section_title: String,
    /// Snippet shown in the result list
    pub matched_text: String,
}

/// Scan `documents` for `query`
///
/// Each section contributes at most one result no matter how many of its
/// blocks match; the first matching source wins, in priority order: section
/// title, text-block content, list items, checklist item text. Results are
/// deduplicated by `(tab_id, section_id)` and capped at [`MAX_RESULTS`].
/// Subsection matches are reported under the subsection's own id.
pub fn search<'a, I>(query: &str, documents: I) -> Vec<SearchResult>
where
    I: IntoIterator<Item = &'a Document>,
{
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut results = Vec::new();
    'outer: for doc in documents {
        for section in &doc.sections {
            if !scan_section(&needle, &doc.tab_id, section, &mut results) {
                break 'outer;
            }
        }
    }

    results
        .into_iter()
        .unique_by(|r| (r.tab_id.clone(), r.section_id.clone()))
        .take(MAX_RESULTS)
        .collect()
}

/// Scan one section and its subsections; returns false once the cap is hit
fn scan_section(
    needle: &str,
    tab_id: &str,
    section: &Section,
    results: &mut Vec<SearchResult>,
) -> bool {
    if results.len() >= MAX_RESULTS {
        return false;
    }

    if let Some(matched_text) = match_section(needle, section) {
        results.push(SearchResult {
            tab_id: tab_id.to_string(),
            section_id: section.id.clone(),
            section_title: section.title.clone(),
            matched_text,
        });
    }

    for sub in &section.subsections {
        if !scan_section(needle, tab_id, sub, results) {
            return false;
        }
    }
    true
}

/// First matching source within a section, in priority order
///
/// Sources are ranked, not scanned in block order: any text-block content
/// match outranks any list item match, which outranks any checklist item
/// match, regardless of where the blocks sit in the section.
fn match_section(needle: &str, section: &Section) -> Option<String> {
    if find_ci(&section.title, needle).is_some() {
        return Some(section.title.clone());
    }

    for block in &section.content {
        if let ContentBlock::Paragraph { content }
        | ContentBlock::Heading { content }
        | ContentBlock::Code { content, .. }
        | ContentBlock::Alert { content, .. } = block
        {
            if let Some(at) = find_ci(content, needle) {
                return Some(snippet(content, at, needle.len()));
            }
        }
    }

    for block in &section.content {
        if let ContentBlock::List { items, .. } = block {
            for item in items {
                if find_ci(item, needle).is_some() {
                    return Some(truncate(item, LIST_ITEM_LIMIT));
                }
            }
        }
    }

    for block in &section.content {
        if let ContentBlock::Checklist { checklist_items } = block {
            for item in checklist_items {
                if find_ci(&item.text, needle).is_some() {
                    return Some(item.text.clone());
                }
            }
        }
    }
    None
}

/// Case-insensitive substring search returning a byte offset into `haystack`
///
/// `needle` must already be lowercase. Works on char boundaries so the
/// offset is safe to slice at.
fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    let needle_chars: Vec<char> = needle.chars().collect();
    if needle_chars.is_empty() {
        return None;
    }
    for (start, _) in haystack.char_indices() {
        let mut hay_iter = haystack[start..].chars();
        let mut matched = true;
        for &nc in &needle_chars {
            match hay_iter.next() {
                Some(hc) if hc.to_lowercase().eq(nc.to_lowercase()) => {}
                _ => {
                    matched = false;
                    break;
                }
            }
        }
        if matched {
            return Some(start);
        }
    }
    None
}

/// A window of text around the match, elided on truncated ends
fn snippet(content: &str, match_start: usize, match_len: usize) -> String {
    let boundaries: Vec<usize> = content
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(content.len()))
        .collect();
    let start_pos = boundaries
        .iter()
        .position(|&b| b == match_start)
        .unwrap_or(0);
    let match_end = (match_start + match_len).min(content.len());
    let end_pos = boundaries
        .iter()
        .position(|&b| b >= match_end)
        .unwrap_or(boundaries.len() - 1);

    let window_start = start_pos.saturating_sub(SNIPPET_RADIUS);
    let window_end = (end_pos + SNIPPET_RADIUS).min(boundaries.len() - 1);

    let mut out = String::new();
    if window_start > 0 {
        out.push_str("...");
    }
    out.push_str(&content[boundaries[window_start]..boundaries[window_end]]);
    if window_end < boundaries.len() - 1 {
        out.push_str("...");
    }
    out
}

/// Cut `text` to at most `limit` characters, eliding if cut
fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let cut: String = text.chars().take(limit).collect();
    format!("{}...", cut)
}

/// Query debouncer for interactive callers
///
/// A submitted query becomes ready once no newer query has arrived for the
/// debounce window. The default window is 300ms.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    pending: Option<(String, Instant)>,
}

impl Debouncer {
    /// Create a debouncer with the default 300ms window
    pub fn new() -> Self {
        Self::with_window(Duration::from_millis(300))
    }

    /// Create a debouncer with a custom window
    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Record a new query, restarting the window
    pub fn submit(&mut self, query: &str) {
        self.pending = Some((query.to_string(), Instant::now()));
    }

    /// Take the pending query if its window has elapsed
    pub fn ready(&mut self) -> Option<String> {
        self.ready_at(Instant::now())
    }

    fn ready_at(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, submitted)) if now.duration_since(*submitted) >= self.window => {
                self.pending.take().map(|(query, _)| query)
            }
            _ => None,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}
