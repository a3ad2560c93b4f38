//! Checklist completion store
//!
//! A flat, persisted map from checklist-item id to checked state. The map is
//! user-scoped, not document-scoped: an item id appearing in two documents
//! shares one entry, on purpose. The whole blob is rewritten on every toggle
//! and cached in memory after the first load; a corrupt or absent blob
//! degrades silently to an empty map and items fall back to their
//! `default_checked` value.

use log::warn;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Durable key-value seam for the progress blob
///
/// The store reads one opaque blob and rewrites it wholesale; the backing
/// medium (file, browser storage, backend column) is the host's choice.
pub trait ProgressKv {
    /// The current blob, if one has ever been written
    fn read(&self) -> Option<String>;
    /// Replace the blob
    fn write(&mut self, blob: &str) -> std::io::Result<()>;
}

/// File-backed blob storage
#[derive(Debug, Clone)]
pub struct FileKv {
    path: PathBuf,
}

impl FileKv {
    /// Store the blob at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ProgressKv for FileKv {
    fn read(&self) -> Option<String> {
        fs::read_to_string(&self.path).ok()
    }

    fn write(&mut self, blob: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, blob)
    }
}

/// In-memory blob storage for tests
#[derive(Debug, Clone, Default)]
pub struct MemoryKv {
    blob: Option<String>,
}

impl MemoryKv {
    /// Create empty storage
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressKv for MemoryKv {
    fn read(&self) -> Option<String> {
        self.blob.clone()
    }

    fn write(&mut self, blob: &str) -> std::io::Result<()> {
        self.blob = Some(blob.to_string());
        Ok(())
    }
}

/// Per-user checklist completion, cached after the first load
pub struct ChecklistProgress<K: ProgressKv> {
    kv: K,
    cache: Option<HashMap<String, bool>>,
}

impl<K: ProgressKv> ChecklistProgress<K> {
    /// Open the store; nothing is read until the first access
    pub fn open(kv: K) -> Self {
        Self { kv, cache: None }
    }

    /// The full completion map, loading and caching on first call
    pub fn get(&mut self) -> &HashMap<String, bool> {
        self.load()
    }

    /// Checked state for one item, falling back to its declared default
    pub fn is_checked(&mut self, id: &str, default_checked: bool) -> bool {
        self.load().get(id).copied().unwrap_or(default_checked)
    }

    /// Flip one item and rewrite the whole blob
    ///
    /// An item with no entry yet flips from its `default_checked` value.
    /// A failed write keeps the in-memory state; the next toggle retries
    /// the full rewrite.
    pub fn toggle(&mut self, id: &str, default_checked: bool) {
        let map = self.load();
        let current = map.get(id).copied().unwrap_or(default_checked);
        map.insert(id.to_string(), !current);

        if let Some(map) = &self.cache {
            match toml::to_string(map) {
                Ok(blob) => {
                    if let Err(e) = self.kv.write(&blob) {
                        warn!("checklist progress write failed: {}", e);
                    }
                }
                Err(e) => warn!("checklist progress encode failed: {}", e),
            }
        }
    }

    fn load(&mut self) -> &mut HashMap<String, bool> {
        if self.cache.is_none() {
            let map = match self.kv.read() {
                Some(blob) => match toml::from_str::<HashMap<String, bool>>(&blob) {
                    Ok(map) => map,
                    Err(e) => {
                        // Malformed state never propagates; start over empty
                        warn!("checklist progress blob malformed, resetting: {}", e);
                        HashMap::new()
                    }
                },
                None => HashMap::new(),
            };
            self.cache = Some(map);
        }
        self.cache.get_or_insert_with(HashMap::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn test_toggle_flips_from_default() {
        let mut progress = ChecklistProgress::open(MemoryKv::new());
        assert!(!progress.is_checked("c1", false));
        progress.toggle("c1", false);
        assert!(progress.is_checked("c1", false));

        // An item whose default is checked flips off on first toggle
        progress.toggle("c2", true);
        assert!(!progress.is_checked("c2", true));
    }

    #[test]
    fn test_unknown_ids_use_default_checked() {
        let mut progress = ChecklistProgress::open(MemoryKv::new());
        assert!(progress.is_checked("never-touched", true));
        assert!(!progress.is_checked("never-touched", false));
    }

    #[test]
    fn test_malformed_blob_degrades_to_empty() {
        let mut kv = MemoryKv::new();
        kv.write("not [ valid { toml").unwrap();
        let mut progress = ChecklistProgress::open(kv);
        assert!(progress.get().is_empty());
        // And the store stays usable
        progress.toggle("c1", false);
        assert!(progress.is_checked("c1", false));
    }

    #[test]
    fn test_state_survives_reopening_the_store() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!("sopdoc-progress-{}.toml", nanos));

        {
            let mut progress = ChecklistProgress::open(FileKv::new(&path));
            progress.toggle("c1", false);
        }
        {
            // A fresh process sees the persisted state
            let mut progress = ChecklistProgress::open(FileKv::new(&path));
            assert!(progress.is_checked("c1", false));
            assert_eq!(progress.get().get("c1"), Some(&true));
        }

        let _ = fs::remove_file(&path);
    }
}
