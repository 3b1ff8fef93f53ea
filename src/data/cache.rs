use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use super::loader::load_file;
use super::model::JobDataset;

// ---------------------------------------------------------------------------
// Memoised dataset loading
// ---------------------------------------------------------------------------

/// Loaded datasets keyed by source file identity (canonical path).
///
/// Entries are never refreshed on their own; call [`DatasetCache::invalidate`]
/// when the file on disk changes.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, Arc<JobDataset>>,
}

impl DatasetCache {
    /// Return the cached dataset for `path`, parsing the file on first use.
    /// A failed load leaves the cache untouched.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<JobDataset>> {
        let key = cache_key(path);
        if let Some(ds) = self.entries.get(&key) {
            log::debug!("Dataset cache hit for {}", key.display());
            return Ok(Arc::clone(ds));
        }

        let ds = Arc::new(load_file(path)?);
        self.entries.insert(key, Arc::clone(&ds));
        Ok(ds)
    }

    /// Forget the dataset loaded from `path`.  Returns whether it was cached.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.entries.remove(&cache_key(path)).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn cache_key(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
