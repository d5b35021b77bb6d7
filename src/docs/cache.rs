//! Session-scoped document cache.
//!
//! Each file key maps to a single-assignment cell. The first request for a key
//! runs the entry's raw loader; concurrent requests await the same
//! initialization. The settled outcome, value or error, is kept for the
//! lifetime of the cache; only [`DocCache::invalidate`] lets a key load again.

use std::sync::{Arc, LazyLock};

use dashmap::DashMap;
use regex::Regex;
use tokio::sync::OnceCell;

use crate::content::{ContentEntry, ContentError, FileKey};
use crate::debug;
use crate::markdown::normalize;

static TITLE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*#[ \t]+(.+)$").expect("valid title regex"));

/// Cached result of loading one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocCacheValue {
    /// Normalized Markdown.
    pub normalized: String,
    /// First level-1 heading of the raw text, trimmed.
    pub title: Option<String>,
}

impl DocCacheValue {
    pub fn from_raw(raw: &str) -> Self {
        Self {
            normalized: normalize(raw),
            title: extract_title(raw),
        }
    }
}

/// First `# Heading` line of `raw`, trimmed.
pub fn extract_title(raw: &str) -> Option<String> {
    TITLE_LINE
        .captures(raw)
        .map(|caps| caps[1].trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Settled outcome of one load. Errors are shared between every requester.
pub type LoadResult = Result<Arc<DocCacheValue>, Arc<ContentError>>;

type Cell = Arc<OnceCell<LoadResult>>;

/// Cheaply cloneable handle; clones share storage.
#[derive(Debug, Clone, Default)]
pub struct DocCache {
    cells: Arc<DashMap<FileKey, Cell>>,
}

impl DocCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `entry` through the cache.
    pub async fn load(&self, entry: &ContentEntry) -> LoadResult {
        // Clone the cell out so no shard lock is held across the await
        let cell: Cell = Arc::clone(&*self.cells.entry(entry.key().clone()).or_default());

        cell.get_or_init(|| async {
            debug!("cache"; "miss {}", entry.key());
            match entry.load_raw().await {
                Ok(raw) => Ok(Arc::new(DocCacheValue::from_raw(&raw))),
                Err(err) => Err(Arc::new(err)),
            }
        })
        .await
        .clone()
    }

    /// Value for `key` if it loaded successfully.
    pub fn peek(&self, key: &FileKey) -> Option<Arc<DocCacheValue>> {
        self.cells.get(key)?.get()?.as_ref().ok().cloned()
    }

    /// Forget `key`, value or error; the next load runs the raw loader again.
    pub fn invalidate(&self, key: &FileKey) {
        self.cells.remove(key);
    }

    pub fn clear(&self) {
        self.cells.clear();
    }

    /// Number of keys holding a successfully loaded value.
    pub fn len(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.value().get().is_some_and(Result::is_ok))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
