//! Content repository: raw documentation text, keyed by language and filename.
//!
//! The engine never assumes how content is discovered. A [`ContentSource`]
//! enumerates entries per language and hands out asynchronous accessors:
//!
//! - [`DirSource`] - scans `<root>/<lang>/*.<ext>` once at startup
//! - [`MemorySource`] - a static table (embedded resources, tests)

mod dir;
mod memory;

pub use dir::DirSource;
pub use memory::MemorySource;

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;

use thiserror::Error;

/// Future returned by a raw-text accessor.
pub type LoadFuture = Pin<Box<dyn Future<Output = Result<String, ContentError>> + Send>>;

/// Zero-argument asynchronous accessor for one entry's raw text.
pub type RawLoader = Arc<dyn Fn() -> LoadFuture + Send + Sync>;

/// Errors raised while reading content.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to scan content directory `{path}`")]
    Scan {
        path: PathBuf,
        #[source]
        source: jwalk::Error,
    },

    #[error("content `{0}` is unavailable")]
    Unavailable(FileKey),
}

/// Repository-internal identifier of one entry: `<language>/<filename>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileKey(String);

impl FileKey {
    pub fn new(language: &str, filename: &str) -> Self {
        Self(format!("{language}/{filename}"))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One raw-text resource of the content repository.
#[derive(Clone)]
pub struct ContentEntry {
    language: String,
    filename: String,
    key: FileKey,
    loader: RawLoader,
}

impl ContentEntry {
    pub fn new(language: impl Into<String>, filename: impl Into<String>, loader: RawLoader) -> Self {
        let language = language.into();
        let filename = filename.into();
        let key = FileKey::new(&language, &filename);
        Self {
            language,
            filename,
            key,
            loader,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Filename including extension, e.g. `001_overview.md`.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn key(&self) -> &FileKey {
        &self.key
    }

    /// Filename without the `.<extension>` suffix.
    pub fn stem(&self, extension: &str) -> &str {
        self.filename
            .strip_suffix(extension)
            .and_then(|s| s.strip_suffix('.'))
            .unwrap_or(&self.filename)
    }

    /// Start reading the raw text. Callers are expected to memoize.
    pub fn load_raw(&self) -> LoadFuture {
        (self.loader)()
    }
}

impl fmt::Debug for ContentEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentEntry")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// Enumerable, read-only content repository.
pub trait ContentSource: Send + Sync {
    /// All entries of one language, in no particular order.
    ///
    /// An unknown language yields an empty list.
    fn list_entries(&self, language: &str) -> Vec<ContentEntry>;

    /// Direct lookup by filename (with extension).
    fn entry(&self, language: &str, filename: &str) -> Option<ContentEntry> {
        self.list_entries(language)
            .into_iter()
            .find(|e| e.filename() == filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(filename: &str) -> ContentEntry {
        let loader: RawLoader = Arc::new(|| Box::pin(async { Ok(String::new()) }));
        ContentEntry::new("en", filename, loader)
    }

    #[test]
    fn test_file_key_format() {
        assert_eq!(entry("001_overview.md").key().as_str(), "en/001_overview.md");
    }

    #[test]
    fn test_stem_strips_extension_only() {
        assert_eq!(entry("001_overview.md").stem("md"), "001_overview");
        assert_eq!(entry("index.md").stem("md"), "index");
        // foreign extension stays untouched
        assert_eq!(entry("notes.txt").stem("md"), "notes.txt");
        assert_eq!(entry("cmd").stem("md"), "cmd");
    }
}
