//! In-memory content table.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::{ContentEntry, ContentError, ContentSource, FileKey, RawLoader};

/// Static content table, e.g. documents embedded with `include_str!`.
#[derive(Default, Clone)]
pub struct MemorySource {
    entries: FxHashMap<String, Vec<ContentEntry>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document with fixed text.
    pub fn with_text(self, language: &str, filename: &str, text: impl Into<Arc<str>>) -> Self {
        let text: Arc<str> = text.into();
        let loader: RawLoader = Arc::new(move || {
            let text = Arc::clone(&text);
            Box::pin(async move { Ok(text.to_string()) })
        });
        self.with_loader(language, filename, loader)
    }

    /// Add a document whose accessor always fails.
    pub fn with_unavailable(self, language: &str, filename: &str) -> Self {
        let key = FileKey::new(language, filename);
        let loader: RawLoader = Arc::new(move || {
            let key = key.clone();
            Box::pin(async move { Err(ContentError::Unavailable(key)) })
        });
        self.with_loader(language, filename, loader)
    }

    /// Add a document with a custom accessor.
    pub fn with_loader(mut self, language: &str, filename: &str, loader: RawLoader) -> Self {
        let list = self.entries.entry(language.to_string()).or_default();
        list.retain(|e| e.filename() != filename);
        list.push(ContentEntry::new(language, filename, loader));
        self
    }
}

impl ContentSource for MemorySource {
    fn list_entries(&self, language: &str) -> Vec<ContentEntry> {
        self.entries.get(language).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_source_lookup() {
        let source = MemorySource::new()
            .with_text("en", "index.md", "# Home")
            .with_text("en", "index.md", "# Home v2")
            .with_unavailable("en", "broken.md");

        assert_eq!(source.list_entries("en").len(), 2);
        let index = source.entry("en", "index.md").unwrap();
        assert_eq!(index.load_raw().await.unwrap(), "# Home v2");

        let broken = source.entry("en", "broken.md").unwrap();
        assert!(broken.load_raw().await.is_err());
        assert!(source.entry("ko", "index.md").is_none());
    }
}
