//! Topic resolution and document loading.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tokio::task::JoinSet;

use super::cache::{DocCache, DocCacheValue, LoadResult};
use super::index::TopicIndex;
use crate::content::{ContentEntry, ContentSource, FileKey};
use crate::markdown::normalize;
use crate::{debug, log};

/// Outcome of resolving a topic slug.
#[derive(Debug, Clone)]
pub enum Resolution {
    Found(ContentEntry),
    NotFound,
}

/// Document text ready for rendering.
#[derive(Debug, Clone)]
pub enum LoadedDocument {
    Found {
        key: FileKey,
        value: Arc<DocCacheValue>,
    },
    /// Placeholder shown when the topic cannot be resolved or read.
    NotFound { text: String },
}

impl LoadedDocument {
    pub fn normalized(&self) -> &str {
        match self {
            Self::Found { value, .. } => &value.normalized,
            Self::NotFound { text } => text,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Found { value, .. } => value.title.as_deref(),
            Self::NotFound { .. } => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

/// `# 404` document for an unresolvable topic.
pub fn placeholder(language: &str, topic: &str) -> String {
    normalize(&format!("# 404\nNot found: {language}/{topic}"))
}

/// Resolves topics against the content source and loads through the cache.
#[derive(Clone)]
pub struct DocumentLoader {
    source: Arc<dyn ContentSource>,
    cache: DocCache,
    extension: String,
}

impl DocumentLoader {
    pub fn new(source: Arc<dyn ContentSource>, extension: impl Into<String>) -> Self {
        Self {
            source,
            cache: DocCache::new(),
            extension: extension.into(),
        }
    }

    pub fn source(&self) -> &dyn ContentSource {
        self.source.as_ref()
    }

    pub fn cache(&self) -> &DocCache {
        &self.cache
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Build the topic index of `language` from this loader's source.
    pub fn index(&self, language: &str) -> TopicIndex {
        TopicIndex::build(self.source.as_ref(), language, &self.extension)
    }

    /// Match by display slug in sorted order, then try `<topic>.<ext>` directly.
    pub fn resolve(&self, index: &TopicIndex, topic: &str) -> Resolution {
        if let Some(entry) = index.find(topic).and_then(|t| index.entry(t)) {
            return Resolution::Found(entry.clone());
        }

        let filename = format!("{topic}.{}", self.extension);
        match self.source.entry(index.language(), &filename) {
            Some(entry) => Resolution::Found(entry),
            None => Resolution::NotFound,
        }
    }

    pub async fn load(&self, entry: &ContentEntry) -> LoadResult {
        self.cache.load(entry).await
    }

    /// Resolve and load `topic`; unresolvable or unreadable topics become
    /// the placeholder document.
    pub async fn document(&self, index: &TopicIndex, topic: &str) -> LoadedDocument {
        let not_found = || LoadedDocument::NotFound {
            text: placeholder(index.language(), topic),
        };

        let entry = match self.resolve(index, topic) {
            Resolution::Found(entry) => entry,
            Resolution::NotFound => {
                debug!("loader"; "no document for {}/{}", index.language(), topic);
                return not_found();
            }
        };

        match self.load(&entry).await {
            Ok(value) => LoadedDocument::Found {
                key: entry.key().clone(),
                value,
            },
            Err(err) => {
                log!("error"; "{}: {}", entry.key(), err);
                not_found()
            }
        }
    }

    /// Load every topic of `index` and collect the titles found.
    ///
    /// Entries that fail to load or have no level-1 heading are absent from
    /// the result and keep their filename title.
    pub async fn backfill_titles(&self, index: &TopicIndex) -> FxHashMap<FileKey, String> {
        let mut set = JoinSet::new();
        for (_, entry) in index.iter_entries() {
            let cache = self.cache.clone();
            let entry = entry.clone();
            set.spawn(async move {
                let result = cache.load(&entry).await;
                (entry.key().clone(), result)
            });
        }

        let mut titles = FxHashMap::default();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((key, Ok(value))) => {
                    if let Some(title) = &value.title {
                        titles.insert(key, title.clone());
                    }
                }
                Ok((key, Err(err))) => debug!("loader"; "title for {} unavailable: {}", key, err),
                Err(err) => debug!("loader"; "title task failed: {}", err),
            }
        }
        titles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentError, MemorySource, RawLoader};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn loader(source: MemorySource) -> DocumentLoader {
        DocumentLoader::new(Arc::new(source), "md")
    }

    fn resolved_name(resolution: Resolution) -> Option<String> {
        match resolution {
            Resolution::Found(entry) => Some(entry.filename().to_string()),
            Resolution::NotFound => None,
        }
    }

    #[test]
    fn test_resolution_fallback() {
        let docs = loader(
            MemorySource::new()
                .with_text("en", "002_setup.md", "# Numbered")
                .with_text("en", "setup.md", "# Plain")
                .with_text("en", "faq.md", "# FAQ"),
        );
        let index = docs.index("en");

        assert_eq!(resolved_name(docs.resolve(&index, "setup")), Some("002_setup.md".into()));
        assert_eq!(resolved_name(docs.resolve(&index, "faq")), Some("faq.md".into()));
        // unprefixed stem of a numbered file resolves through the direct lookup
        assert_eq!(
            resolved_name(docs.resolve(&index, "002_setup")),
            Some("002_setup.md".into())
        );
        assert_eq!(resolved_name(docs.resolve(&index, "missing")), None);
    }

    #[tokio::test]
    async fn test_not_found_placeholder() {
        let docs = loader(MemorySource::new().with_text("en", "index.md", "# Home"));
        let index = docs.index("ko");
        let doc = docs.document(&index, "missing").await;
        assert!(!doc.is_found());
        assert_eq!(doc.normalized(), "# 404\nNot found: ko/missing");
    }

    #[tokio::test]
    async fn test_unreadable_document_is_placeholder() {
        let docs = loader(MemorySource::new().with_unavailable("en", "broken.md"));
        let index = docs.index("en");
        let doc = docs.document(&index, "broken").await;
        assert_eq!(doc.normalized(), placeholder("en", "broken"));
    }

    #[tokio::test]
    async fn test_document_found() {
        let docs = loader(MemorySource::new().with_text("en", "001_overview.md", "# Overview\r\nA<br/>B"));
        let index = docs.index("en");
        let doc = docs.document(&index, "overview").await;
        assert!(doc.is_found());
        assert_eq!(doc.title(), Some("Overview"));
        assert_eq!(doc.normalized(), "# Overview\nA\nB");
    }

    #[tokio::test]
    async fn test_backfill_tolerates_failures() {
        let docs = loader(
            MemorySource::new()
                .with_text("en", "001_overview.md", "# Product Overview")
                .with_text("en", "002_no-heading.md", "just text")
                .with_unavailable("en", "003_broken.md"),
        );
        let index = docs.index("en");
        let titles = docs.backfill_titles(&index).await;

        assert_eq!(titles.len(), 1);
        assert_eq!(
            titles.get(&FileKey::new("en", "001_overview.md")).map(String::as_str),
            Some("Product Overview")
        );

        let titled = index.with_titles(&titles);
        let names: Vec<_> = titled.topics().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(names, vec!["Product Overview", "No Heading", "Broken"]);
    }

    #[tokio::test]
    async fn test_backfill_shares_cache_with_document() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let raw: RawLoader = Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Box::pin(async { Ok("# Counted".to_string()) })
        });
        let docs = loader(MemorySource::new().with_loader("en", "index.md", raw));
        let index = docs.index("en");

        docs.document(&index, "index").await;
        docs.backfill_titles(&index).await;
        docs.document(&index, "index").await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_load_runs_raw_loader_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let raw: RawLoader = Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Box::pin(async {
                Err::<String, _>(ContentError::Unavailable(FileKey::new("en", "001_broken.md")))
            })
        });
        let docs = loader(MemorySource::new().with_loader("en", "001_broken.md", raw));
        let index = docs.index("en");

        assert!(!docs.document(&index, "broken").await.is_found());
        assert!(docs.backfill_titles(&index).await.is_empty());
        assert!(!docs.document(&index, "broken").await.is_found());

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
