//! Content index: filename-derived topic ordering for one language.
//!
//! Filenames carry an optional order prefix:
//!
//! | Filename            | Display slug     | Order         |
//! |---------------------|------------------|---------------|
//! | `index.md`          | `index`          | first         |
//! | `001_overview.md`   | `overview`       | 1             |
//! | `010-setup.md`      | `setup`          | 10            |
//! | `faq.md`            | `faq`            | last          |
//!
//! Topics sort by order, then by case-insensitive title.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;
use rustc_hash::FxHashMap;
use serde::Serialize;

use super::nav::INDEX_SLUG;
use crate::content::{ContentEntry, ContentSource, FileKey};
use crate::debug;

static ORDER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2,3})[_-](.+)$").expect("valid order prefix regex"));

/// Sort position of a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "value")]
pub enum TopicOrder {
    /// The reserved `index` topic.
    First,
    Numbered(u32),
    /// No order prefix.
    Last,
}

/// One navigable document of a language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Topic {
    /// Filename stem, e.g. `001_overview`.
    pub slug: String,
    /// Routing identifier, e.g. `overview`.
    pub display_slug: String,
    pub order: TopicOrder,
    pub title: String,
    #[serde(skip)]
    pub file_key: FileKey,
}

impl Topic {
    /// Parse a filename stem into a topic with a humanized title.
    pub fn from_stem(stem: &str, file_key: FileKey) -> Self {
        let (order, display_slug) = match ORDER_PREFIX.captures(stem) {
            Some(caps) => {
                // at most three digits, always fits
                let order = caps[1].parse().unwrap_or(u32::MAX);
                (TopicOrder::Numbered(order), caps[2].to_string())
            }
            None if stem == INDEX_SLUG => (TopicOrder::First, INDEX_SLUG.to_string()),
            None => (TopicOrder::Last, stem.to_string()),
        };

        Self {
            slug: stem.to_string(),
            title: humanize(&display_slug),
            display_slug,
            order,
            file_key,
        }
    }

    fn sort_cmp(&self, other: &Self) -> Ordering {
        self.order
            .cmp(&other.order)
            .then_with(|| self.title.to_lowercase().cmp(&other.title.to_lowercase()))
            .then_with(|| self.title.cmp(&other.title))
            .then_with(|| self.slug.cmp(&other.slug))
    }
}

/// `getting-started` → `Getting Started`.
pub fn humanize(slug: &str) -> String {
    let mut out = String::with_capacity(slug.len());
    let mut prev_word = false;
    for c in slug.chars() {
        let c = if c == '-' || c == '_' { ' ' } else { c };
        let is_word = c.is_ascii_alphanumeric();
        if is_word && !prev_word {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        prev_word = is_word;
    }
    out
}

/// Sorted topics of one language plus their content entries.
#[derive(Debug, Clone, Default)]
pub struct TopicIndex {
    language: String,
    topics: Vec<Topic>,
    entries: FxHashMap<FileKey, ContentEntry>,
}

impl TopicIndex {
    /// Enumerate `language` and order its topics by filename.
    ///
    /// Titles are humanized display slugs until [`Self::with_titles`].
    pub fn build(source: &dyn ContentSource, language: &str, extension: &str) -> Self {
        let mut topics = Vec::new();
        let mut entries = FxHashMap::default();

        for entry in source.list_entries(language) {
            let stem = entry.stem(extension);
            if stem == entry.filename() {
                continue;
            }
            topics.push(Topic::from_stem(stem, entry.key().clone()));
            entries.insert(entry.key().clone(), entry);
        }

        topics.sort_by(Topic::sort_cmp);
        debug!("index"; "{} topic(s) for {}", topics.len(), language);

        Self {
            language: language.to_string(),
            topics,
            entries,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    /// First topic in sorted order with this display slug.
    pub fn find(&self, display_slug: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.display_slug == display_slug)
    }

    pub fn entry(&self, topic: &Topic) -> Option<&ContentEntry> {
        self.entries.get(&topic.file_key)
    }

    /// Topics with their entries, in sorted order.
    pub fn iter_entries(&self) -> impl Iterator<Item = (&Topic, &ContentEntry)> {
        self.topics
            .iter()
            .filter_map(|t| self.entries.get(&t.file_key).map(|e| (t, e)))
    }

    /// Copy with titles replaced where `titles` has one, re-sorted.
    pub fn with_titles(&self, titles: &FxHashMap<FileKey, String>) -> Self {
        let mut topics = self.topics.clone();
        for topic in &mut topics {
            if let Some(title) = titles.get(&topic.file_key) {
                topic.title.clone_from(title);
            }
        }
        topics.sort_by(Topic::sort_cmp);

        Self {
            language: self.language.clone(),
            topics,
            entries: self.entries.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MemorySource;

    fn slugs(index: &TopicIndex) -> Vec<&str> {
        index.topics().iter().map(|t| t.display_slug.as_str()).collect()
    }

    #[test]
    fn test_order_prefix_parsing() {
        let t = Topic::from_stem("001_overview", FileKey::new("en", "001_overview.md"));
        assert_eq!(t.order, TopicOrder::Numbered(1));
        assert_eq!(t.display_slug, "overview");
        assert_eq!(t.slug, "001_overview");

        let t = Topic::from_stem("10-getting-started", FileKey::new("en", "x"));
        assert_eq!(t.display_slug, "getting-started");
        assert_eq!(t.title, "Getting Started");

        // one digit or four digits is not an order prefix
        assert_eq!(Topic::from_stem("1_intro", FileKey::new("en", "x")).order, TopicOrder::Last);
        assert_eq!(Topic::from_stem("2024_notes", FileKey::new("en", "x")).order, TopicOrder::Last);

        assert_eq!(Topic::from_stem("index", FileKey::new("en", "x")).order, TopicOrder::First);
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("getting-started"), "Getting Started");
        assert_eq!(humanize("api_keys"), "Api Keys");
        assert_eq!(humanize("k8s-v2"), "K8s V2");
        assert_eq!(humanize("index"), "Index");
    }

    #[test]
    fn test_ordering_invariant() {
        let source = MemorySource::new()
            .with_text("en", "gettingstarted.md", "")
            .with_text("en", "010_setup.md", "")
            .with_text("en", "001_overview.md", "")
            .with_text("en", "index.md", "");
        let index = TopicIndex::build(&source, "en", "md");
        assert_eq!(slugs(&index), vec!["index", "overview", "setup", "gettingstarted"]);
    }

    #[test]
    fn test_ties_break_by_title_case_insensitive() {
        let source = MemorySource::new()
            .with_text("en", "zeta.md", "")
            .with_text("en", "Alpha.md", "")
            .with_text("en", "beta.md", "");
        let index = TopicIndex::build(&source, "en", "md");
        assert_eq!(slugs(&index), vec!["Alpha", "beta", "zeta"]);
    }

    #[test]
    fn test_empty_language() {
        let source = MemorySource::new().with_text("en", "index.md", "");
        let index = TopicIndex::build(&source, "ko", "md");
        assert!(index.is_empty());
        assert_eq!(index.language(), "ko");
    }

    #[test]
    fn test_foreign_extension_skipped() {
        let source = MemorySource::new()
            .with_text("en", "index.md", "")
            .with_text("en", "notes.txt", "");
        assert_eq!(TopicIndex::build(&source, "en", "md").len(), 1);
    }

    #[test]
    fn test_with_titles_resorts() {
        let source = MemorySource::new()
            .with_text("en", "aaa.md", "")
            .with_text("en", "bbb.md", "");
        let index = TopicIndex::build(&source, "en", "md");

        let mut titles = FxHashMap::default();
        titles.insert(FileKey::new("en", "aaa.md"), "Zebra".to_string());
        let titled = index.with_titles(&titles);

        assert_eq!(slugs(&titled), vec!["bbb", "aaa"]);
        assert_eq!(titled.find("aaa").map(|t| t.title.as_str()), Some("Zebra"));
        // original is untouched
        assert_eq!(slugs(&index), vec!["aaa", "bbb"]);
    }

    #[test]
    fn test_find_prefers_numbered() {
        let source = MemorySource::new()
            .with_text("en", "setup.md", "")
            .with_text("en", "002_setup.md", "");
        let index = TopicIndex::build(&source, "en", "md");
        let topic = index.find("setup").unwrap();
        assert_eq!(topic.slug, "002_setup");
        assert!(index.entry(topic).is_some());
    }
}
