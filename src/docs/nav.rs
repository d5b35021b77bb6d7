//! Navigation model: doc routes, sidebar links and the prev/next pager.

use serde::Serialize;

use super::index::Topic;

/// Reserved display slug of the landing topic.
pub const INDEX_SLUG: &str = "index";

/// `/<language>/docs` for the index topic, `/<language>/docs/<slug>` otherwise.
pub fn build_doc_path(language: &str, slug: Option<&str>) -> String {
    match slug {
        None | Some(INDEX_SLUG) | Some("") => format!("/{language}/docs"),
        Some(slug) => format!("/{language}/docs/{slug}"),
    }
}

/// One sidebar or pager entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicLink {
    pub slug: String,
    pub title: String,
    pub href: String,
    pub active: bool,
}

impl TopicLink {
    fn new(topic: &Topic, language: &str, current: &str) -> Self {
        Self {
            slug: topic.display_slug.clone(),
            title: topic.title.clone(),
            href: build_doc_path(language, Some(&topic.display_slug)),
            active: topic.display_slug == current,
        }
    }
}

/// Sidebar entries in topic order, the current topic marked active.
pub fn sidebar(topics: &[Topic], language: &str, current: &str) -> Vec<TopicLink> {
    topics
        .iter()
        .map(|t| TopicLink::new(t, language, current))
        .collect()
}

/// Neighbours of the current topic in the ordered list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Pager {
    pub prev: Option<TopicLink>,
    pub next: Option<TopicLink>,
}

impl Pager {
    /// Empty when `current` is not listed.
    pub fn new(topics: &[Topic], language: &str, current: &str) -> Self {
        let Some(idx) = topics.iter().position(|t| t.display_slug == current) else {
            return Self::default();
        };
        let link = |t: &Topic| TopicLink::new(t, language, current);
        Self {
            prev: idx.checked_sub(1).and_then(|i| topics.get(i)).map(link),
            next: topics.get(idx + 1).map(link),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.prev.is_none() && self.next.is_none()
    }
}
