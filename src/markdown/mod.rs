//! Markdown pipeline: normalize → TOC → render.
//!
//! - [`normalize`] - `<br>` markers and line endings
//! - [`toc`] - heading slugs and table of contents
//! - [`render`] - Markdown → [`dom`](crate::dom) tree via `pulldown-cmark`
//! - [`link`] - link classification for rendered anchors

pub mod link;
pub mod normalize;
pub mod render;
pub mod toc;

pub use link::{LinkTarget, rewrite_link};
pub use normalize::normalize;
pub use render::{CodeBlock, HeadingAnchor, HeadingLevel, RenderContext, RenderedDocument, render};
pub use toc::{TocItem, extract_toc, slugify, toc_for_display};

use pulldown_cmark::Options;

/// Markdown extensions enabled for content documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkdownOptions {
    pub tables: bool,
    pub footnotes: bool,
    pub strikethrough: bool,
    pub task_lists: bool,
}

impl MarkdownOptions {
    /// Every supported extension on.
    pub fn all() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            task_lists: true,
        }
    }

    /// Parser flags for these options.
    ///
    /// `# Title {#id}` attributes are never enabled so heading ids always
    /// come from [`slugify`] and match the table of contents.
    pub(crate) fn to_pulldown_options(self) -> Options {
        [
            (self.tables, Options::ENABLE_TABLES),
            (self.footnotes, Options::ENABLE_FOOTNOTES),
            (self.strikethrough, Options::ENABLE_STRIKETHROUGH),
            (self.task_lists, Options::ENABLE_TASKLISTS),
        ]
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .fold(Options::empty(), |acc, (_, flag)| acc | flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_options() {
        let none = MarkdownOptions::default().to_pulldown_options();
        assert!(none.is_empty());

        let all = MarkdownOptions::all().to_pulldown_options();
        assert!(all.contains(Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS));
        assert!(!all.contains(Options::ENABLE_HEADING_ATTRIBUTES));
    }
}
