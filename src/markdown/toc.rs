//! Heading discovery, anchor slugs and the table of contents.
//!
//! [`slugify`] is the only place anchor ids are derived. The renderer calls it
//! for in-document anchors and [`extract_toc`] calls it for TOC links, so both
//! always agree for the same heading text.
//!
//! Two headings with the same text get the same id. Nothing disambiguates
//! them; the browser resolves the fragment to one of the two.
//!
//! The TOC is line based and does not track code fences: a `# comment` inside
//! a fenced shell sample is listed even though the body has no anchor for it.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static HEADING_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("valid heading regex"));

static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s-]").expect("valid slug regex"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// One table-of-contents entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocItem {
    /// Anchor id, see [`slugify`].
    pub id: String,
    /// Visible heading text with inline code markers removed.
    pub text: String,
    /// Heading depth, 1..=6.
    pub level: u8,
}

/// Derive a URL-safe anchor id from heading text.
///
/// Lowercase, drop everything outside `[a-z0-9\s-]`, trim, then join
/// whitespace runs with `-`. Text without any ASCII letters or digits (e.g.
/// Korean headings) produces an empty id.
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    let kept = NON_SLUG_CHARS.replace_all(&lower, "");
    WHITESPACE_RUN.replace_all(kept.trim(), "-").into_owned()
}

/// Display text of a heading: backticks removed, trimmed.
#[inline]
pub fn heading_text(raw: &str) -> String {
    raw.replace('`', "").trim().to_string()
}

/// Parse an ATX heading line into `(level, raw text)`.
pub fn parse_heading_line(line: &str) -> Option<(u8, &str)> {
    let caps = HEADING_LINE.captures(line.trim())?;
    let level = caps.get(1)?.as_str().len() as u8;
    let text = caps.get(2)?.as_str();
    Some((level, text))
}

/// Collect every heading line of normalized Markdown in document order.
pub fn extract_toc(normalized: &str) -> Vec<TocItem> {
    normalized
        .lines()
        .filter_map(parse_heading_line)
        .map(|(level, raw)| {
            let text = heading_text(raw);
            TocItem {
                id: slugify(&text),
                text,
                level,
            }
        })
        .collect()
}

/// Entries shown in the "On this page" panel.
pub fn toc_for_display(items: &[TocItem], max_level: u8) -> Vec<TocItem> {
    items
        .iter()
        .filter(|item| item.level <= max_level)
        .cloned()
        .collect()
}
