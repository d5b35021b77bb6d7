//! Link classification and language-aware rewriting.
//!
//! | Link                  | Example              | Result                       |
//! |-----------------------|----------------------|------------------------------|
//! | External              | `https://...`        | new tab, no opener/referrer  |
//! | Sibling document      | `./002_setup.md`     | `/<lang>/docs/002_setup`     |
//! | Sibling index         | `./index.md#faq`     | `/<lang>/docs#faq`           |
//! | Anything else         | `/en/download`, `#x` | unchanged                    |

use crate::docs::build_doc_path;
use crate::utils::route::{is_http_link, split_path_fragment};

/// How a rendered link behaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Absolute http(s) URL, opened in a new browsing context.
    External(String),
    /// In-app route to another documentation page.
    Internal(String),
    /// Rendered as written.
    Plain(String),
}

impl LinkTarget {
    pub fn href(&self) -> &str {
        match self {
            Self::External(url) | Self::Internal(url) | Self::Plain(url) => url,
        }
    }
}

/// Classify `url` as written in a document of `language`.
///
/// `extension` is the content-file extension without the dot.
pub fn rewrite_link(url: &str, language: &str, extension: &str) -> LinkTarget {
    if is_http_link(url) {
        return LinkTarget::External(url.to_string());
    }

    if let Some(slug) = sibling_document_slug(url, extension) {
        let (_, fragment) = split_path_fragment(url);
        let mut path = build_doc_path(language, Some(slug));
        if !fragment.is_empty() {
            path.push('#');
            path.push_str(fragment);
        }
        return LinkTarget::Internal(path);
    }

    LinkTarget::Plain(url.to_string())
}

/// `./<slug>.<ext>` (optionally followed by `#fragment`) → `<slug>`.
fn sibling_document_slug<'a>(url: &'a str, extension: &str) -> Option<&'a str> {
    let (path, _) = split_path_fragment(url);
    let slug = path
        .strip_prefix("./")?
        .strip_suffix(extension)?
        .strip_suffix('.')?;
    (!slug.is_empty()).then_some(slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_links() {
        assert_eq!(
            rewrite_link("https://github.com/rustcost", "en", "md"),
            LinkTarget::External("https://github.com/rustcost".into())
        );
        assert!(matches!(
            rewrite_link("HTTP://example.com", "ko", "md"),
            LinkTarget::External(_)
        ));
    }

    #[test]
    fn test_sibling_documents() {
        assert_eq!(
            rewrite_link("./002_setup.md", "en", "md"),
            LinkTarget::Internal("/en/docs/002_setup".into())
        );
        assert_eq!(
            rewrite_link("./index.md", "ko", "md"),
            LinkTarget::Internal("/ko/docs".into())
        );
        assert_eq!(
            rewrite_link("./install.md#helm", "en", "md"),
            LinkTarget::Internal("/en/docs/install#helm".into())
        );
    }

    #[test]
    fn test_plain_links() {
        for url in ["/en/download", "#section", "./diagram.png", "../other.md", "./.md"] {
            assert_eq!(rewrite_link(url, "en", "md"), LinkTarget::Plain(url.into()));
        }
    }

    #[test]
    fn test_href_accessor() {
        assert_eq!(rewrite_link("./a.md", "en", "md").href(), "/en/docs/a");
    }
}
