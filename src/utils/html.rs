//! HTML text helpers used by the document serializer.
//!
//! - `escape()` / `escape_attr()` - entity escaping for text and attribute values
//! - `is_void_element()` - tags serialized without a closing tag

use std::borrow::Cow;

const TEXT_SPECIALS: [char; 3] = ['<', '>', '&'];
const ATTR_SPECIALS: [char; 5] = ['<', '>', '&', '"', '\''];

#[inline]
fn entity_for(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

/// Escape text content. Borrows when nothing needs escaping.
#[inline]
pub fn escape(s: &str) -> Cow<'_, str> {
    escape_set(s, &TEXT_SPECIALS)
}

/// Escape a double-quoted attribute value.
#[inline]
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    escape_set(s, &ATTR_SPECIALS)
}

fn escape_set<'a>(s: &'a str, set: &[char]) -> Cow<'a, str> {
    if !s.contains(set) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match entity_for(c).filter(|_| set.contains(&c)) {
            Some(entity) => out.push_str(entity),
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Elements that never have children or a closing tag.
#[inline]
pub fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area" | "br" | "col" | "embed" | "hr" | "img" | "input" | "source" | "track" | "wbr"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain_borrows() {
        assert!(matches!(escape("hello world"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape("<br/> & more"), "&lt;br/&gt; &amp; more");
        // quotes are harmless in text nodes
        assert_eq!(escape("say \"hi\""), "say \"hi\"");
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr("a\"b&c"), "a&quot;b&amp;c");
        assert_eq!(escape_attr("it's"), "it&#39;s");
    }

    #[test]
    fn test_void_elements() {
        assert!(is_void_element("img"));
        assert!(is_void_element("br"));
        assert!(!is_void_element("a"));
        assert!(!is_void_element("pre"));
    }
}
