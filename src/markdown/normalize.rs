//! Pre-render text normalization.
//!
//! Authors write `<br>` inside table cells and list items to force line
//! breaks. Those markers become real newlines everywhere except inside fenced
//! code, where they are sample content.

use std::sync::LazyLock;

use regex::Regex;

static BREAK_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid break regex"));

const FENCE: &str = "```";

/// Normalize raw Markdown before parsing.
///
/// - `\r\n` and lone `\r` become `\n`
/// - `<br>`, `<br/>`, `<br />` (any case) become `\n` outside fenced code
/// - fenced lines, including the fence lines, pass through byte-for-byte
pub fn normalize(raw: &str) -> String {
    let text = normalize_line_endings(raw);

    let mut out = String::with_capacity(text.len());
    let mut in_fence = false;

    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }

        if is_fence_line(line) {
            in_fence = !in_fence;
            out.push_str(line);
        } else if in_fence {
            out.push_str(line);
        } else {
            out.push_str(&BREAK_MARKER.replace_all(line, "\n"));
        }
    }

    out
}

/// A line that opens or closes a fenced code region.
#[inline]
fn is_fence_line(line: &str) -> bool {
    line.trim_start().starts_with(FENCE)
}

fn normalize_line_endings(raw: &str) -> std::borrow::Cow<'_, str> {
    if !raw.contains('\r') {
        return raw.into();
    }
    raw.replace("\r\n", "\n").replace('\r', "\n").into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_break_variants() {
        assert_eq!(normalize("a<br>b"), "a\nb");
        assert_eq!(normalize("a<br/>b"), "a\nb");
        assert_eq!(normalize("a<br />b"), "a\nb");
        assert_eq!(normalize("a<BR>b<Br/>c"), "a\nb\nc");
        assert_eq!(normalize("end<br>"), "end\n");
    }

    #[test]
    fn test_fenced_content_untouched() {
        let raw = "```html\nuse <br/> in html\n```\nline one<br>line two";
        let out = normalize(raw);
        assert_eq!(
            out,
            "```html\nuse <br/> in html\n```\nline one\nline two"
        );
    }

    #[test]
    fn test_indented_fence_toggles() {
        let raw = "- item\n  ```\n  a<br>b\n  ```\n- c<br>d";
        assert_eq!(normalize(raw), "- item\n  ```\n  a<br>b\n  ```\n- c\nd");
    }

    #[test]
    fn test_unclosed_fence_protects_rest() {
        let raw = "```\nx<br>y\nmore<br>";
        assert_eq!(normalize(raw), raw);
    }

    #[test]
    fn test_line_endings() {
        assert_eq!(normalize("a\r\nb\rc"), "a\nb\nc");
        assert_eq!(normalize("```\r\n<br>\r\n```"), "```\n<br>\n```");
    }

    #[test]
    fn test_no_markers_is_identity() {
        let raw = "# Title\n\nSome *text*.\n";
        assert_eq!(normalize(raw), raw);
    }

    #[test]
    fn test_non_break_tags_kept() {
        assert_eq!(normalize("<bright> <b>bold</b>"), "<bright> <b>bold</b>");
    }
}
