//! URL string helpers.
//!
//! - Link scheme detection (`is_http_link`)
//! - Fragment splitting (`split_path_fragment`)

/// Check if a link is an absolute `http://` or `https://` URL (case-insensitive scheme).
///
/// # Examples
/// ```ignore
/// assert!(is_http_link("https://rustcost.io"));
/// assert!(is_http_link("HTTP://example.com"));
/// assert!(!is_http_link("mailto:team@rustcost.io"));
/// ```
#[inline]
pub fn is_http_link(link: &str) -> bool {
    link.split_once("://").is_some_and(|(scheme, _)| {
        scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")
    })
}

/// Split a URL into path and fragment parts.
///
/// The fragment is empty when no `#` is present.
#[inline]
pub fn split_path_fragment(url: &str) -> (&str, &str) {
    url.split_once('#').unwrap_or((url, ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_http_link() {
        assert!(is_http_link("https://hub.docker.com/r/rustcost"));
        assert!(is_http_link("http://localhost:8080"));
        assert!(is_http_link("HTTPS://EXAMPLE.COM"));
        assert!(!is_http_link("./install.md"));
        assert!(!is_http_link("/en/docs"));
        assert!(!is_http_link("mailto:team@rustcost.io"));
        assert!(!is_http_link("ftp://files.example.com"));
    }

    #[test]
    fn test_split_path_fragment() {
        assert_eq!(split_path_fragment("./setup.md#helm"), ("./setup.md", "helm"));
        assert_eq!(split_path_fragment("./setup.md"), ("./setup.md", ""));
        assert_eq!(split_path_fragment("#top"), ("", "top"));
    }
}
