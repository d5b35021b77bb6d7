//! Language routing helpers.
//!
//! Every documentation URL starts with a language segment (`/en/...`,
//! `/ko/...`). Unknown or missing codes fall back to the default language.

/// The fixed set of supported language codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSet {
    codes: Vec<String>,
    default: String,
}

impl Default for LanguageSet {
    fn default() -> Self {
        Self::new(vec!["en".to_string(), "ko".to_string()], "en".to_string())
    }
}

impl LanguageSet {
    /// Config validation guarantees `default` is listed; it is added otherwise.
    pub fn new(mut codes: Vec<String>, default: String) -> Self {
        if !codes.contains(&default) {
            codes.push(default.clone());
        }
        Self { codes, default }
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn default_language(&self) -> &str {
        &self.default
    }

    #[inline]
    pub fn is_supported(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }

    /// `Some(code)` when supported, the default otherwise.
    pub fn normalize<'a>(&'a self, code: Option<&'a str>) -> &'a str {
        match code {
            Some(code) if self.is_supported(code) => code,
            _ => &self.default,
        }
    }

    /// `/<code>`, normalized.
    pub fn language_prefix(&self, code: Option<&str>) -> String {
        format!("/{}", self.normalize(code))
    }

    /// Swap the first segment of `path` for `next`.
    ///
    /// Relative or empty paths yield the bare prefix of `next`.
    pub fn replace_language_in_path(&self, path: &str, next: &str) -> String {
        let Some(rest) = path.strip_prefix('/') else {
            return self.language_prefix(Some(next));
        };
        let tail = rest.find('/').map_or("", |i| &rest[i..]);
        format!("/{next}{tail}")
    }
}
