//! `[site]` section configuration.
//!
//! Languages the documentation is published in.
//!
//! # Example
//!
//! ```toml
//! [site]
//! languages = ["en", "ko"]
//! default_language = "en"
//! ```

use serde::{Deserialize, Serialize};

use crate::config::types::{ConfigDiagnostics, FieldPath};
use crate::docs::LanguageSet;

/// Site section configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Supported language codes, in display order.
    pub languages: Vec<String>,

    /// Language used when the requested one is missing or unsupported.
    pub default_language: String,
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_string(), "ko".to_string()],
            default_language: "en".to_string(),
        }
    }
}

impl SiteSectionConfig {
    const LANGUAGES: FieldPath = FieldPath::new("site", "languages");
    const DEFAULT_LANGUAGE: FieldPath = FieldPath::new("site", "default_language");

    /// Build the routing language set from this section.
    pub fn language_set(&self) -> LanguageSet {
        LanguageSet::new(self.languages.clone(), self.default_language.clone())
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.languages.is_empty() {
            diag.error(Self::LANGUAGES, "at least one language is required");
        }

        for code in &self.languages {
            if code.is_empty() || code.contains('/') {
                diag.error(Self::LANGUAGES, format!("invalid language code `{code}`"));
            }
        }

        if !self.languages.contains(&self.default_language) {
            diag.error_with_hint(
                Self::DEFAULT_LANGUAGE,
                format!("`{}` is not listed in site.languages", self.default_language),
                "add it to `languages` or pick one of the listed codes",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_site_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.site.languages, vec!["en", "ko"]);
        assert_eq!(config.site.default_language, "en");
    }

    #[test]
    fn test_default_language_must_be_listed() {
        let config = test_parse_config("[site]\nlanguages = [\"ko\"]\ndefault_language = \"en\"");
        let mut diag = crate::config::ConfigDiagnostics::new();
        config.site.validate(&mut diag);
        assert_eq!(diag.len(), 1);
    }

    #[test]
    fn test_language_set_from_config() {
        let config = test_parse_config("[site]\nlanguages = [\"en\", \"ja\"]");
        let set = config.site.language_set();
        assert_eq!(set.normalize(Some("ja")), "ja");
        assert_eq!(set.normalize(Some("ko")), "en");
    }
}
