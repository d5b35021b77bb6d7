//! `[content]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [content]
//! dir = "content"     # contains one directory per language: content/en, content/ko
//! extension = "md"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::types::{ConfigDiagnostics, FieldPath};

/// Where documentation sources live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Content root, relative to the config file.
    pub dir: PathBuf,

    /// Extension of documentation files, without the dot.
    pub extension: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: "content".into(),
            extension: "md".to_string(),
        }
    }
}

impl ContentConfig {
    const DIR: FieldPath = FieldPath::new("content", "dir");
    const EXTENSION: FieldPath = FieldPath::new("content", "extension");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.extension.is_empty() || self.extension.starts_with('.') {
            diag.error_with_hint(
                Self::EXTENSION,
                format!("invalid extension `{}`", self.extension),
                "write the extension without a leading dot, e.g. `md`",
            );
        }

        if !self.dir.exists() {
            diag.warn(Self::DIR, format!("{} does not exist", self.dir.display()));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_content_config() {
        let config = test_parse_config("[content]\ndir = \"docs\"\nextension = \"markdown\"");
        assert_eq!(config.content.dir, std::path::PathBuf::from("docs"));
        assert_eq!(config.content.extension, "markdown");
    }

    #[test]
    fn test_dotted_extension_rejected() {
        let config = test_parse_config("[content]\nextension = \".md\"");
        let mut diag = crate::config::ConfigDiagnostics::new();
        config.content.validate(&mut diag);
        assert!(diag.has_errors());
    }
}
