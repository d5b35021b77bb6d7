//! `[render]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [render]
//! tables = true
//! footnotes = true
//! strikethrough = true
//! task_lists = true
//! toc_max_level = 3
//! ```

use serde::{Deserialize, Serialize};

use crate::config::types::{ConfigDiagnostics, FieldPath};
use crate::markdown::MarkdownOptions;

/// Markdown rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// GitHub-style tables.
    pub tables: bool,
    /// `[^note]` footnotes.
    pub footnotes: bool,
    /// `~~struck~~` text.
    pub strikethrough: bool,
    /// `- [x]` task lists.
    pub task_lists: bool,
    /// Deepest heading level shown in the page's table of contents.
    pub toc_max_level: u8,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            task_lists: true,
            toc_max_level: 3,
        }
    }
}

impl RenderConfig {
    const TOC_MAX_LEVEL: FieldPath = FieldPath::new("render", "toc_max_level");

    pub fn markdown_options(&self) -> MarkdownOptions {
        MarkdownOptions {
            tables: self.tables,
            footnotes: self.footnotes,
            strikethrough: self.strikethrough,
            task_lists: self.task_lists,
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !(1..=6).contains(&self.toc_max_level) {
            diag.error(
                Self::TOC_MAX_LEVEL,
                format!("must be between 1 and 6, got {}", self.toc_max_level),
            );
        }
    }
}
