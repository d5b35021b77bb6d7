//! Config field paths for diagnostics.

use std::fmt;

/// A `[section]` key of `docs.toml`, e.g. `site.default_language`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FieldPath {
    pub section: &'static str,
    pub key: &'static str,
}

impl FieldPath {
    pub const fn new(section: &'static str, key: &'static str) -> Self {
        Self { section, key }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section, self.key)
    }
}
