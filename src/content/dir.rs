//! Directory-backed content: `<root>/<language>/<file>.<ext>`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use jwalk::WalkDir;
use rustc_hash::FxHashMap;

use super::{ContentEntry, ContentError, ContentSource, RawLoader};
use crate::debug;

/// Content discovered by scanning a directory once.
///
/// Only the file list is captured at scan time; text is read lazily by each
/// entry's loader.
#[derive(Debug, Default)]
pub struct DirSource {
    root: PathBuf,
    /// language -> (filename, absolute path), sorted by filename
    files: FxHashMap<String, Vec<(String, PathBuf)>>,
}

impl DirSource {
    /// Scan `root` for `<language>/*.<extension>` files.
    ///
    /// A missing root yields an empty source.
    pub fn scan(root: &Path, extension: &str) -> Result<Self, ContentError> {
        let mut files: FxHashMap<String, Vec<(String, PathBuf)>> = FxHashMap::default();

        if !root.is_dir() {
            debug!("content"; "{} is not a directory, no content", root.display());
            return Ok(Self {
                root: root.to_path_buf(),
                files,
            });
        }

        for entry in WalkDir::new(root).min_depth(2).max_depth(2) {
            let entry = entry.map_err(|source| ContentError::Scan {
                path: root.to_path_buf(),
                source,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(extension) {
                continue;
            }
            let (Some(language), Some(filename)) = (
                path.parent()
                    .and_then(Path::file_name)
                    .and_then(|n| n.to_str()),
                path.file_name().and_then(|n| n.to_str()),
            ) else {
                continue;
            };

            files
                .entry(language.to_string())
                .or_default()
                .push((filename.to_string(), path.clone()));
        }

        for list in files.values_mut() {
            list.sort();
        }
        debug!("content"; "scanned {} language(s) under {}", files.len(), root.display());

        Ok(Self {
            root: root.to_path_buf(),
            files,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Languages that have at least one file.
    pub fn languages(&self) -> Vec<&str> {
        let mut langs: Vec<_> = self.files.keys().map(String::as_str).collect();
        langs.sort_unstable();
        langs
    }

    fn make_entry(language: &str, filename: &str, path: &Path) -> ContentEntry {
        let path = path.to_path_buf();
        let loader: RawLoader = Arc::new(move || {
            let path = path.clone();
            Box::pin(async move {
                tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|source| ContentError::Io { path, source })
            })
        });
        ContentEntry::new(language, filename, loader)
    }
}

impl ContentSource for DirSource {
    fn list_entries(&self, language: &str) -> Vec<ContentEntry> {
        self.files
            .get(language)
            .map(|list| {
                list.iter()
                    .map(|(name, path)| Self::make_entry(language, name, path))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn entry(&self, language: &str, filename: &str) -> Option<ContentEntry> {
        let list = self.files.get(language)?;
        let (name, path) = list.iter().find(|(name, _)| name == filename)?;
        Some(Self::make_entry(language, name, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn site() -> TempDir {
        let dir = TempDir::new().unwrap();
        let en = dir.path().join("en");
        let ko = dir.path().join("ko");
        fs::create_dir_all(&en).unwrap();
        fs::create_dir_all(&ko).unwrap();
        fs::write(en.join("index.md"), "# Welcome").unwrap();
        fs::write(en.join("001_overview.md"), "# Overview").unwrap();
        fs::write(en.join("logo.png"), [0u8; 4]).unwrap();
        fs::write(ko.join("index.md"), "# 환영합니다").unwrap();
        fs::write(dir.path().join("README.md"), "not a language").unwrap();
        dir
    }

    #[test]
    fn test_scan_groups_by_language() {
        let dir = site();
        let source = DirSource::scan(dir.path(), "md").unwrap();

        assert_eq!(source.languages(), vec!["en", "ko"]);
        let names: Vec<_> = source
            .list_entries("en")
            .iter()
            .map(|e| e.filename().to_string())
            .collect();
        assert_eq!(names, vec!["001_overview.md", "index.md"]);
        assert!(source.list_entries("fr").is_empty());
    }

    #[test]
    fn test_missing_root_is_empty() {
        let dir = TempDir::new().unwrap();
        let source = DirSource::scan(&dir.path().join("nope"), "md").unwrap();
        assert!(source.list_entries("en").is_empty());
    }

    #[tokio::test]
    async fn test_entry_loads_text() {
        let dir = site();
        let source = DirSource::scan(dir.path(), "md").unwrap();

        let entry = source.entry("ko", "index.md").unwrap();
        assert_eq!(entry.load_raw().await.unwrap(), "# 환영합니다");
        assert!(source.entry("ko", "setup.md").is_none());
    }

    #[tokio::test]
    async fn test_deleted_file_reports_io_error() {
        let dir = site();
        let source = DirSource::scan(dir.path(), "md").unwrap();
        let entry = source.entry("en", "index.md").unwrap();

        fs::remove_file(dir.path().join("en/index.md")).unwrap();
        let err = entry.load_raw().await.unwrap_err();
        assert!(matches!(err, ContentError::Io { .. }));
    }
}
