//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find the config file by walking up from `start`.
///
/// Absolute names are returned as-is when they exist.
///
/// ```text
/// /srv/site/content/en/   ← start
/// /srv/site/docs.toml     ← found
/// ```
pub fn find_config_file(config_name: &Path, start: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    start
        .ancestors()
        .map(|dir| dir.join(config_name))
        .find(|candidate| candidate.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_parent() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("content/en");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("docs.toml"), "").unwrap();

        let found = find_config_file(Path::new("docs.toml"), &nested).unwrap();
        assert_eq!(found, dir.path().join("docs.toml"));
    }

    #[test]
    fn test_find_config_missing() {
        let dir = TempDir::new().unwrap();
        assert!(find_config_file(Path::new("no-such-config.toml"), dir.path()).is_none());
    }
}
