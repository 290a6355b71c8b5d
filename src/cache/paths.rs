// Cache path utilities.
// Constructs filesystem paths for the key-value store and log files.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Get the base cache directory (~/.cache/showcase on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "showcase").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Directory holding one JSON file per stored key.
pub fn store_dir(base: &Path) -> PathBuf {
    base.join("store")
}

/// Directory for log files.
pub fn log_dir(base: &Path) -> PathBuf {
    base.join("logs")
}

/// Path of the file backing `key` inside a store directory.
pub fn entry_path(store_dir: &Path, key: &str) -> PathBuf {
    store_dir.join(format!("{}.json", sanitize_name(key)))
}

/// Sanitize a name for use in filesystem paths.
/// Replaces problematic characters with underscores.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("simple"), "simple");
        assert_eq!(sanitize_name("with/slash"), "with_slash");
        assert_eq!(sanitize_name("owner:name"), "owner_name");
    }

    #[test]
    fn test_store_paths() {
        let base = Path::new("/tmp/showcase");

        let entry = entry_path(&store_dir(base), "github-repos-octocat");
        assert!(entry.ends_with("store/github-repos-octocat.json"));

        let escaped = entry_path(&store_dir(base), "github-repos-../etc");
        assert!(escaped.ends_with("store/github-repos-.._etc.json"));

        assert!(log_dir(base).ends_with("logs"));
    }
}
