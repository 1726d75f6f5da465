//! Symlink configuration loading.
use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

use super::toml_loader;

/// One entry of `symlinks.toml`: a file under `symlinks/` and where it goes.
///
/// Written either as `"zshrc"` or as `{ source = "...", target = "..." }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "Entry")]
pub struct Symlink {
    /// Path under `symlinks/`.
    pub source: String,
    /// Explicit target, relative to `$HOME` or absolute. `None` means the
    /// dotted-name convention.
    pub target: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Entry {
    Source(String),
    Pair { source: String, target: String },
}

impl From<Entry> for Symlink {
    fn from(entry: Entry) -> Self {
        match entry {
            Entry::Source(source) => Self {
                source,
                target: None,
            },
            Entry::Pair { source, target } => Self {
                source,
                target: Some(target),
            },
        }
    }
}

#[derive(Deserialize)]
struct Section {
    #[serde(default)]
    symlinks: Vec<Symlink>,
}

/// Symlinks from the sections of `path` matching `active_categories`.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be parsed.
pub fn load(path: &Path, active_categories: &[String]) -> Result<Vec<Symlink>> {
    let sections = toml_loader::load_section_items(path, |s: Section| s.symlinks)?;
    Ok(toml_loader::filter_by_categories(sections, active_categories))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::test_helpers::{assert_load_missing_returns_empty, write_temp_toml};

    fn cats(tags: &[&str]) -> Vec<String> {
        tags.iter().map(ToString::to_string).collect()
    }

    const SYMLINKS: &str = r#"[base]
symlinks = ["zshrc", "ssh/config"]

[server]
symlinks = [{ source = "etc/ssh/sshd_config", target = "/etc/ssh/sshd_config" }]
"#;

    #[test]
    fn plain_entries_use_the_convention() {
        let (_dir, path) = write_temp_toml(SYMLINKS);
        let symlinks = load(&path, &cats(&["base", "macos"])).unwrap();
        let sources: Vec<&str> = symlinks.iter().map(|s| s.source.as_str()).collect();
        assert_eq!(sources, ["zshrc", "ssh/config"]);
        assert!(symlinks.iter().all(|s| s.target.is_none()));
    }

    #[test]
    fn server_section_adds_explicit_target() {
        let (_dir, path) = write_temp_toml(SYMLINKS);
        let symlinks = load(&path, &cats(&["base", "linux", "server"])).unwrap();
        assert_eq!(symlinks.len(), 3);
        assert_eq!(symlinks[2].source, "etc/ssh/sshd_config");
        assert_eq!(symlinks[2].target.as_deref(), Some("/etc/ssh/sshd_config"));
    }

    #[test]
    fn entry_with_only_a_target_is_rejected() {
        let (_dir, path) = write_temp_toml("[base]\nsymlinks = [{ target = \"/etc/motd\" }]\n");
        assert!(load(&path, &cats(&["base"])).is_err());
    }

    #[test]
    fn load_missing_file_returns_empty() {
        assert_load_missing_returns_empty(load);
    }
}
