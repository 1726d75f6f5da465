//! Optional shell plugin configuration loading.
use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

use super::toml_loader;

/// An optional shell plugin and the places it may be installed.
#[derive(Debug, Clone, Deserialize)]
pub struct Plugin {
    /// Display name, used in logs and validation warnings.
    pub name: String,
    /// Candidate paths in priority order. May contain `~`, `$VAR` and
    /// `$(command)`.
    #[serde(default)]
    pub candidates: Vec<String>,
    /// Shells that should source this plugin.
    #[serde(default = "default_shells")]
    pub shells: Vec<String>,
}

impl Plugin {
    /// Whether the plugin applies to `shell`.
    #[must_use]
    pub fn supports(&self, shell: &str) -> bool {
        self.shells.iter().any(|s| s == shell)
    }
}

fn default_shells() -> Vec<String> {
    vec!["zsh".to_string()]
}

#[derive(Debug, Deserialize)]
struct PluginSection {
    #[serde(default)]
    plugins: Vec<Plugin>,
}

/// Load plugins from plugins.toml, filtered by active categories.
///
/// # Errors
///
/// Returns an error if the file cannot be parsed.
pub fn load(path: &Path, active_categories: &[String]) -> Result<Vec<Plugin>> {
    let items = toml_loader::load_section_items(path, |s: PluginSection| s.plugins)?;
    Ok(toml_loader::filter_by_categories(items, active_categories))
}
