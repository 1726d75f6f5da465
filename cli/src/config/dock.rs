//! macOS dock layout configuration loading.
use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

use super::toml_loader;

/// A boolean `com.apple.dock` preference.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DockPreference {
    /// Defaults key, e.g. `show-recents`.
    pub key: String,
    /// Desired value.
    pub value: bool,
}

/// Desired dock layout: apps in display order plus preferences.
#[derive(Debug, Clone, Default)]
pub struct DockConfig {
    /// Application bundle paths, left to right.
    pub apps: Vec<String>,
    /// Preferences written with `defaults write`.
    pub preferences: Vec<DockPreference>,
}

impl DockConfig {
    /// Whether there is nothing to configure.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.apps.is_empty() && self.preferences.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct DockSection {
    #[serde(default)]
    apps: Vec<String>,
    #[serde(default)]
    preferences: Vec<DockPreference>,
}

/// Load dock.toml, concatenating active sections in file order.
///
/// # Errors
///
/// Returns an error if the file cannot be parsed.
pub fn load(path: &Path, active_categories: &[String]) -> Result<DockConfig> {
    let items = toml_loader::load_section_items(path, |s: DockSection| s)?;
    let mut config = DockConfig::default();
    for section in toml_loader::filter_sections(items, active_categories) {
        config.apps.extend(section.apps);
        config.preferences.extend(section.preferences);
    }
    Ok(config)
}
