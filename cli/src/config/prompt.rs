//! Prompt theme configuration loading.
use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

use super::toml_loader;

/// Environment variable the precmd hook exports the terminal width into.
pub const DEFAULT_COLUMNS_VAR: &str = "ZDOT_COLUMNS";

/// Prompt settings merged across active sections. Later sections override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptConfig {
    /// oh-my-posh theme, relative to the symlinks/ directory.
    pub theme: Option<String>,
    /// Variable holding the terminal width for theme templates.
    pub columns_var: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            theme: None,
            columns_var: DEFAULT_COLUMNS_VAR.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PromptSection {
    theme: Option<String>,
    columns_var: Option<String>,
}

/// Load prompt.toml.
///
/// # Errors
///
/// Returns an error if the file cannot be parsed.
pub fn load(path: &Path, active_categories: &[String]) -> Result<PromptConfig> {
    let items = toml_loader::load_section_items(path, |s: PromptSection| s)?;
    let mut config = PromptConfig::default();
    for section in toml_loader::filter_sections(items, active_categories) {
        if let Some(theme) = section.theme {
            config.theme = Some(theme);
        }
        if let Some(var) = section.columns_var {
            config.columns_var = var;
        }
    }
    Ok(config)
}
