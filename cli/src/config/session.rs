//! Login and logout hook configuration loading.
use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

use super::toml_loader;

/// Settings for `zdot login`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginConfig {
    /// System-info tools in preference order; the first on PATH runs.
    pub system_info: Vec<String>,
}

/// Settings for `zdot logout`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogoutConfig {
    /// Clear the terminal before printing the farewell line.
    pub clear: bool,
    /// Scratch directory emptied on logout. May start with `~`.
    pub tmp_dir: Option<String>,
}

/// Merged session settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// Login hook settings.
    pub login: LoginConfig,
    /// Logout hook settings.
    pub logout: LogoutConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LoginSection {
    #[serde(default)]
    system_info: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LogoutSection {
    clear: Option<bool>,
    tmp_dir: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SessionSection {
    #[serde(default)]
    login: LoginSection,
    #[serde(default)]
    logout: LogoutSection,
}

/// Load session.toml. Tool lists concatenate; scalar settings from later
/// sections override earlier ones.
///
/// # Errors
///
/// Returns an error if the file cannot be parsed.
pub fn load(path: &Path, active_categories: &[String]) -> Result<SessionConfig> {
    let items = toml_loader::load_section_items(path, |s: SessionSection| s)?;
    let mut config = SessionConfig::default();
    for section in toml_loader::filter_sections(items, active_categories) {
        config.login.system_info.extend(section.login.system_info);
        if let Some(clear) = section.logout.clear {
            config.logout.clear = clear;
        }
        if let Some(dir) = section.logout.tmp_dir {
            config.logout.tmp_dir = Some(dir);
        }
    }
    Ok(config)
}
