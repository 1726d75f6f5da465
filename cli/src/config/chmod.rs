//! Chmod entry configuration loading.
use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

use super::toml_loader;
use crate::error::ConfigError;

/// A file permission directive.
#[derive(Debug, Clone, Deserialize)]
pub struct ChmodEntry {
    /// Permission mode (e.g., "600", "0755").
    pub mode: String,
    /// Path under `$HOME` without the leading dot, e.g. `ssh/config`.
    pub path: String,
}

impl ChmodEntry {
    /// Parse [`mode`](Self::mode) as octal permission bits.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMode`] unless the mode is three or four
    /// octal digits.
    pub fn parse_mode(&self) -> Result<u32, ConfigError> {
        parse_mode(&self.mode)
    }
}

/// Parse a three- or four-digit octal mode string.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidMode`] for anything else.
pub fn parse_mode(mode: &str) -> Result<u32, ConfigError> {
    let valid_len = (3..=4).contains(&mode.len());
    if !valid_len || !mode.chars().all(|c| ('0'..='7').contains(&c)) {
        return Err(ConfigError::InvalidMode(mode.to_string()));
    }
    u32::from_str_radix(mode, 8).map_err(|_| ConfigError::InvalidMode(mode.to_string()))
}

/// TOML section containing chmod entries.
#[derive(Debug, Deserialize)]
struct ChmodSection {
    #[serde(default)]
    permissions: Vec<ChmodEntry>,
}

/// Load chmod entries from chmod.toml, filtered by active categories.
///
/// # Errors
///
/// Returns an error if the file cannot be parsed.
pub fn load(path: &Path, active_categories: &[String]) -> Result<Vec<ChmodEntry>> {
    let items = toml_loader::load_section_items(path, |s: ChmodSection| s.permissions)?;
    Ok(toml_loader::filter_by_categories(items, active_categories))
}
