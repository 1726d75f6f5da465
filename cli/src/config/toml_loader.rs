//! TOML configuration file parsing with category filtering.
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

use super::category_matcher;

/// Load a TOML file into `T`.
///
/// A missing file deserializes from empty TOML, so optional files simply
/// produce their default value.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return toml::from_str("").context("Failed to create empty config");
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
}

/// Load a TOML config file where each top-level table is a category section
/// and return every section as `(section_name, T)` pairs in file order.
///
/// `extract` maps the deserialized section value to the payload the caller
/// wants (e.g. `|s: SymlinkSection| s.symlinks`).
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if a section
/// does not match the expected shape.
pub fn load_section_items<S, T>(
    path: &Path,
    extract: impl Fn(S) -> T,
) -> Result<Vec<(String, T)>>
where
    S: DeserializeOwned,
{
    let table: toml::Table = load_config(path)?;
    table
        .into_iter()
        .map(|(name, value)| {
            let section: S = value.try_into().with_context(|| {
                format!("Invalid section [{name}] in {}", path.display())
            })?;
            Ok((name, extract(section)))
        })
        .collect()
}

/// Keep the payloads of sections whose categories are all active.
#[must_use]
pub fn filter_sections<T>(items: Vec<(String, T)>, active_categories: &[String]) -> Vec<T> {
    items
        .into_iter()
        .filter(|(section_name, _)| category_matcher::matches(section_name, active_categories))
        .map(|(_, item)| item)
        .collect()
}

/// Flatten list payloads of the active sections, preserving file order.
#[must_use]
pub fn filter_by_categories<T>(
    items: Vec<(String, Vec<T>)>,
    active_categories: &[String],
) -> Vec<T> {
    filter_sections(items, active_categories)
        .into_iter()
        .flatten()
        .collect()
}
