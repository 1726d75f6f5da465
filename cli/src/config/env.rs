//! Environment variable configuration loading and selection.
use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

use super::toml_loader;

/// An environment variable assignment, optionally conditional on another
/// variable.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvVar {
    /// Variable to export.
    pub name: String,
    /// Value, emitted double-quoted so `$VAR` references expand in the shell.
    pub value: String,
    /// Only applies when this variable is set and non-empty.
    #[serde(default)]
    pub when_env: Option<String>,
    /// Additionally require `when_env` to equal this value.
    #[serde(default)]
    pub equals: Option<String>,
}

impl EnvVar {
    /// Evaluate the entry's condition against `lookup`.
    pub fn applies(&self, lookup: impl Fn(&str) -> Option<String>) -> bool {
        let Some(var) = &self.when_env else {
            return true;
        };
        match (lookup(var).filter(|v| !v.is_empty()), &self.equals) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(actual), Some(expected)) => &actual == expected,
        }
    }
}

/// Pick one entry per variable name: the first whose condition holds.
///
/// Names keep the order of their first appearance.
pub fn select<'a>(
    vars: &'a [EnvVar],
    lookup: impl Fn(&str) -> Option<String>,
) -> Vec<&'a EnvVar> {
    let mut names: Vec<&str> = Vec::new();
    for var in vars {
        if !names.contains(&var.name.as_str()) {
            names.push(&var.name);
        }
    }
    names
        .into_iter()
        .filter_map(|name| {
            vars.iter()
                .filter(|v| v.name == name)
                .find(|v| v.applies(&lookup))
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct EnvSection {
    #[serde(default)]
    vars: Vec<EnvVar>,
}

/// Load env entries from env.toml, filtered by active categories.
///
/// # Errors
///
/// Returns an error if the file cannot be parsed.
pub fn load(path: &Path, active_categories: &[String]) -> Result<Vec<EnvVar>> {
    let items = toml_loader::load_section_items(path, |s: EnvSection| s.vars)?;
    Ok(toml_loader::filter_by_categories(items, active_categories))
}
