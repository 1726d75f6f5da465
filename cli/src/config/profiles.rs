//! Profile definitions and category resolution.
use anyhow::Result;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use super::toml_loader;
use crate::error::ConfigError;
use crate::platform::Platform;

/// Profile used when none is requested.
pub const DEFAULT_PROFILE: &str = "base";

/// A resolved profile with its active categories.
#[derive(Debug, Clone)]
pub struct Profile {
    /// Profile name as requested.
    pub name: String,
    /// Categories whose config sections apply, in resolution order.
    pub active_categories: Vec<String>,
}

/// Raw profile definition from profiles.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProfileDef {
    #[serde(default)]
    include: Vec<String>,
    #[serde(default)]
    exclude: Vec<String>,
}

/// Load profile definitions, falling back to the built-in set when the
/// file is absent.
fn load_definitions(path: &Path) -> Result<BTreeMap<String, ProfileDef>> {
    if !path.exists() {
        return Ok(default_definitions());
    }
    toml_loader::load_config(path)
}

fn default_definitions() -> BTreeMap<String, ProfileDef> {
    BTreeMap::from([
        ("base".to_string(), ProfileDef::default()),
        (
            "server".to_string(),
            ProfileDef {
                include: vec!["server".to_string()],
                exclude: vec![],
            },
        ),
    ])
}

/// Resolve a profile by name: `["base", <os tag>] + include`, minus
/// `exclude`, without duplicates.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidProfile`] for unknown names, or an error if
/// profiles.toml cannot be parsed.
pub fn resolve(name: &str, conf_dir: &Path, platform: &Platform) -> Result<Profile> {
    let defs = load_definitions(&conf_dir.join("profiles.toml"))?;
    let def = defs.get(name).ok_or_else(|| ConfigError::InvalidProfile {
        name: name.to_string(),
        known: defs.keys().cloned().collect::<Vec<_>>().join(", "),
    })?;

    let mut active: Vec<String> = Vec::new();
    let candidates = [DEFAULT_PROFILE, platform.os.tag()]
        .into_iter()
        .map(str::to_string)
        .chain(def.include.iter().cloned());
    for category in candidates {
        if !def.exclude.contains(&category) && !active.contains(&category) {
            active.push(category);
        }
    }

    Ok(Profile {
        name: name.to_string(),
        active_categories: active,
    })
}
