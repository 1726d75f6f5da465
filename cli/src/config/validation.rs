//! Configuration validation producing non-fatal warnings.
use std::path::Path;

use super::chmod::{ChmodEntry, parse_mode};
use super::dock::DockConfig;
use super::plugins::Plugin;
use super::prompt::PromptConfig;
use super::symlinks::Symlink;

/// A validation warning detected during configuration loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The configuration source (e.g., "symlinks.toml").
    pub source: String,
    /// The specific item that triggered the warning.
    pub item: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    /// Build a warning.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        item: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            item: item.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}: {}", self.source, self.item, self.message)
    }
}

/// Trait for configuration validators.
pub trait ConfigValidator {
    /// Validate the configuration against the dotfiles `root`.
    fn validate(&self, root: &Path) -> Vec<ValidationWarning>;
}

/// Validator for symlink configurations.
#[derive(Debug)]
pub struct SymlinkValidator<'a> {
    symlinks: &'a [Symlink],
}

impl<'a> SymlinkValidator<'a> {
    /// Wrap the loaded symlinks.
    #[must_use]
    pub const fn new(symlinks: &'a [Symlink]) -> Self {
        Self { symlinks }
    }
}

impl ConfigValidator for SymlinkValidator<'_> {
    fn validate(&self, root: &Path) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();
        let symlinks_dir = root.join("symlinks");

        for symlink in self.symlinks {
            if Path::new(&symlink.source).is_absolute() {
                warnings.push(ValidationWarning::new(
                    "symlinks.toml",
                    &symlink.source,
                    "source path should be relative to symlinks/ directory",
                ));
                continue;
            }

            let source_path = symlinks_dir.join(&symlink.source);
            if !source_path.exists() {
                warnings.push(ValidationWarning::new(
                    "symlinks.toml",
                    &symlink.source,
                    format!("source file does not exist: {}", source_path.display()),
                ));
            }
        }

        warnings
    }
}

/// Validator for chmod configurations.
#[derive(Debug)]
pub struct ChmodValidator<'a> {
    entries: &'a [ChmodEntry],
}

impl<'a> ChmodValidator<'a> {
    /// Wrap the loaded permission entries.
    #[must_use]
    pub const fn new(entries: &'a [ChmodEntry]) -> Self {
        Self { entries }
    }
}

impl ConfigValidator for ChmodValidator<'_> {
    fn validate(&self, _root: &Path) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        for entry in self.entries {
            if let Err(e) = parse_mode(&entry.mode) {
                warnings.push(ValidationWarning::new("chmod.toml", &entry.path, e.to_string()));
            }

            if Path::new(&entry.path).is_absolute() {
                warnings.push(ValidationWarning::new(
                    "chmod.toml",
                    &entry.path,
                    "path should be relative to $HOME directory",
                ));
            }
        }

        warnings
    }
}

/// Validator for plugin configurations.
#[derive(Debug)]
pub struct PluginValidator<'a> {
    plugins: &'a [Plugin],
}

impl<'a> PluginValidator<'a> {
    /// Wrap the loaded plugins.
    #[must_use]
    pub const fn new(plugins: &'a [Plugin]) -> Self {
        Self { plugins }
    }
}

impl ConfigValidator for PluginValidator<'_> {
    fn validate(&self, _root: &Path) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        for plugin in self.plugins {
            if plugin.candidates.is_empty() {
                warnings.push(ValidationWarning::new(
                    "plugins.toml",
                    &plugin.name,
                    "plugin has no candidate paths",
                ));
            }
            if plugin.shells.is_empty() {
                warnings.push(ValidationWarning::new(
                    "plugins.toml",
                    &plugin.name,
                    "plugin is not enabled for any shell",
                ));
            }
            #[allow(clippy::case_sensitive_file_extension_comparisons)]
            let zsh_script = plugin.candidates.iter().find(|c| c.ends_with(".zsh"));
            if plugin.shells.iter().any(|s| s == "bash")
                && let Some(zsh) = zsh_script
            {
                warnings.push(ValidationWarning::new(
                    "plugins.toml",
                    &plugin.name,
                    format!("bash-enabled plugin lists zsh script: {zsh}"),
                ));
            }
        }

        warnings
    }
}

/// Validator for the dock layout.
#[derive(Debug)]
pub struct DockValidator<'a> {
    dock: &'a DockConfig,
}

impl<'a> DockValidator<'a> {
    /// Wrap the loaded dock layout.
    #[must_use]
    pub const fn new(dock: &'a DockConfig) -> Self {
        Self { dock }
    }
}

impl ConfigValidator for DockValidator<'_> {
    fn validate(&self, _root: &Path) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        for app in &self.dock.apps {
            let trimmed = app.trim_end_matches('/');
            if !Path::new(trimmed).is_absolute()
                || !Path::new(trimmed)
                    .extension()
                    .is_some_and(|ext| ext == "app")
            {
                warnings.push(ValidationWarning::new(
                    "dock.toml",
                    app,
                    "dock entry should be an absolute path to a .app bundle",
                ));
            }
        }

        let mut seen: Vec<&str> = Vec::new();
        for pref in &self.dock.preferences {
            if seen.contains(&pref.key.as_str()) {
                warnings.push(ValidationWarning::new(
                    "dock.toml",
                    &pref.key,
                    "preference is set more than once",
                ));
            }
            seen.push(&pref.key);
        }

        warnings
    }
}

/// Validator for the prompt theme.
#[derive(Debug)]
pub struct PromptValidator<'a> {
    prompt: &'a PromptConfig,
}

impl<'a> PromptValidator<'a> {
    /// Wrap the loaded prompt settings.
    #[must_use]
    pub const fn new(prompt: &'a PromptConfig) -> Self {
        Self { prompt }
    }
}

impl ConfigValidator for PromptValidator<'_> {
    fn validate(&self, root: &Path) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if let Some(theme) = &self.prompt.theme {
            let path = root.join("symlinks").join(theme);
            if let Err(e) = crate::prompt::read_theme(&path) {
                warnings.push(ValidationWarning::new("prompt.toml", theme, format!("{e:#}")));
            }
        }

        let var = &self.prompt.columns_var;
        let valid_name = var
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && var.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid_name {
            warnings.push(ValidationWarning::new(
                "prompt.toml",
                var,
                "columns_var is not a valid shell variable name",
            ));
        }

        warnings
    }
}

/// Run every validator over a loaded [`Config`](super::Config).
#[must_use]
pub fn validate_all(config: &super::Config) -> Vec<ValidationWarning> {
    let validators: [&dyn ConfigValidator; 5] = [
        &SymlinkValidator::new(&config.symlinks),
        &ChmodValidator::new(&config.chmod),
        &PluginValidator::new(&config.plugins),
        &DockValidator::new(&config.dock),
        &PromptValidator::new(&config.prompt),
    ];
    validators
        .iter()
        .flat_map(|v| v.validate(&config.root))
        .collect()
}
