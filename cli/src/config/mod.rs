//! Typed configuration loaded from the `conf/` directory.
pub mod category_matcher;
pub mod chmod;
pub mod dock;
pub mod env;
pub mod plugins;
pub mod profiles;
pub mod prompt;
pub mod session;
pub mod symlinks;
pub mod toml_loader;
pub mod validation;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// All loaded configuration for a resolved profile.
#[derive(Debug)]
pub struct Config {
    /// Dotfiles root (contains `conf/` and `symlinks/`).
    pub root: PathBuf,
    /// The resolved profile.
    pub profile: profiles::Profile,
    /// Files to link into place.
    pub symlinks: Vec<symlinks::Symlink>,
    /// Permission modes to apply.
    pub chmod: Vec<chmod::ChmodEntry>,
    /// Optional shell plugins.
    pub plugins: Vec<plugins::Plugin>,
    /// Environment variable entries, unselected.
    pub env: Vec<env::EnvVar>,
    /// Dock layout.
    pub dock: dock::DockConfig,
    /// Prompt settings.
    pub prompt: prompt::PromptConfig,
    /// Login/logout hook settings.
    pub session: session::SessionConfig,
}

impl Config {
    /// Load all configuration for the given profile from the conf/ directory.
    ///
    /// # Errors
    ///
    /// Returns an error if any present file cannot be parsed.
    pub fn load(root: &Path, profile: profiles::Profile) -> Result<Self> {
        let conf = root.join("conf");
        let active = &profile.active_categories;

        let symlinks =
            symlinks::load(&conf.join("symlinks.toml"), active).context("loading symlinks.toml")?;
        let chmod = chmod::load(&conf.join("chmod.toml"), active).context("loading chmod.toml")?;
        let plugins =
            plugins::load(&conf.join("plugins.toml"), active).context("loading plugins.toml")?;
        let env = env::load(&conf.join("env.toml"), active).context("loading env.toml")?;
        let dock = dock::load(&conf.join("dock.toml"), active).context("loading dock.toml")?;
        let prompt =
            prompt::load(&conf.join("prompt.toml"), active).context("loading prompt.toml")?;
        let session =
            session::load(&conf.join("session.toml"), active).context("loading session.toml")?;

        Ok(Self {
            root: root.to_path_buf(),
            profile,
            symlinks,
            chmod,
            plugins,
            env,
            dock,
            prompt,
            session,
        })
    }

    /// Path of the repository's `symlinks/` directory.
    #[must_use]
    pub fn symlinks_dir(&self) -> PathBuf {
        self.root.join("symlinks")
    }

    /// Run the validation pass over this configuration.
    #[must_use]
    pub fn validate(&self) -> Vec<validation::ValidationWarning> {
        validation::validate_all(self)
    }
}
