//! Execution context handed to every task.
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::exec::Executor;
use crate::logging::Log;
use crate::platform::Platform;

/// Shared context for task execution.
pub struct Context {
    /// Configuration loaded from `conf/`.
    pub config: Arc<Config>,
    /// Detected platform information.
    pub platform: Arc<Platform>,
    /// Logger for output and task recording.
    pub log: Arc<dyn Log>,
    /// Whether to perform a dry run (preview changes without applying).
    pub dry_run: bool,
    /// User's home directory path.
    pub home: PathBuf,
    /// Command executor (for testing or real system calls).
    pub executor: Arc<dyn Executor>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &"<Config>")
            .field("platform", &self.platform)
            .field("log", &"<dyn Log>")
            .field("dry_run", &self.dry_run)
            .field("home", &self.home)
            .field("executor", &self.executor)
            .finish()
    }
}

impl Context {
    /// Creates a new context for task execution.
    ///
    /// # Errors
    ///
    /// Returns an error if the HOME environment variable is not set.
    pub fn new(
        config: Arc<Config>,
        platform: Arc<Platform>,
        log: Arc<dyn Log>,
        dry_run: bool,
        executor: Arc<dyn Executor>,
    ) -> Result<Self> {
        let home = std::env::var_os("HOME")
            .filter(|h| !h.is_empty())
            .ok_or_else(|| anyhow::anyhow!("HOME environment variable is not set"))?;

        Ok(Self {
            config,
            platform,
            log,
            dry_run,
            home: PathBuf::from(home),
            executor,
        })
    }

    /// Root directory of the dotfiles repository.
    #[must_use]
    pub fn root(&self) -> PathBuf {
        self.config.root.clone()
    }

    /// Symlinks source directory.
    #[must_use]
    pub fn symlinks_dir(&self) -> PathBuf {
        self.config.symlinks_dir()
    }
}
