//! Top-level subcommand orchestration.
pub mod check;
pub mod completions;
pub mod init;
pub mod install;
pub mod login;
pub mod logout;
pub mod prompt;
pub mod uninstall;
pub mod version;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::config::profiles;
use crate::config::validation::ValidationWarning;
use crate::error::ConfigError;
use crate::exec::SystemExecutor;
use crate::logging::{Log, Logger};
use crate::platform::Platform;
use crate::tasks::{self, Context, Task};

/// Shared state produced by the common command setup sequence.
#[derive(Debug)]
pub struct CommandSetup {
    /// Detected platform.
    pub platform: Platform,
    /// Configuration for the resolved profile.
    pub config: Config,
}

impl CommandSetup {
    /// Resolve the root and profile, then load all configuration, logging
    /// each stage.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory cannot be determined, the
    /// profile cannot be resolved, or any configuration file fails to parse.
    pub fn init(global: &GlobalOpts, log: &Logger) -> Result<Self> {
        log.info(&format!("zdot {}", crate::version()));

        log.stage("Loading configuration");
        let setup = Self::load(global)?;
        log.info(&format!(
            "profile: {} ({})",
            setup.config.profile.name,
            setup.config.profile.active_categories.join(", ")
        ));
        log.info(&format!(
            "loaded {} symlinks, {} plugins, {} env vars",
            setup.config.symlinks.len(),
            setup.config.plugins.len(),
            setup.config.env.len()
        ));
        log.debug(&format!("{} chmod entries", setup.config.chmod.len()));
        log.debug(&format!("{} dock apps", setup.config.dock.apps.len()));

        report_warnings(&setup.config.validate(), log);
        Ok(setup)
    }

    /// Resolve the root and profile, then load all configuration quietly.
    ///
    /// # Errors
    ///
    /// Same as [`init`](Self::init).
    pub fn load(global: &GlobalOpts) -> Result<Self> {
        let platform = Platform::detect();
        let root = resolve_root(global)?;
        let profile = profiles::resolve(&global.profile, &root.join("conf"), &platform)?;
        let config = Config::load(&root, profile)?;
        tracing::debug!("root: {}", root.display());
        Ok(Self { platform, config })
    }

    /// Build the task [`Context`] for this setup.
    ///
    /// # Errors
    ///
    /// Returns an error if `HOME` is not set.
    pub fn context(self, global: &GlobalOpts, log: &Arc<Logger>) -> Result<Context> {
        Context::new(
            Arc::new(self.config),
            Arc::new(self.platform),
            Arc::clone(log) as Arc<dyn Log>,
            global.dry_run,
            Arc::new(SystemExecutor),
        )
    }
}

fn report_warnings(warnings: &[ValidationWarning], log: &Logger) {
    if warnings.is_empty() {
        return;
    }
    log.warn(&format!(
        "found {} configuration warning(s):",
        warnings.len()
    ));
    for warning in warnings {
        log.warn(&format!("  {warning}"));
    }
}

/// Execute every task in order, print the summary, and bail if any task failed.
///
/// # Errors
///
/// Returns an error if one or more tasks recorded a failure.
pub fn run_tasks_to_completion<'a>(
    tasks: impl IntoIterator<Item = &'a dyn Task>,
    ctx: &Context,
    log: &Logger,
) -> Result<()> {
    for task in tasks {
        tasks::execute(task, ctx);
    }

    log.print_summary();

    let count = log.failure_count();
    if count > 0 {
        anyhow::bail!("{count} task(s) failed");
    }
    Ok(())
}

/// Resolve the dotfiles root directory.
///
/// Order: `--root` / `ZDOT_ROOT`, then the repository the binary was built
/// in, then the current directory. A detected root must contain `conf/`.
///
/// # Errors
///
/// Returns [`ConfigError::RootNotFound`] if no candidate qualifies.
pub fn resolve_root(global: &GlobalOpts) -> Result<PathBuf> {
    if let Some(root) = &global.root {
        return Ok(root.clone());
    }

    if let Ok(exe) = std::env::current_exe()
        && let Some(parent) = exe.parent()
    {
        // cli/target/release/ or bin/
        for candidate in [parent.join("../../.."), parent.join("..")] {
            if is_root(&candidate) {
                return Ok(std::fs::canonicalize(&candidate)?);
            }
        }
    }

    let cwd = std::env::current_dir()?;
    if is_root(&cwd) {
        return Ok(cwd);
    }

    Err(ConfigError::RootNotFound.into())
}

fn is_root(dir: &Path) -> bool {
    dir.join("conf").is_dir()
}

/// Read a variable from the process environment.
pub(crate) fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// The user's home directory from `$HOME`.
pub(crate) fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}
