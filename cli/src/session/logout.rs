//! Logout hook: clear the screen and empty the scratch directory.
use std::path::PathBuf;

use crate::config::session::LogoutConfig;
use crate::exec::Executor;
use crate::resources::helpers::fs::purge_dir_contents;
use crate::shell::expand::Expander;

/// What the logout hook did.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LogoutReport {
    /// Whether the screen was cleared.
    pub cleared: bool,
    /// Scratch directory and the number of entries removed from it.
    pub purged: Option<(PathBuf, usize)>,
}

/// Clear the screen and empty the scratch directory as configured.
///
/// Nothing here fails the hook: a scratch directory that cannot be expanded
/// or purged is logged and left alone.
#[must_use]
pub fn run(
    config: &LogoutConfig,
    expander: &Expander<'_>,
    executor: &dyn Executor,
) -> LogoutReport {
    let mut report = LogoutReport::default();

    if config.clear {
        match executor.run_interactive("clear", &[]) {
            Ok(()) => report.cleared = true,
            Err(e) => tracing::warn!("clear failed: {e:#}"),
        }
    }

    if let Some(tmp_dir) = &config.tmp_dir {
        match expander.expand(tmp_dir) {
            Ok(dir) => match purge_dir_contents(&dir) {
                Ok(removed) => {
                    tracing::debug!("purged {removed} entries from {}", dir.display());
                    report.purged = Some((dir, removed));
                }
                Err(e) => tracing::warn!("{e:#}"),
            },
            Err(e) => tracing::warn!("tmp_dir {tmp_dir}: {e}"),
        }
    }

    report
}
