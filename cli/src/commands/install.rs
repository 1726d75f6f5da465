//! Install command implementation.
use anyhow::Result;
use std::sync::Arc;

use super::CommandSetup;
use crate::cli::{GlobalOpts, InstallOpts};
use crate::logging::{Log, Logger};
use crate::tasks;

/// Run the install command.
///
/// # Errors
///
/// Returns an error if profile resolution, configuration loading, or task execution fails.
pub fn run(global: &GlobalOpts, opts: &InstallOpts, log: &Arc<Logger>) -> Result<()> {
    let ctx = CommandSetup::init(global, log)?.context(global, log)?;
    let all = tasks::all_install_tasks();
    let selected = tasks::filter_tasks(&all, &opts.skip, &opts.only);
    if selected.len() < all.len() {
        log.debug(&format!(
            "running {} of {} tasks",
            selected.len(),
            all.len()
        ));
    }
    super::run_tasks_to_completion(selected, &ctx, log)
}
