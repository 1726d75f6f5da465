//! Uninstall command implementation.
use anyhow::Result;
use std::sync::Arc;

use super::CommandSetup;
use crate::cli::GlobalOpts;
use crate::logging::Logger;
use crate::tasks::{self, Task};

/// Run the uninstall command.
///
/// # Errors
///
/// Returns an error if profile resolution, configuration loading, or task execution fails.
pub fn run(global: &GlobalOpts, log: &Arc<Logger>) -> Result<()> {
    let ctx = CommandSetup::init(global, log)?.context(global, log)?;
    let tasks = tasks::all_uninstall_tasks();
    super::run_tasks_to_completion(tasks.iter().map(|t| -> &dyn Task { t.as_ref() }), &ctx, log)
}
