//! Named tasks that orchestrate resource changes.
pub mod chmod;
pub mod dock;
mod processing;
pub mod symlinks;

pub use processing::Context;
pub use processing::{
    OnError, Outcome, ProcessOpts, TaskResult, TaskStats, process_resources,
    process_resources_remove,
};

use anyhow::Result;

use crate::logging::TaskStatus;

/// A named, executable task.
pub trait Task {
    /// Human-readable task name.
    fn name(&self) -> &str;

    /// Whether this task should run on the current platform/profile.
    fn should_run(&self, ctx: &Context) -> bool;

    /// Execute the task.
    ///
    /// # Errors
    ///
    /// Returns an error if the task fails to execute, such as when system
    /// commands fail or file operations are not permitted.
    fn run(&self, ctx: &Context) -> Result<TaskResult>;
}

/// The complete set of tasks run by the uninstall command.
#[must_use]
pub fn all_uninstall_tasks() -> Vec<Box<dyn Task>> {
    vec![Box::new(symlinks::UninstallSymlinks)]
}

/// The complete set of tasks run by the install command, in execution order.
#[must_use]
pub fn all_install_tasks() -> Vec<Box<dyn Task>> {
    vec![
        Box::new(symlinks::InstallSymlinks),
        Box::new(chmod::ApplyFilePermissions),
        Box::new(dock::ConfigureDock),
    ]
}

/// Keep tasks whose name matches `only` (when given) and none of `skip`.
///
/// Matching is a case-insensitive substring test on the task name.
#[must_use]
pub fn filter_tasks<'a>(
    tasks: &'a [Box<dyn Task>],
    skip: &[String],
    only: &[String],
) -> Vec<&'a dyn Task> {
    let matches = |name: &str, patterns: &[String]| {
        patterns
            .iter()
            .any(|p| name.contains(&p.to_lowercase()))
    };
    tasks
        .iter()
        .filter(|t| {
            let name = t.name().to_lowercase();
            (only.is_empty() || matches(&name, only)) && !matches(&name, skip)
        })
        .map(|t| -> &dyn Task { t.as_ref() })
        .collect()
}

/// Execute a task, recording the result in the logger.
pub fn execute(task: &dyn Task, ctx: &Context) {
    if !task.should_run(ctx) {
        ctx.log
            .debug(&format!("skipping task: {} (not applicable)", task.name()));
        ctx.log
            .record_task(task.name(), TaskStatus::NotApplicable, None);
        return;
    }

    ctx.log.stage(task.name());

    match task.run(ctx) {
        Ok(TaskResult::Ok) => {
            ctx.log.record_task(task.name(), TaskStatus::Ok, None);
        }
        Ok(TaskResult::Skipped(reason)) => {
            ctx.log.info(&format!("skipped: {reason}"));
            ctx.log
                .record_task(task.name(), TaskStatus::Skipped, Some(&reason));
        }
        Ok(TaskResult::DryRun) => {
            ctx.log.record_task(task.name(), TaskStatus::DryRun, None);
        }
        Err(e) => {
            ctx.log.error(&format!("{}: {e:#}", task.name()));
            ctx.log
                .record_task(task.name(), TaskStatus::Failed, Some(&format!("{e:#}")));
        }
    }
}
