//! Resource processing loop: check each resource, install or uninstall it,
//! and tally the outcome.

pub mod context;
mod reconcile;

pub use context::Context;
pub use reconcile::Outcome;

use anyhow::Result;

use crate::resources::Resource;

/// Result of a single task execution.
///
/// # Examples
///
/// ```
/// use zdot::tasks::TaskResult;
///
/// let ok = TaskResult::Ok;
/// let skipped = TaskResult::Skipped("dockutil not installed".into());
///
/// assert!(matches!(ok, TaskResult::Ok));
/// assert!(matches!(skipped, TaskResult::Skipped(_)));
/// assert!(matches!(TaskResult::DryRun, TaskResult::DryRun));
/// ```
#[derive(Debug, Clone)]
pub enum TaskResult {
    /// Task completed successfully.
    Ok,
    /// Task was skipped (a required tool is missing).
    Skipped(String),
    /// Task ran in dry-run mode.
    DryRun,
}

/// Counters for batch tasks that process many items.
///
/// # Examples
///
/// ```
/// use zdot::tasks::TaskStats;
///
/// let stats = TaskStats { changed: 1, already_ok: 2, skipped: 3 };
/// assert_eq!(stats.summary(false), "1 changed, 2 already ok, 3 skipped");
/// assert_eq!(stats.summary(true), "1 would change, 2 already ok, 3 skipped");
/// ```
#[derive(Debug, Default)]
pub struct TaskStats {
    /// Number of items changed or applied.
    pub changed: u32,
    /// Number of items already in the correct state.
    pub already_ok: u32,
    /// Number of items skipped due to errors or inapplicability.
    pub skipped: u32,
}

impl TaskStats {
    /// Create a new empty stats counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one resource outcome.
    pub const fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Changed => self.changed += 1,
            Outcome::Unchanged => self.already_ok += 1,
            Outcome::Skipped => self.skipped += 1,
        }
    }

    /// Format the summary string (e.g. "3 changed, 10 already ok, 1 skipped").
    #[must_use]
    pub fn summary(&self, dry_run: bool) -> String {
        let verb = if dry_run { "would change" } else { "changed" };
        if self.skipped > 0 {
            format!(
                "{} {verb}, {} already ok, {} skipped",
                self.changed, self.already_ok, self.skipped
            )
        } else {
            format!("{} {verb}, {} already ok", self.changed, self.already_ok)
        }
    }

    /// Log the summary and return the appropriate `TaskResult`.
    #[must_use]
    pub fn finish(self, ctx: &Context) -> TaskResult {
        ctx.log.info(&self.summary(ctx.dry_run));
        if ctx.dry_run {
            TaskResult::DryRun
        } else {
            TaskResult::Ok
        }
    }
}

/// How a failed resource affects the rest of its task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnError {
    /// Stop the task and fail it.
    Abort,
    /// Warn, count the resource as skipped, and carry on.
    Warn,
}

/// Options for [`process_resources`].
///
/// # Examples
///
/// ```
/// use zdot::tasks::{OnError, ProcessOpts};
///
/// assert_eq!(ProcessOpts::abort("link").on_error, OnError::Abort);
/// assert_eq!(ProcessOpts::warn("chmod").on_error, OnError::Warn);
/// ```
#[derive(Debug, Clone)]
pub struct ProcessOpts<'a> {
    /// Verb for log messages (e.g., "link", "chmod").
    pub verb: &'a str,
    /// What a failed `apply()` does to the task.
    pub on_error: OnError,
}

impl<'a> ProcessOpts<'a> {
    /// Fail the task on the first resource that cannot be applied.
    #[must_use]
    pub const fn abort(verb: &'a str) -> Self {
        Self {
            verb,
            on_error: OnError::Abort,
        }
    }

    /// Keep going past resources that cannot be applied.
    #[must_use]
    pub const fn warn(verb: &'a str) -> Self {
        Self {
            verb,
            on_error: OnError::Warn,
        }
    }
}

/// Process resources by checking each one's current state and applying as needed.
///
/// # Errors
///
/// Returns an error if any resource fails to check its state, or fails to
/// apply while `opts.on_error` is [`OnError::Abort`].
pub fn process_resources<R: Resource>(
    ctx: &Context,
    resources: impl IntoIterator<Item = R>,
    opts: &ProcessOpts,
) -> Result<TaskResult> {
    let mut stats = TaskStats::new();
    for resource in resources {
        let current = resource.current_state()?;
        stats.record(reconcile::install(ctx, &resource, current, opts)?);
    }
    Ok(stats.finish(ctx))
}

/// Process resources for removal.
///
/// Only resources in [`ResourceState::Correct`](crate::resources::ResourceState::Correct)
/// are removed. Everything else is left alone.
///
/// # Errors
///
/// Returns an error if a resource fails to check its current state or fails
/// during the removal process.
pub fn process_resources_remove<R: Resource>(
    ctx: &Context,
    resources: impl IntoIterator<Item = R>,
    verb: &str,
) -> Result<TaskResult> {
    let mut stats = TaskStats::new();
    for resource in resources {
        let current = resource.current_state()?;
        stats.record(reconcile::uninstall(ctx, &resource, &current, verb)?);
    }
    Ok(stats.finish(ctx))
}
