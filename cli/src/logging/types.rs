//! Task records, the [`Log`] trait, and how a command's output is consumed.

/// `tracing` target for stage headers.
pub(super) const STAGE_TARGET: &str = "zdot::stage";
/// `tracing` target for dry-run previews.
pub(super) const DRY_RUN_TARGET: &str = "zdot::dry_run";

/// One task's line in the run summary.
#[derive(Debug, Clone)]
pub struct TaskEntry {
    /// Task name as shown to the user.
    pub name: String,
    /// How the task ended.
    pub status: TaskStatus,
    /// Skip reason or error text.
    pub message: Option<String>,
}

/// How a task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Ran and succeeded.
    Ok,
    /// Not meant for this platform or profile.
    NotApplicable,
    /// A required tool is missing.
    Skipped,
    /// Previewed only.
    DryRun,
    /// Returned an error.
    Failed,
}

impl TaskStatus {
    /// Summary icon and the SGR code it is painted with.
    pub(super) const fn mark(self) -> (&'static str, &'static str) {
        match self {
            Self::Ok => ("✓", "32"),
            Self::NotApplicable => ("·", "2"),
            Self::Skipped => ("○", "33"),
            Self::DryRun => ("~", "37"),
            Self::Failed => ("✗", "31"),
        }
    }
}

/// Who reads a command's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// A person at a terminal (`install`, `check`, ...). Progress goes to
    /// stdout, problems to stderr, and each run starts a fresh
    /// `<command>.log`.
    Terminal,
    /// The shell itself (`init`, `prompt`, `login`, `logout`). Stdout is
    /// the caller's, the console shows warnings only, and every run appends
    /// to the shared `hooks.log`.
    Hook,
}

/// Logging backend used by commands and tasks.
///
/// Tests capture output through a [`Logger`](super::Logger) without a global
/// subscriber.
pub trait Log: Send + Sync {
    /// Section header.
    fn stage(&self, msg: &str);
    /// Progress line.
    fn info(&self, msg: &str);
    /// Detail for `--verbose` and the log file.
    fn debug(&self, msg: &str);
    /// Something was left undone.
    fn warn(&self, msg: &str);
    /// Something failed.
    fn error(&self, msg: &str);
    /// What a dry run would change.
    fn dry_run(&self, msg: &str);
    /// Record a task's outcome for the summary.
    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>);
}
