//! [`Logger`]: the [`Log`] implementation that also keeps the run summary.
use std::fmt;
use std::path::PathBuf;
use std::sync::Mutex;

use super::types::{DRY_RUN_TARGET, Log, STAGE_TARGET, Surface, TaskEntry, TaskStatus};
use super::utils::log_file_path;

/// Forwards to `tracing` and records task outcomes for [`Logger::print_summary`].
#[derive(Debug)]
pub struct Logger {
    tasks: Mutex<Vec<TaskEntry>>,
    log_file: Option<PathBuf>,
}

/// Task counts per status.
#[derive(Debug, Default, PartialEq, Eq)]
struct Tally {
    ok: usize,
    not_applicable: usize,
    skipped: usize,
    dry_run: usize,
    failed: usize,
}

impl Tally {
    fn of(entries: &[TaskEntry]) -> Self {
        let mut tally = Self::default();
        for entry in entries {
            *match entry.status {
                TaskStatus::Ok => &mut tally.ok,
                TaskStatus::NotApplicable => &mut tally.not_applicable,
                TaskStatus::Skipped => &mut tally.skipped,
                TaskStatus::DryRun => &mut tally.dry_run,
                TaskStatus::Failed => &mut tally.failed,
            } += 1;
        }
        tally
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.ok + self.not_applicable + self.skipped + self.dry_run + self.failed;
        write!(f, "{total} tasks:")?;
        let parts = [
            (self.ok, "ok", TaskStatus::Ok),
            (self.not_applicable, "n/a", TaskStatus::NotApplicable),
            (self.skipped, "skipped", TaskStatus::Skipped),
            (self.dry_run, "dry-run", TaskStatus::DryRun),
            (self.failed, "failed", TaskStatus::Failed),
        ];
        for (i, (count, label, status)) in parts.into_iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}\x1b[{}m{count} {label}\x1b[0m", status.mark().1)?;
        }
        Ok(())
    }
}

impl Logger {
    /// Logger for a terminal run of `command`. The file itself belongs to
    /// the subscriber; the path is only quoted in the summary.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            tasks: Mutex::new(Vec::new()),
            log_file: log_file_path(Surface::Terminal, command),
        }
    }

    fn entries(&self) -> Vec<TaskEntry> {
        self.tasks.lock().map_or_else(|_| Vec::new(), |g| g.clone())
    }

    /// Recorded task entries.
    #[cfg(test)]
    pub(crate) fn task_entries(&self) -> Vec<TaskEntry> {
        self.entries()
    }

    /// Number of tasks recorded as [`TaskStatus::Failed`].
    #[must_use]
    pub fn failure_count(&self) -> usize {
        Tally::of(&self.entries()).failed
    }

    /// Log one line per recorded task, the totals, and the log file path.
    pub fn print_summary(&self) {
        let entries = self.entries();
        if entries.is_empty() {
            return;
        }
        self.stage("Summary");
        for entry in &entries {
            let (icon, sgr) = entry.status.mark();
            let note = entry
                .message
                .as_deref()
                .map_or_else(String::new, |m| format!(" ({m})"));
            self.info(&format!("\x1b[{sgr}m{icon} {}{note}\x1b[0m", entry.name));
        }
        self.info(&Tally::of(&entries).to_string());
        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

impl Log for Logger {
    fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>) {
        if let Ok(mut tasks) = self.tasks.lock() {
            tasks.push(TaskEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }
}
