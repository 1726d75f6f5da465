//! Task: lay out the macOS dock.
use anyhow::Result;

use super::{Context, ProcessOpts, Task, TaskResult, process_resources};
use crate::resources::dock::DockResource;

/// Lay out the macOS dock with `dockutil`.
#[derive(Debug)]
pub struct ConfigureDock;

impl Task for ConfigureDock {
    fn name(&self) -> &'static str {
        "Configure dock"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.platform.is_macos() && !ctx.config.dock.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        if !ctx.executor.which("dockutil") {
            return Ok(TaskResult::Skipped("dockutil not installed".to_string()));
        }
        let resource = DockResource::new(&ctx.config.dock, ctx.executor.as_ref());
        process_resources(ctx, [resource], &ProcessOpts::abort("configure"))
    }
}
