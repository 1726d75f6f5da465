//! Task: set file modes from `chmod.toml`.
use anyhow::Result;

use super::{Context, ProcessOpts, Task, TaskResult, process_resources};
use crate::resources::chmod::ChmodResource;

/// Apply file permissions from chmod.toml.
#[derive(Debug)]
pub struct ApplyFilePermissions;

impl Task for ApplyFilePermissions {
    fn name(&self) -> &'static str {
        "Apply file permissions"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        cfg!(unix) && !ctx.config.chmod.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let resources = ctx
            .config
            .chmod
            .iter()
            .map(|entry| ChmodResource::from_entry(entry, &ctx.home))
            .collect::<Result<Vec<_>>>()?;
        process_resources(ctx, resources, &ProcessOpts::warn("chmod"))
    }
}
