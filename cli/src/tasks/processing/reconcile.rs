//! Bring one resource in line with the configuration, or take it back out.

use anyhow::{Result, anyhow};

use super::context::Context;
use super::{OnError, ProcessOpts};
use crate::resources::{Resource, ResourceChange, ResourceState};

/// What happened to one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Changed, or would change in a dry run.
    Changed,
    /// Already as configured, or not ours to touch.
    Unchanged,
    /// Left alone because it cannot be handled.
    Skipped,
}

/// Install `resource` given the `state` it was found in.
pub(super) fn install<R: Resource>(
    ctx: &Context,
    resource: &R,
    state: ResourceState,
    opts: &ProcessOpts,
) -> Result<Outcome> {
    let desc = resource.description();
    let verb = opts.verb;
    let current = match state {
        ResourceState::Correct => {
            ctx.log.debug(&format!("ok: {desc}"));
            return Ok(Outcome::Unchanged);
        }
        ResourceState::Invalid { reason } => {
            ctx.log.debug(&format!("skipping {desc}: {reason}"));
            return Ok(Outcome::Skipped);
        }
        ResourceState::Missing => None,
        ResourceState::Incorrect { current } => Some(current),
    };

    if ctx.dry_run {
        ctx.log.dry_run(&current.map_or_else(
            || format!("would {verb} {desc}"),
            |current| format!("would {verb} {desc} (currently {current})"),
        ));
        return Ok(Outcome::Changed);
    }

    let failure = match resource.apply() {
        Ok(ResourceChange::Applied) => {
            ctx.log.debug(&format!("{verb}: {desc}"));
            return Ok(Outcome::Changed);
        }
        Ok(ResourceChange::AlreadyCorrect) => return Ok(Outcome::Unchanged),
        Ok(ResourceChange::Skipped { reason }) => anyhow!(reason),
        Err(e) => e,
    };
    match opts.on_error {
        OnError::Abort => Err(failure.context(format!("failed to {verb} {desc}"))),
        OnError::Warn => {
            ctx.log.warn(&format!("failed to {verb} {desc}: {failure:#}"));
            Ok(Outcome::Skipped)
        }
    }
}

/// Take `resource` back out. Only a resource found [`ResourceState::Correct`]
/// is ours; anything else is left as it is.
pub(super) fn uninstall<R: Resource>(
    ctx: &Context,
    resource: &R,
    state: &ResourceState,
    verb: &str,
) -> Result<Outcome> {
    let desc = resource.description();
    if *state != ResourceState::Correct {
        ctx.log.debug(&format!("not ours: {desc}"));
        return Ok(Outcome::Unchanged);
    }
    if ctx.dry_run {
        ctx.log.dry_run(&format!("would {verb} {desc}"));
        return Ok(Outcome::Changed);
    }
    resource.remove()?;
    ctx.log.debug(&format!("{verb}: {desc}"));
    Ok(Outcome::Changed)
}
