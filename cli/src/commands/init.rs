//! Command: print the shell init script.
use anyhow::Result;

use super::{CommandSetup, home_dir, process_env};
use crate::cli::{GlobalOpts, InitOpts};
use crate::exec::SystemExecutor;
use crate::shell::init::{InitContext, render};

/// Render the init script for the requested shell and print it to stdout.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded. Missing plugins
/// never fail.
#[allow(clippy::print_stdout)]
pub fn run(global: &GlobalOpts, opts: &InitOpts) -> Result<()> {
    let setup = CommandSetup::load(global)?;
    let home = home_dir();
    let ctx = InitContext {
        platform: &setup.platform,
        executor: &SystemExecutor,
        home: home.as_deref(),
        lookup: &process_env,
    };
    print!("{}", render(&setup.config, opts.shell, &ctx));
    Ok(())
}
