//! Command: logout hook.
use anyhow::Result;

use super::{CommandSetup, home_dir, process_env};
use crate::cli::GlobalOpts;
use crate::exec::SystemExecutor;
use crate::logging::format_local_timestamp;
use crate::session::logout;
use crate::shell::expand::Expander;

/// Clear the screen, purge the scratch directory, and print a farewell line.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded. Scratch directory
/// problems are only logged.
#[allow(clippy::print_stdout)]
pub fn run(global: &GlobalOpts) -> Result<()> {
    let setup = CommandSetup::load(global)?;
    let home = home_dir();
    let expander = Expander::new(home.as_deref(), &process_env, &SystemExecutor);
    let report = logout::run(&setup.config.session.logout, &expander, &SystemExecutor);
    tracing::debug!("logout: {report:?}");
    println!("logged out: {}", format_local_timestamp());
    Ok(())
}
