//! Command: login hook.
use anyhow::Result;

use super::CommandSetup;
use crate::cli::GlobalOpts;
use crate::exec::SystemExecutor;
use crate::session::login;

/// Show system information with the first installed tool.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded.
pub fn run(global: &GlobalOpts) -> Result<()> {
    let setup = CommandSetup::load(global)?;
    if login::run(&setup.config.session.login, &SystemExecutor).is_none() {
        tracing::debug!("login: nothing to show");
    }
    Ok(())
}
