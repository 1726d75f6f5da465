//! Command: validate configuration.
use anyhow::Result;

use super::CommandSetup;
use crate::cli::GlobalOpts;
use crate::logging::{Log, Logger};

/// Load the configuration and fail if validation reports any warning.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or is not clean.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    let warnings = setup.config.validate();
    if !warnings.is_empty() {
        anyhow::bail!("{} configuration warning(s)", warnings.len());
    }
    log.info("configuration ok");
    Ok(())
}
