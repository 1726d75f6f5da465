//! Login hook: show system information once per login shell.
use crate::config::session::LoginConfig;
use crate::exec::Executor;

/// Run the first system-info tool from `config` that is on PATH.
///
/// Returns the tool that was started, or `None` when none is installed. A
/// tool exiting non-zero is only logged; its own output is all the user sees.
#[must_use]
pub fn run(config: &LoginConfig, executor: &dyn Executor) -> Option<String> {
    let Some(tool) = config.system_info.iter().find(|t| executor.which(t)) else {
        tracing::debug!("no system-info tool installed");
        return None;
    };
    tracing::debug!("running {tool}");
    if let Err(e) = executor.run_interactive(tool, &[]) {
        tracing::warn!("{tool} did not finish cleanly: {e:#}");
    }
    Some(tool.clone())
}
