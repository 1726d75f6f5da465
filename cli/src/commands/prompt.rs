//! Command: print the prompt layout tier.
use crate::cli::PromptOpts;
use crate::prompt::{Layout, detect_columns};

/// Width assumed when neither `--columns` nor the terminal provides one.
const DEFAULT_COLUMNS: u16 = 80;

/// Print the [`Layout`] name for the requested or detected width.
#[allow(clippy::print_stdout)]
pub fn run(opts: &PromptOpts) {
    let columns = opts
        .columns
        .or_else(detect_columns)
        .unwrap_or(DEFAULT_COLUMNS);
    tracing::debug!("columns: {columns}");
    println!("{}", Layout::for_columns(columns));
}
