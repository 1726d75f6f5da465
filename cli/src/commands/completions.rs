//! Command: print shell completions.
use clap::CommandFactory;

use crate::cli::{Cli, CompletionsOpts};

/// Write completions for `opts.shell` to stdout.
pub fn run(opts: &CompletionsOpts) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(opts.shell, &mut command, name, &mut std::io::stdout());
}
