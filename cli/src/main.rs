//! `zdot` command-line entry point.

use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;

use zdot::cli::{Cli, Command};
use zdot::commands;
use zdot::logging::{Log, Logger, init_subscriber};

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    let command = args.command.name();
    init_subscriber(args.verbose, command, args.command.surface());
    let log = Arc::new(Logger::new(command));

    let result = match &args.command {
        Command::Install(opts) => commands::install::run(&args.global, opts, &log),
        Command::Uninstall => commands::uninstall::run(&args.global, &log),
        Command::Init(opts) => commands::init::run(&args.global, opts),
        Command::Login => commands::login::run(&args.global),
        Command::Logout => commands::logout::run(&args.global),
        Command::Prompt(opts) => {
            commands::prompt::run(opts);
            Ok(())
        }
        Command::Check => commands::check::run(&args.global, &log),
        Command::Completions(opts) => {
            commands::completions::run(opts);
            Ok(())
        }
        Command::Version => {
            commands::version::run();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log.error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
