//! Command-line interface definitions.
use clap::{Parser, Subcommand};

use crate::config::profiles::DEFAULT_PROFILE;
use crate::logging::Surface;
use crate::shell::Shell;

/// Top-level CLI entry point for the zdot engine.
#[derive(Parser, Debug)]
#[command(
    name = "zdot",
    about = "Workstation dotfiles engine: shell init, config links, dock layout",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Profile to use (base, server)
    #[arg(short, long, global = true, env = "ZDOT_PROFILE", default_value = DEFAULT_PROFILE)]
    pub profile: String,

    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Override dotfiles root directory
    #[arg(long, global = true, env = "ZDOT_ROOT")]
    pub root: Option<std::path::PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Link dotfiles and configure the system
    Install(InstallOpts),
    /// Replace linked dotfiles with plain copies
    Uninstall,
    /// Print the shell init script for eval
    Init(InitOpts),
    /// Run the login hook
    Login,
    /// Run the logout hook
    Logout,
    /// Print the prompt layout for a terminal width
    Prompt(PromptOpts),
    /// Validate configuration
    Check,
    /// Print shell completions
    Completions(CompletionsOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Name used for the log file and the log header.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Install(_) => "install",
            Self::Uninstall => "uninstall",
            Self::Init(_) => "init",
            Self::Login => "login",
            Self::Logout => "logout",
            Self::Prompt(_) => "prompt",
            Self::Check => "check",
            Self::Completions(_) => "completions",
            Self::Version => "version",
        }
    }

    /// Who reads this command's output. Commands the shell runs on its own
    /// are hooks.
    #[must_use]
    pub const fn surface(&self) -> Surface {
        match self {
            Self::Init(_) | Self::Prompt(_) | Self::Completions(_) | Self::Login | Self::Logout => {
                Surface::Hook
            }
            Self::Install(_) | Self::Uninstall | Self::Check | Self::Version => Surface::Terminal,
        }
    }
}

/// Options for the `install` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct InstallOpts {
    /// Skip specific tasks
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Run only specific tasks
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,
}

/// Options for the `init` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct InitOpts {
    /// Shell to emit code for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Options for the `prompt` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct PromptOpts {
    /// Terminal width; detected when omitted
    #[arg(long)]
    pub columns: Option<u16>,
}

/// Options for the `completions` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CompletionsOpts {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_install_with_profile_short() {
        let cli = Cli::parse_from(["zdot", "-p", "server", "install"]);
        assert_eq!(cli.global.profile, "server");
        assert!(matches!(cli.command, Command::Install(_)));
    }

    #[test]
    fn parse_install_dry_run_short() {
        let cli = Cli::parse_from(["zdot", "-d", "install"]);
        assert!(cli.global.dry_run);
    }

    #[test]
    fn parse_install_skip_and_only() {
        let cli = Cli::parse_from(["zdot", "install", "--skip", "dock,perm", "--only", "sym"]);
        let Command::Install(opts) = cli.command else {
            panic!("expected install");
        };
        assert_eq!(opts.skip, ["dock", "perm"]);
        assert_eq!(opts.only, ["sym"]);
    }

    #[test]
    fn parse_init_shell() {
        let cli = Cli::parse_from(["zdot", "init", "zsh"]);
        assert!(matches!(
            cli.command,
            Command::Init(InitOpts { shell: Shell::Zsh })
        ));
        assert_eq!(cli.command.surface(), Surface::Hook);
    }

    #[test]
    fn init_requires_known_shell() {
        assert!(Cli::try_parse_from(["zdot", "init", "fish"]).is_err());
    }

    #[test]
    fn parse_prompt_columns() {
        let cli = Cli::parse_from(["zdot", "prompt", "--columns", "72"]);
        assert!(matches!(
            cli.command,
            Command::Prompt(PromptOpts { columns: Some(72) })
        ));
    }

    #[test]
    fn parse_completions() {
        let cli = Cli::parse_from(["zdot", "completions", "bash"]);
        assert!(matches!(cli.command, Command::Completions(_)));
        assert_eq!(cli.command.name(), "completions");
    }

    #[test]
    fn parse_hooks() {
        assert!(matches!(
            Cli::parse_from(["zdot", "login"]).command,
            Command::Login
        ));
        let logout = Cli::parse_from(["zdot", "logout"]).command;
        assert!(matches!(logout, Command::Logout));
        assert_eq!(logout.surface(), Surface::Hook);
    }

    #[test]
    fn parse_verbose_after_subcommand() {
        let cli = Cli::parse_from(["zdot", "check", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.command.surface(), Surface::Terminal);
    }

    #[test]
    fn parse_root_override() {
        let cli = Cli::parse_from(["zdot", "--root", "/tmp/dotfiles", "uninstall"]);
        assert_eq!(cli.global.root, Some(std::path::PathBuf::from("/tmp/dotfiles")));
    }
}
