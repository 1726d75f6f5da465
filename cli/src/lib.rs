//! Workstation dotfiles engine.
//!
//! Drives a dotfiles repository made of TOML configuration in `conf/` and
//! linkable files in `symlinks/`. Everything is filtered by profile and
//! platform categories.
//!
//! The public API is organised into these layers:
//!
//! - **[`config`]**: parse and validate the TOML config files
//! - **[`shell`]**: emit the zsh init script (env, plugins, helpers, prompt)
//! - **[`resources`]**: idempotent `check + apply` primitives (symlinks, modes, dock)
//! - **[`tasks`]**: named units of work wired to resources
//! - **[`session`]**: login and logout hooks
//! - **[`commands`]**: top-level subcommand orchestration
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod platform;
pub mod prompt;
pub mod resources;
pub mod session;
pub mod shell;
pub mod tasks;

/// Version string reported by `zdot version` and the log header.
#[must_use]
pub fn version() -> &'static str {
    option_env!("ZDOT_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}
