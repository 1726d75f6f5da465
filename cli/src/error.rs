//! Domain-specific error types for the zdot engine.
//!
//! Internal modules return typed errors (e.g. [`ConfigError`],
//! [`ExpandError`]) while command handlers at the CLI boundary convert them
//! to [`anyhow::Error`] via the standard `?` operator.
//!
//! - [`ConfigError`]: profile resolution, malformed entries
//! - [`ExpandError`]: candidate path expansion
//! - [`ResourceError`]: symlinks, permissions, dock

use thiserror::Error;

/// Errors that arise from configuration loading and profile resolution.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The requested profile is not defined in `profiles.toml`.
    #[error("Invalid profile '{name}': must be one of {known}")]
    InvalidProfile {
        /// Requested profile name.
        name: String,
        /// Comma-separated list of known profiles.
        known: String,
    },

    /// A permission mode is not a valid octal number.
    #[error("Invalid file mode '{0}': expected octal digits such as 600 or 0755")]
    InvalidMode(String),

    /// The dotfiles root could not be located.
    #[error("cannot determine dotfiles root. Use --root or set ZDOT_ROOT env var")]
    RootNotFound,
}

/// Errors raised while expanding a candidate path.
///
/// The plugin resolver treats every variant as "candidate not present".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpandError {
    /// `$NAME` or `${NAME}` referenced a variable that is unset or empty.
    #[error("variable ${0} is not set")]
    UnsetVariable(String),

    /// A `${` or `$(` was never closed.
    #[error("unterminated {0} in candidate")]
    Unterminated(&'static str),

    /// `$( )` contained no program.
    #[error("empty command substitution")]
    EmptyCommand,

    /// The substituted program failed or printed nothing.
    #[error("command substitution `{command}` failed: {reason}")]
    CommandFailed {
        /// Program and arguments as written.
        command: String,
        /// Why the substitution produced no value.
        reason: String,
    },

    /// `~` was used but no home directory is known.
    #[error("home directory is unknown")]
    NoHome,
}

/// Errors that arise from resource operations.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// A symlink operation failed.
    #[error("Symlink error: {0}")]
    Symlink(String),

    /// A file permission change failed.
    #[error("File permission error: {path}")]
    Permission {
        /// Path whose mode could not be changed.
        path: String,
    },

    /// An external tool exited unsuccessfully.
    #[error("{tool} failed: {message}")]
    ToolFailed {
        /// Program name.
        tool: String,
        /// Captured stderr or summary.
        message: String,
    },
}
