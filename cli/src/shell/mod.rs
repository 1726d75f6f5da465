//! Shell code generation for `eval "$(zdot init zsh)"`.
pub mod emit;
pub mod expand;
pub mod functions;
pub mod init;
pub mod resolver;

use std::fmt;

/// Target shell for emitted code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Shell {
    /// Z shell.
    Zsh,
    /// GNU Bash.
    Bash,
}

impl Shell {
    /// Lowercase shell name, as used in `plugins.toml` `shells` lists.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Zsh => "zsh",
            Self::Bash => "bash",
        }
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
