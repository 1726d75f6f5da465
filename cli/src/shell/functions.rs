//! Interactive helper functions emitted into the init script.
use crate::exec::Executor;
use crate::platform::Platform;

/// Which `ls` implementation the wrapper calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LsFlavor {
    /// `eza` with directories grouped first.
    Eza,
    /// GNU coreutils `ls`.
    Gnu,
    /// BSD `ls` as shipped with macOS.
    Bsd,
}

impl LsFlavor {
    /// Pick the flavor for this machine: `eza` when installed, otherwise
    /// the platform's native `ls`.
    #[must_use]
    pub fn detect(platform: &Platform, executor: &dyn Executor) -> Self {
        if executor.which("eza") {
            Self::Eza
        } else if platform.is_macos() {
            Self::Bsd
        } else {
            Self::Gnu
        }
    }

    /// Command line the wrapper runs, without the forwarded arguments.
    #[must_use]
    pub const fn command(self) -> &'static str {
        match self {
            Self::Eza => "eza --group-directories-first",
            Self::Gnu => "command ls --color=auto",
            Self::Bsd => "command ls -G",
        }
    }

    /// Body of the `ls` shell function.
    #[must_use]
    pub fn wrapper_body(self) -> Vec<String> {
        vec![format!("{} \"$@\"", self.command())]
    }
}
