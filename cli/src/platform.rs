//! Operating system detection.
use std::fmt;

/// Detected operating system platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Any Linux distribution.
    Linux,
    /// macOS.
    MacOs,
}

impl Os {
    /// Category tag activated for this OS in config section names.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::MacOs => "macos",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Platform information for the current system.
#[derive(Debug, Clone)]
pub struct Platform {
    /// Operating system.
    pub os: Os,
}

impl Platform {
    /// Detect the current platform.
    #[must_use]
    pub const fn detect() -> Self {
        Self {
            os: Self::detect_os(),
        }
    }

    /// Create a platform with an explicit OS.
    #[must_use]
    pub const fn new(os: Os) -> Self {
        Self { os }
    }

    /// Whether this is a Linux system.
    #[must_use]
    pub fn is_linux(&self) -> bool {
        self.os == Os::Linux
    }

    /// Whether this is a macOS system.
    #[must_use]
    pub fn is_macos(&self) -> bool {
        self.os == Os::MacOs
    }

    /// Check whether a category tag is incompatible with this platform.
    #[must_use]
    pub fn excludes_category(&self, category: &str) -> bool {
        match category {
            "linux" => self.os != Os::Linux,
            "macos" => self.os != Os::MacOs,
            _ => false,
        }
    }

    const fn detect_os() -> Os {
        if cfg!(target_os = "macos") {
            Os::MacOs
        } else {
            // Other Unix-like systems behave like Linux for our purposes
            Os::Linux
        }
    }
}
