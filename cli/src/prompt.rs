//! Prompt layout tiers keyed on terminal width.
use anyhow::{Context as _, Result};
use std::fmt;
use std::path::Path;

/// How much the prompt theme should show at a given terminal width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// 100 columns or more.
    Full,
    /// 85 to 99 columns.
    Standard,
    /// 70 to 84 columns.
    Compact,
    /// 60 to 69 columns.
    Minimal,
    /// 59 columns or fewer.
    Bare,
}

impl Layout {
    /// Tiers from widest to narrowest with their minimum width.
    pub const TIERS: [(u16, Self); 5] = [
        (100, Self::Full),
        (85, Self::Standard),
        (70, Self::Compact),
        (60, Self::Minimal),
        (0, Self::Bare),
    ];

    /// Layout for a terminal `columns` wide.
    #[must_use]
    pub fn for_columns(columns: u16) -> Self {
        Self::TIERS
            .iter()
            .find(|(min, _)| columns >= *min)
            .map_or(Self::Bare, |&(_, layout)| layout)
    }

    /// Name exported as `ZDOT_PROMPT_LAYOUT`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Standard => "standard",
            Self::Compact => "compact",
            Self::Minimal => "minimal",
            Self::Bare => "bare",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Width of the controlling terminal, falling back to `$COLUMNS`.
#[must_use]
pub fn detect_columns() -> Option<u16> {
    terminal_size::terminal_size()
        .map(|(terminal_size::Width(w), _)| w)
        .or_else(|| {
            std::env::var("COLUMNS")
                .ok()
                .and_then(|v| v.trim().parse().ok())
        })
        .filter(|&w| w > 0)
}

/// Read and parse an oh-my-posh theme file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid JSON.
pub fn read_theme(path: &Path) -> Result<serde_json::Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading theme {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing theme {}", path.display()))
}
