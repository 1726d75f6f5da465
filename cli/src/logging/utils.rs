//! Log file locations, ANSI stripping, and timestamps.
use std::fs;
use std::path::PathBuf;

use super::types::Surface;

/// Remove CSI escape sequences (colors, cursor movement) from `s`.
pub(super) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\x1b' {
            out.push(c);
            continue;
        }
        if chars.next() == Some('[') {
            chars.by_ref().find(|c| ('@'..='~').contains(c));
        }
    }
    out
}

/// `$XDG_CACHE_HOME/zdot`, or `~/.cache/zdot`, created on demand.
fn cache_dir() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CACHE_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".cache")))?;
    let dir = base.join("zdot");
    fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

/// Log file for `command` on `surface`.
pub(super) fn log_file_path(surface: Surface, command: &str) -> Option<PathBuf> {
    let name = match surface {
        Surface::Terminal => format!("{command}.log"),
        Surface::Hook => "hooks.log".to_string(),
    };
    Some(cache_dir()?.join(name))
}

/// Current UTC time in `format`.
pub(super) fn utc_now(format: &str) -> String {
    chrono::Utc::now().format(format).to_string()
}

/// Current local time the way `date(1)` prints it, e.g.
/// `Fri Oct 16 21:04:05 CEST 2026`.
#[must_use]
pub fn format_local_timestamp() -> String {
    chrono::Local::now()
        .format("%a %b %e %H:%M:%S %Z %Y")
        .to_string()
}
