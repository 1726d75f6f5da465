//! First-match resolution over candidate paths.
use std::path::PathBuf;

use crate::error::ExpandError;

/// Return the first candidate that expands to an existing regular file.
///
/// Candidates are expanded one at a time, in order, and the search stops at
/// the first hit, so later candidates are never expanded. A candidate that
/// fails to expand counts as absent.
pub fn first_existing<I, S, F>(candidates: I, mut expand: F) -> Option<PathBuf>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: FnMut(&str) -> Result<PathBuf, ExpandError>,
{
    for candidate in candidates {
        let candidate = candidate.as_ref();
        match expand(candidate) {
            Ok(path) if path.is_file() => return Some(path),
            Ok(path) => tracing::debug!("candidate not found: {}", path.display()),
            Err(e) => tracing::debug!("candidate skipped: {candidate}: {e}"),
        }
    }
    None
}
