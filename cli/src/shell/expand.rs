//! Lazy expansion of candidate paths.
//!
//! Supports a leading `~`, `$NAME`, `${NAME}` and `$(program args…)`. Command
//! substitutions run through an [`Executor`] and are replaced by their
//! trimmed stdout. Arguments are split on whitespace; no quoting or globbing.
use std::path::{Path, PathBuf};

use crate::error::ExpandError;
use crate::exec::Executor;

/// Expands candidate strings against an environment and an executor.
pub struct Expander<'a> {
    home: Option<&'a Path>,
    lookup: &'a dyn Fn(&str) -> Option<String>,
    executor: &'a dyn Executor,
}

impl std::fmt::Debug for Expander<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Expander")
            .field("home", &self.home)
            .field("executor", &self.executor)
            .finish_non_exhaustive()
    }
}

impl<'a> Expander<'a> {
    /// Build an expander.
    #[must_use]
    pub fn new(
        home: Option<&'a Path>,
        lookup: &'a dyn Fn(&str) -> Option<String>,
        executor: &'a dyn Executor,
    ) -> Self {
        Self {
            home,
            lookup,
            executor,
        }
    }

    /// Expand `candidate` into a path.
    ///
    /// # Errors
    ///
    /// Returns an [`ExpandError`] when a variable is unset or empty, a
    /// substitution is unterminated, or a command fails or prints nothing.
    pub fn expand(&self, candidate: &str) -> Result<PathBuf, ExpandError> {
        let mut out = String::with_capacity(candidate.len());
        let rest = match candidate.strip_prefix('~') {
            Some(tail) if tail.is_empty() || tail.starts_with('/') => {
                let home = self.home.ok_or(ExpandError::NoHome)?;
                out.push_str(&home.to_string_lossy());
                tail
            }
            _ => candidate,
        };

        let mut chars = rest.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            if c != '$' {
                out.push(c);
                continue;
            }
            match chars.peek().map(|&(_, next)| next) {
                Some('(') => {
                    let start = i + 2;
                    let end = matching_paren(rest, start).ok_or(ExpandError::Unterminated("$("))?;
                    let command = rest.get(start..end).unwrap_or_default();
                    out.push_str(&self.substitute(command)?);
                    while chars.peek().is_some_and(|&(j, _)| j <= end) {
                        chars.next();
                    }
                }
                Some('{') => {
                    let start = i + 2;
                    let len = rest
                        .get(start..)
                        .and_then(|s| s.find('}'))
                        .ok_or(ExpandError::Unterminated("${"))?;
                    let name = rest.get(start..start + len).unwrap_or_default();
                    out.push_str(&self.variable(name)?);
                    while chars.peek().is_some_and(|&(j, _)| j <= start + len) {
                        chars.next();
                    }
                }
                Some(next) if next.is_ascii_alphabetic() || next == '_' => {
                    let mut name = String::new();
                    while let Some(&(_, ch)) = chars.peek() {
                        if ch.is_ascii_alphanumeric() || ch == '_' {
                            name.push(ch);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    out.push_str(&self.variable(&name)?);
                }
                _ => out.push('$'),
            }
        }

        Ok(PathBuf::from(out))
    }

    fn variable(&self, name: &str) -> Result<String, ExpandError> {
        (self.lookup)(name)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ExpandError::UnsetVariable(name.to_string()))
    }

    fn substitute(&self, command: &str) -> Result<String, ExpandError> {
        let mut words = command.split_whitespace();
        let program = words.next().ok_or(ExpandError::EmptyCommand)?;
        let args: Vec<&str> = words.collect();
        tracing::debug!("running {command} for candidate expansion");
        let result = self
            .executor
            .run(program, &args)
            .map_err(|e| ExpandError::CommandFailed {
                command: command.trim().to_string(),
                reason: format!("{e:#}"),
            })?;
        let value = result.stdout.trim();
        if value.is_empty() {
            return Err(ExpandError::CommandFailed {
                command: command.trim().to_string(),
                reason: "no output".to_string(),
            });
        }
        Ok(value.to_string())
    }
}

/// Byte index of the `)` closing a `$(` whose body starts at `start`.
fn matching_paren(s: &str, start: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (offset, c) in s.get(start..)?.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + offset);
                }
            }
            _ => {}
        }
    }
    None
}
