//! File permission resource (Unix only).
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::config::chmod::ChmodEntry;
#[cfg(unix)]
use crate::error::ResourceError;

/// A file permission resource that can be checked and applied.
#[derive(Debug, Clone)]
pub struct ChmodResource {
    /// Target path (absolute).
    pub target: PathBuf,
    /// Permission bits.
    pub mode: u32,
}

impl ChmodResource {
    /// Create a new chmod resource.
    #[must_use]
    pub const fn new(target: PathBuf, mode: u32) -> Self {
        Self { target, mode }
    }

    /// Create from a config entry. `ssh/config` targets `$HOME/.ssh/config`,
    /// matching where the symlink for that source lands.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry's mode is not valid octal.
    pub fn from_entry(entry: &ChmodEntry, home: &Path) -> Result<Self> {
        Ok(Self::new(
            home.join(format!(".{}", entry.path)),
            entry.parse_mode()?,
        ))
    }
}

impl Applicable for ChmodResource {
    fn description(&self) -> String {
        format!("{:o} {}", self.mode, self.target.display())
    }

    fn apply(&self) -> Result<ResourceChange> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            std::fs::set_permissions(&self.target, std::fs::Permissions::from_mode(self.mode))
                .map_err(|e| ResourceError::Permission {
                    path: format!("{}: {e}", self.target.display()),
                })?;
            Ok(ResourceChange::Applied)
        }

        #[cfg(not(unix))]
        {
            Ok(ResourceChange::Skipped {
                reason: "chmod not supported on this platform".to_string(),
            })
        }
    }
}

impl Resource for ChmodResource {
    fn current_state(&self) -> Result<ResourceState> {
        if !self.target.exists() {
            return Ok(ResourceState::Invalid {
                reason: format!("target does not exist: {}", self.target.display()),
            });
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let current_mode = std::fs::metadata(&self.target)
                .with_context(|| format!("reading metadata: {}", self.target.display()))?
                .permissions()
                .mode()
                & 0o7777;

            if current_mode == self.mode {
                Ok(ResourceState::Correct)
            } else {
                Ok(ResourceState::Incorrect {
                    current: format!("{current_mode:o}"),
                })
            }
        }

        #[cfg(not(unix))]
        {
            Ok(ResourceState::Invalid {
                reason: "chmod not supported on this platform".to_string(),
            })
        }
    }
}
