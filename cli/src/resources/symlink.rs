//! Symlink resource: one file from `symlinks/` linked into `$HOME` (or `/etc`).
use anyhow::{Context as _, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

use super::helpers::fs::{copy_dir_recursive, ensure_parent_dir};
use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::error::ResourceError;

/// Suffix given to a user's own file when a link takes its place.
pub const BACKUP_SUFFIX: &str = ".zdot-backup";

/// A managed link from `target` to `source`.
#[derive(Debug, Clone)]
pub struct SymlinkResource {
    /// File or directory under `symlinks/`.
    pub source: PathBuf,
    /// Where the link lives.
    pub target: PathBuf,
}

/// What currently occupies the target path.
#[derive(Debug, PartialEq, Eq)]
enum Occupant {
    Nothing,
    Link(PathBuf),
    File,
    Directory,
}

impl SymlinkResource {
    /// Link `target` to `source`.
    #[must_use]
    pub const fn new(source: PathBuf, target: PathBuf) -> Self {
        Self { source, target }
    }

    /// Path the user's file is moved to before linking.
    #[must_use]
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.target.as_os_str().to_owned();
        name.push(BACKUP_SUFFIX);
        PathBuf::from(name)
    }

    fn occupant(&self) -> Result<Occupant> {
        let meta = match fs::symlink_metadata(&self.target) {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Occupant::Nothing),
            Err(e) => return Err(e).with_context(|| format!("stat {}", self.target.display())),
        };
        if meta.is_symlink() {
            let dest = fs::read_link(&self.target)
                .with_context(|| format!("read link {}", self.target.display()))?;
            Ok(Occupant::Link(dest))
        } else if meta.is_dir() {
            Ok(Occupant::Directory)
        } else {
            Ok(Occupant::File)
        }
    }

    /// A regular file at the target that is byte-identical to the source is
    /// what uninstall leaves behind, so it needs no backup.
    fn is_uninstalled_copy(&self) -> bool {
        match (fs::read(&self.source), fs::read(&self.target)) {
            (Ok(source), Ok(target)) => source == target,
            _ => false,
        }
    }

    /// Move the user's file aside. An earlier backup is never overwritten.
    fn back_up(&self) -> Result<()> {
        let backup = self.backup_path();
        if backup.symlink_metadata().is_ok() {
            bail!(
                "{} exists and differs from {}; {} is already taken",
                self.target.display(),
                self.source.display(),
                backup.display()
            );
        }
        fs::rename(&self.target, &backup).with_context(|| {
            format!("back up {} to {}", self.target.display(), backup.display())
        })
    }
}

impl Applicable for SymlinkResource {
    fn description(&self) -> String {
        format!("{} -> {}", self.target.display(), self.source.display())
    }

    fn apply(&self) -> Result<ResourceChange> {
        match self.occupant()? {
            Occupant::Nothing => ensure_parent_dir(&self.target)?,
            Occupant::Link(dest) if dest == self.source => return Ok(ResourceChange::AlreadyCorrect),
            Occupant::Link(_) => remove_file(&self.target)?,
            Occupant::File if self.is_uninstalled_copy() => remove_file(&self.target)?,
            Occupant::File => self.back_up()?,
            Occupant::Directory => {
                return Ok(ResourceChange::Skipped {
                    reason: format!("{} is a real directory", self.target.display()),
                });
            }
        }
        create_symlink(&self.source, &self.target)?;
        Ok(ResourceChange::Applied)
    }

    /// Swap the link for a copy of its source so the configuration survives
    /// uninstall. The copy is staged beside the link and renamed over it.
    fn remove(&self) -> Result<ResourceChange> {
        let staged = staging_path(&self.target);
        let copied = if self.source.is_dir() {
            copy_dir_recursive(&self.source, &staged)
        } else {
            fs::copy(&self.source, &staged)
                .map(|_| ())
                .with_context(|| format!("copy {}", self.source.display()))
        };
        let swapped = copied
            .and_then(|()| remove_file(&self.target))
            .and_then(|()| {
                fs::rename(&staged, &self.target)
                    .with_context(|| format!("rename into {}", self.target.display()))
            });
        if swapped.is_err() {
            let _ = fs::remove_dir_all(&staged).or_else(|_| fs::remove_file(&staged));
        }
        swapped.with_context(|| format!("materialize {}", self.target.display()))?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for SymlinkResource {
    fn current_state(&self) -> Result<ResourceState> {
        if !self.source.exists() {
            return Ok(ResourceState::Invalid {
                reason: format!("source does not exist: {}", self.source.display()),
            });
        }
        Ok(match self.occupant()? {
            Occupant::Nothing => ResourceState::Missing,
            Occupant::Link(dest) if dest == self.source => ResourceState::Correct,
            Occupant::Link(dest) => ResourceState::Incorrect {
                current: format!("points to {}", dest.display()),
            },
            Occupant::File => ResourceState::Incorrect {
                current: "a regular file".to_string(),
            },
            Occupant::Directory => ResourceState::Invalid {
                reason: "target is a real directory".to_string(),
            },
        })
    }
}

fn staging_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_owned();
    name.push(".zdot-tmp");
    PathBuf::from(name)
}

fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path).with_context(|| format!("remove {}", path.display()))
}

fn create_symlink(source: &Path, link: &Path) -> Result<(), ResourceError> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(source, link).map_err(|e| {
            ResourceError::Symlink(format!("{} -> {}: {e}", link.display(), source.display()))
        })
    }

    #[cfg(not(unix))]
    {
        Err(ResourceError::Symlink(format!(
            "symlinks are not supported on this platform: {}",
            link.display()
        )))
    }
}
