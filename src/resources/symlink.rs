//! Symlink resource — the engine's Linker.
//!
//! Policy: a regular file or real directory occupying the target is
//! preserved by renaming it to `<target>.bak` (an existing `.bak` is
//! replaced so the operation stays deterministic); a symlink pointing
//! elsewhere is simply removed and recreated. Repeated calls with the same
//! arguments are no-ops and create no new backups.

use std::path::{Path, PathBuf};

use anyhow::Result;

use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::error::LinkError;
use crate::probe;

/// What [`link`] did to satisfy the postcondition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// Target was already a symlink resolving to the source.
    AlreadyCorrect,
    /// Target did not exist; the link was created.
    Created,
    /// A stale symlink at the target was replaced.
    ReplacedLink,
    /// A regular file or directory was moved to the returned backup path
    /// before the link was created.
    BackedUp(PathBuf),
}

/// Create (or repair) a symlink at `target` resolving to `source`.
///
/// Parent directories of `target` are created as needed. Safe to call
/// repeatedly with identical arguments; only disjoint targets may be
/// linked concurrently (the engine never does otherwise — execution is
/// strictly sequential).
///
/// # Errors
///
/// [`LinkError::SourceMissing`] if `source` does not exist;
/// [`LinkError::Backup`] / [`LinkError::Io`] on filesystem failures.
pub fn link(source: &Path, target: &Path) -> Result<LinkOutcome, LinkError> {
    if !source.exists() {
        return Err(LinkError::SourceMissing {
            path: source.to_path_buf(),
        });
    }

    // Relative sources are resolved so the created link survives a caller
    // running from a different working directory.
    let source = if source.is_absolute() {
        source.to_path_buf()
    } else {
        source.canonicalize().map_err(|e| LinkError::Io {
            op: "resolve",
            path: source.to_path_buf(),
            source: e,
        })?
    };

    let existing = target.symlink_metadata();

    if let Ok(meta) = existing {
        if meta.is_symlink() {
            if probe::link_points_to(target, &source) {
                return Ok(LinkOutcome::AlreadyCorrect);
            }
            std::fs::remove_file(target).map_err(|e| LinkError::Io {
                op: "remove stale link",
                path: target.to_path_buf(),
                source: e,
            })?;
            create_symlink(&source, target)?;
            return Ok(LinkOutcome::ReplacedLink);
        }

        let backup = backup_path(target);
        move_to_backup(target, &backup)?;
        create_symlink(&source, target)?;
        return Ok(LinkOutcome::BackedUp(backup));
    }

    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent).map_err(|e| LinkError::Io {
            op: "create parent",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    create_symlink(&source, target)?;
    Ok(LinkOutcome::Created)
}

/// `<target>.bak`, alongside the target.
fn backup_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map_or_else(|| "backup".to_string(), |n| n.to_string_lossy().to_string());
    target.with_file_name(format!("{name}.bak"))
}

/// Move the current occupant of `target` to `backup`, replacing any backup
/// left behind by an earlier run.
fn move_to_backup(target: &Path, backup: &Path) -> Result<(), LinkError> {
    if let Ok(meta) = backup.symlink_metadata() {
        let removed = if meta.is_dir() {
            std::fs::remove_dir_all(backup)
        } else {
            std::fs::remove_file(backup)
        };
        removed.map_err(|e| LinkError::Backup {
            target: target.to_path_buf(),
            backup: backup.to_path_buf(),
            source: e,
        })?;
    }
    std::fs::rename(target, backup).map_err(|e| LinkError::Backup {
        target: target.to_path_buf(),
        backup: backup.to_path_buf(),
        source: e,
    })
}

#[cfg(unix)]
fn create_symlink(source: &Path, target: &Path) -> Result<(), LinkError> {
    std::os::unix::fs::symlink(source, target).map_err(|e| LinkError::Io {
        op: "create link",
        path: target.to_path_buf(),
        source: e,
    })
}

#[cfg(not(unix))]
fn create_symlink(_source: &Path, target: &Path) -> Result<(), LinkError> {
    Err(LinkError::Io {
        op: "create link",
        path: target.to_path_buf(),
        source: std::io::Error::other("symlinks are only supported on Unix targets"),
    })
}

/// A symlink as a checkable resource.
#[derive(Debug, Clone)]
pub struct SymlinkResource {
    /// The source file/directory (what the symlink points to).
    pub source: PathBuf,
    /// The target path (where the symlink will be created).
    pub target: PathBuf,
}

impl SymlinkResource {
    /// Create a new symlink resource.
    #[must_use]
    pub const fn new(source: PathBuf, target: PathBuf) -> Self {
        Self { source, target }
    }
}

impl Applicable for SymlinkResource {
    fn description(&self) -> String {
        format!("{} -> {}", self.target.display(), self.source.display())
    }

    fn apply(&self) -> Result<ResourceChange> {
        match link(&self.source, &self.target)? {
            LinkOutcome::AlreadyCorrect => Ok(ResourceChange::AlreadyCorrect),
            LinkOutcome::Created | LinkOutcome::ReplacedLink | LinkOutcome::BackedUp(_) => {
                Ok(ResourceChange::Applied)
            }
        }
    }
}

impl Resource for SymlinkResource {
    fn current_state(&self) -> Result<ResourceState> {
        if !self.source.exists() {
            return Ok(ResourceState::Invalid {
                reason: format!("source does not exist: {}", self.source.display()),
            });
        }

        if probe::link_points_to(&self.target, &self.source) {
            return Ok(ResourceState::Correct);
        }

        match self.target.symlink_metadata() {
            Ok(meta) if meta.is_symlink() => Ok(ResourceState::Incorrect {
                current: std::fs::read_link(&self.target).map_or_else(
                    |_| "unreadable symlink".to_string(),
                    |p| format!("points to {}", p.display()),
                ),
            }),
            Ok(meta) if meta.is_dir() => Ok(ResourceState::Incorrect {
                current: "target is a real directory".to_string(),
            }),
            Ok(_) => Ok(ResourceState::Incorrect {
                current: "target is a regular file".to_string(),
            }),
            Err(_) => Ok(ResourceState::Missing),
        }
    }
}
