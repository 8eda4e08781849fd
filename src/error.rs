//! Domain-specific error types for the bootstrap engine.
//!
//! Structured errors via [`thiserror`]. Resource primitives return typed
//! errors ([`LinkError`], [`ExecError`], [`FetchError`]); step bodies and
//! command handlers at the CLI boundary convert them to [`anyhow::Error`]
//! via the standard `?` operator.
//!
//! Probe failures have no error type: an inability to determine host state
//! is reported as `false` by the probes, which only ever causes a redundant
//! safe re-install, never a skipped step.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the symlink Linker.
#[derive(Error, Debug)]
pub enum LinkError {
    /// The link source does not exist. Fatal to the calling step: a link to
    /// nowhere would silently break the provisioned environment.
    #[error("symlink source does not exist: {}", path.display())]
    SourceMissing {
        /// The missing source path.
        path: PathBuf,
    },

    /// The existing occupant of the target path could not be moved aside.
    #[error("backup {} to {}: {source}", target.display(), backup.display())]
    Backup {
        /// Path that was occupied.
        target: PathBuf,
        /// Backup destination that could not be written.
        backup: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A filesystem operation on the link target failed.
    #[error("{op} {}: {source}", path.display())]
    Io {
        /// Short verb describing the failed operation.
        op: &'static str,
        /// Path the operation was applied to.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors from the CommandRunner.
#[derive(Error, Debug)]
pub enum ExecError {
    /// The external program could not be started at all.
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        /// Program that could not be spawned.
        program: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The external program ran but exited non-zero.
    #[error("{label} failed (exit {code}): {detail}")]
    NonZero {
        /// Label the command was run under.
        label: String,
        /// Process exit code (`-1` when terminated by signal).
        code: i32,
        /// Short summary taken from the tail of stderr.
        detail: String,
    },
}

/// Errors from the RepoFetcher. Always fatal to the calling step: a
/// provisioning run cannot proceed without its companion repositories.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The stale local directory could not be removed before the clone.
    #[error("remove stale checkout {}: {source}", path.display())]
    Clean {
        /// Local path that could not be cleared.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The clone itself failed.
    #[error("clone {name}: {source}")]
    Clone {
        /// Repository name.
        name: String,
        /// Failure reported by the CommandRunner.
        source: ExecError,
    },
}
