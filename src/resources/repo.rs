//! Companion repository checkouts — the engine's RepoFetcher.
//!
//! A fetch is always destroy-then-recreate: any existing directory at the
//! local path is removed before the clone. Local modifications are
//! discarded; the payoff is a known-clean checkout on every fetch.

use std::path::{Path, PathBuf};

use crate::error::FetchError;
use crate::exec::CommandRunner;

/// The fixed set of companion repositories a workstation needs: user
/// executables, dotfiles, this installer, and the shared shell function
/// library.
pub const COMPANION_REPOS: [&str; 4] = ["bin", "conf", "bootstrap", "shlib"];

/// A named repository with its derived remote URL and local checkout path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    /// Repository name (also the checkout directory name).
    pub name: String,
    /// Clone URL.
    pub remote_url: String,
    /// Local checkout path.
    pub local_path: PathBuf,
}

impl RepoRef {
    /// A companion repository under the configured organization, checked
    /// out at `<workspace>/<name>`.
    #[must_use]
    pub fn companion(name: &str, org: &str, workspace: &Path) -> Self {
        Self {
            name: name.to_string(),
            remote_url: format!("https://github.com/{org}/{name}.git"),
            local_path: workspace.join(name),
        }
    }

    /// A repository at an explicit URL and checkout path (e.g. a shell
    /// framework plugin).
    #[must_use]
    pub fn at(name: &str, remote_url: &str, local_path: PathBuf) -> Self {
        Self {
            name: name.to_string(),
            remote_url: remote_url.to_string(),
            local_path,
        }
    }

    /// Whether a checkout already exists at the local path.
    ///
    /// Only a directory containing `.git` counts; anything else is stale
    /// content that the next fetch will destroy.
    #[must_use]
    pub fn checked_out(&self) -> bool {
        self.local_path.join(".git").is_dir()
    }
}

/// Clones repositories through the version-control CLI.
#[derive(Debug)]
pub struct RepoFetcher<'a> {
    runner: &'a CommandRunner,
}

impl<'a> RepoFetcher<'a> {
    #[must_use]
    pub const fn new(runner: &'a CommandRunner) -> Self {
        Self { runner }
    }

    /// Fetch `repo` into its local path, destroying any existing content
    /// there first.
    ///
    /// # Errors
    ///
    /// [`FetchError::Clean`] if the stale directory cannot be removed;
    /// [`FetchError::Clone`] if the clone fails. Both are fatal to the
    /// calling step.
    pub fn fetch(&self, repo: &RepoRef) -> Result<(), FetchError> {
        if let Ok(meta) = repo.local_path.symlink_metadata() {
            // Symlinks and plain files are removed as files; only a real
            // directory needs the recursive removal.
            let removed = if meta.is_dir() {
                std::fs::remove_dir_all(&repo.local_path)
            } else {
                std::fs::remove_file(&repo.local_path)
            };
            removed.map_err(|source| FetchError::Clean {
                path: repo.local_path.clone(),
                source,
            })?;
        }

        if let Some(parent) = repo.local_path.parent()
            && let Err(source) = std::fs::create_dir_all(parent)
        {
            return Err(FetchError::Clean {
                path: parent.to_path_buf(),
                source,
            });
        }

        let path = repo.local_path.to_string_lossy();
        self.runner
            .run(
                &format!("clone {}", repo.name),
                "git",
                &["clone", "--depth", "1", &repo.remote_url, &path],
            )
            .map_err(|source| FetchError::Clone {
                name: repo.name.clone(),
                source,
            })
    }
}
