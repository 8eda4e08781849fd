//! The per-run context shared by every component.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Settings;
use crate::exec::{CommandRunner, Executor};
use crate::logging::Log;
use crate::platform::Platform;

/// GitHub organization the companion repositories are cloned from unless
/// overridden in the settings file.
pub const DEFAULT_GITHUB_ORG: &str = "workstation";

/// Immutable identifiers and resolved paths for one provisioning run.
///
/// Built exactly once at the command boundary — the only place ambient
/// process environment is consulted — and read-only everywhere else.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Timestamp-derived identifier for this run.
    pub run_id: String,
    /// Per-run log file path.
    pub log_path: PathBuf,
    /// User home directory.
    pub home: PathBuf,
    /// Directory holding the companion repositories.
    pub workspace: PathBuf,
    /// Destination for user-level executables.
    pub bin_dir: PathBuf,
    /// XDG-style configuration root.
    pub config_dir: PathBuf,
    /// Cache directory for downloaded installer scripts.
    pub cache_dir: PathBuf,
    /// Login shell registered for the user at startup, if determinable.
    pub login_shell: Option<String>,
    /// Organization the companion repositories are cloned from.
    pub github_org: String,
}

impl RunContext {
    /// Resolve a run context from boundary inputs.
    ///
    /// `cache_root` and `config_dir` are the XDG-style roots (e.g.
    /// `~/.cache`, `~/.config`); the workspace precedence is CLI override,
    /// then settings file, then `<home>/workspace`.
    #[must_use]
    pub fn resolve(
        home: PathBuf,
        config_dir: PathBuf,
        cache_root: &std::path::Path,
        login_shell: Option<String>,
        settings: &Settings,
        workspace_override: Option<PathBuf>,
        now: chrono::DateTime<chrono::Local>,
    ) -> Self {
        let run_id = format!("bootstrap-{}", now.format("%Y%m%d-%H%M%S"));
        let cache_dir = cache_root.join("bootstrap");
        let log_path = cache_dir.join("logs").join(format!("{run_id}.log"));
        let workspace = workspace_override
            .or_else(|| settings.workspace.clone())
            .unwrap_or_else(|| home.join("workspace"));

        Self {
            run_id,
            log_path,
            bin_dir: home.join(".local").join("bin"),
            config_dir,
            cache_dir,
            home,
            workspace,
            login_shell,
            github_org: settings
                .github_org
                .clone()
                .unwrap_or_else(|| DEFAULT_GITHUB_ORG.to_string()),
        }
    }
}

/// Shared context for step execution.
pub struct Context {
    /// Resolved paths and identifiers for this run.
    pub run: RunContext,
    /// Detected platform information.
    pub platform: Arc<Platform>,
    /// Logger for output and step recording.
    pub log: Arc<dyn Log>,
    /// Command executor (for testing or real system calls).
    pub executor: Arc<dyn Executor>,
    /// Whether to preview changes without applying.
    pub dry_run: bool,
}

impl Context {
    /// A [`CommandRunner`] wired to this context's executor and log.
    #[must_use]
    pub fn runner(&self) -> CommandRunner {
        CommandRunner::new(Arc::clone(&self.executor), Arc::clone(&self.log))
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("run", &self.run)
            .field("platform", &self.platform)
            .field("log", &"<dyn Log>")
            .field("executor", &"<dyn Executor>")
            .field("dry_run", &self.dry_run)
            .finish()
    }
}
