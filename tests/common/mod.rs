// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed home and workspace so each
// integration test runs against an isolated filesystem without repeating
// setup boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bootstrap_cli::context::{Context, RunContext};
use bootstrap_cli::exec::SystemExecutor;
use bootstrap_cli::logging::{Log, Logger};
use bootstrap_cli::platform::{Os, Platform};

/// An isolated test environment backed by a temporary home directory.
///
/// The directory (home, workspace, cache) is deleted when dropped.
pub struct TestEnv {
    /// Temporary directory used as the home directory.
    pub home: tempfile::TempDir,
}

impl TestEnv {
    /// Create a new environment with a seeded workspace: every link source
    /// the catalog expects exists under `workspace/`.
    pub fn new() -> Self {
        let home = tempfile::tempdir().expect("create temp home dir");
        let workspace = home.path().join("workspace");
        let conf = workspace.join("conf");
        std::fs::create_dir_all(&conf).expect("create conf dir");
        std::fs::create_dir_all(workspace.join("bin")).expect("create bin dir");
        for file in ["zshrc", "gitconfig", "starship.toml"] {
            std::fs::write(conf.join(file), "").expect("write conf file");
        }
        Self { home }
    }

    /// Path to the home directory.
    pub fn home_path(&self) -> &Path {
        self.home.path()
    }

    /// A run context rooted entirely inside the temp home.
    pub fn run_context(&self) -> RunContext {
        let home: PathBuf = self.home.path().to_path_buf();
        RunContext {
            run_id: "bootstrap-test".to_string(),
            log_path: home.join(".cache/bootstrap/logs/bootstrap-test.log"),
            workspace: home.join("workspace"),
            bin_dir: home.join(".local/bin"),
            config_dir: home.join(".config"),
            cache_dir: home.join(".cache/bootstrap"),
            login_shell: Some("/bin/bash".to_string()),
            github_org: "acme".to_string(),
            home,
        }
    }

    /// Build a step context over this environment with the real executor
    /// and a file-backed logger, returning the logger for assertions.
    pub fn context(&self, os: Os, dry_run: bool) -> (Context, Arc<Logger>) {
        let run = self.run_context();
        let log = Arc::new(Logger::new(Some(run.log_path.clone()), false));
        let ctx = Context {
            run,
            platform: Arc::new(Platform::new(os)),
            log: Arc::clone(&log) as Arc<dyn Log>,
            executor: Arc::new(SystemExecutor),
            dry_run,
        };
        (ctx, log)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
