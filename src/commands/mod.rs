//! Top-level subcommand orchestration.
pub mod doctor;
pub mod provision;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;
use crate::config::Settings;
use crate::context::{Context, RunContext};
use crate::exec::SystemExecutor;
use crate::logging::{Log, Logger};
use crate::platform::Platform;

/// Everything a command needs, assembled once at the process boundary.
pub struct Session {
    pub ctx: Context,
    pub log: Arc<Logger>,
    pub settings: Settings,
}

/// Build the run session. This is the only place ambient process
/// environment (home, XDG roots, `SHELL`) is consulted; every component
/// below reads the resolved [`RunContext`] instead.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined or the
/// settings file is malformed.
pub fn build_session(global: &GlobalOpts) -> Result<Session> {
    let home = dirs::home_dir().context("cannot determine home directory")?;
    let config_dir = std::env::var_os("XDG_CONFIG_HOME")
        .map_or_else(|| home.join(".config"), PathBuf::from);
    let cache_root = std::env::var_os("XDG_CACHE_HOME")
        .map_or_else(|| home.join(".cache"), PathBuf::from);
    let login_shell = std::env::var("SHELL").ok();

    let settings = Settings::load(&config_dir)?;
    let run = RunContext::resolve(
        home,
        config_dir,
        &cache_root,
        login_shell,
        &settings,
        global.workspace.clone(),
        chrono::Local::now(),
    );

    let log = Arc::new(Logger::new(Some(run.log_path.clone()), global.verbose));
    let ctx = Context {
        run,
        platform: Arc::new(Platform::detect()),
        log: Arc::clone(&log) as Arc<dyn Log>,
        executor: Arc::new(SystemExecutor),
        dry_run: global.dry_run,
    };

    Ok(Session { ctx, log, settings })
}
