use anyhow::Result;

use super::build_session;
use crate::cli::GlobalOpts;
use crate::logging::Log as _;
use crate::steps;
use crate::steps::Step as _;

/// Run the doctor command: evaluate every step's guard and report what a
/// provisioning run would do, without changing anything.
///
/// Informational only — always exits zero.
///
/// # Errors
///
/// Returns an error only if the session cannot be built.
pub fn run(global: &GlobalOpts) -> Result<()> {
    let session = build_session(global)?;
    let ctx = &session.ctx;
    let log = &session.log;

    log.info(&format!("platform: {}", ctx.platform.os));
    log.info(&format!("workspace: {}", ctx.run.workspace.display()));

    let mut pending = 0u32;
    for step in steps::catalog(&session.settings) {
        if !step.applies(ctx) {
            log.info(&format!("· {} (not applicable)", step.name()));
        } else if step.is_satisfied(ctx) {
            log.info(&format!("\x1b[32m✓\x1b[0m {}", step.name()));
        } else {
            pending += 1;
            log.info(&format!("\x1b[33m✗\x1b[0m {} (would run)", step.name()));
        }
    }

    if pending == 0 {
        log.info("everything is in place");
    } else {
        log.info(&format!("{pending} step(s) would run; use `bootstrap provision`"));
    }
    Ok(())
}
