use anyhow::Result;

use super::build_session;
use crate::cli::{GlobalOpts, ProvisionOpts};
use crate::logging::Log as _;
use crate::steps;
use crate::steps::sequencer::{self, RunOutcome};

/// Run the provision command.
///
/// Exits zero only if every fatal step reached `Ok` or was skipped; an
/// aborted run returns an error naming the log file for diagnosis.
///
/// # Errors
///
/// Returns an error if the session cannot be built or the run aborts.
pub fn run(global: &GlobalOpts, opts: &ProvisionOpts) -> Result<()> {
    let session = build_session(global)?;
    let ctx = &session.ctx;
    let log = &session.log;

    let version = option_env!("BOOTSTRAP_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    log.info(&format!("bootstrap {version} ({})", ctx.run.run_id));
    log.info(&format!("platform: {}", ctx.platform.os));
    if ctx.dry_run {
        log.info("dry run: no changes will be applied");
    }

    let catalog = steps::catalog(&session.settings);
    let selected = steps::filter(&catalog, &opts.skip, &opts.only);

    let outcome = sequencer::run_catalog(&selected, ctx);
    log.print_summary();

    match outcome {
        RunOutcome::Completed => {
            if !ctx.dry_run {
                // The one contract with the operator on success: the two
                // follow-ups needed to pick up the new environment.
                log.info("done. next steps:");
                log.info("  1. reload your session: exec zsh");
                log.info("  2. authenticate the GitHub CLI: gh auth login");
            }
            Ok(())
        }
        RunOutcome::Aborted { step } => {
            anyhow::bail!(
                "provisioning aborted at step '{step}'; see log: {}",
                ctx.run.log_path.display()
            )
        }
    }
}
