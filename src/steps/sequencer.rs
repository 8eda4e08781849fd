//! The step sequencer.
//!
//! Strictly sequential: one step runs to completion before the next
//! begins, because later steps depend on environment mutations made by
//! earlier ones. A fatal failure aborts the run immediately; completed
//! steps are left in place — they are idempotent and safe to re-run.

use crate::context::Context;
use crate::logging::Log as _;
use crate::logging::StepStatus;

use super::Step;

/// Final state of a full catalog run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every step reached a terminal state; non-fatal failures may have
    /// been recorded as warnings.
    Completed,
    /// A fatal step failed; no further steps were attempted.
    Aborted {
        /// Name of the failed step.
        step: String,
    },
}

/// Drive `steps` in order against `ctx`.
///
/// For each step: platform applicability, then the guard (a satisfied
/// guard skips the action and writes no start event), then the action.
/// In dry-run mode unsatisfied steps are recorded without running.
pub fn run_catalog(steps: &[&dyn Step], ctx: &Context) -> RunOutcome {
    for step in steps {
        let name = step.name();

        if !step.applies(ctx) {
            ctx.log
                .debug(&format!("skipping step: {name} (not applicable)"));
            ctx.log.record_step(name, StepStatus::NotApplicable, None);
            continue;
        }

        if step.is_satisfied(ctx) {
            ctx.log.debug(&format!("{name}: already satisfied"));
            ctx.log
                .record_step(name, StepStatus::Skipped, Some("already satisfied"));
            continue;
        }

        if ctx.dry_run {
            ctx.log.dry_run(&format!("would run: {name}"));
            ctx.log.record_step(name, StepStatus::DryRun, None);
            continue;
        }

        ctx.log.stage(name);
        match step.run(ctx) {
            Ok(()) => {
                ctx.log.record_step(name, StepStatus::Ok, None);
            }
            Err(e) => {
                ctx.log
                    .record_step(name, StepStatus::Failed, Some(&format!("{e:#}")));
                if step.fatal() {
                    ctx.log.error(&format!("{name}: {e:#}"));
                    return RunOutcome::Aborted {
                        step: name.to_string(),
                    };
                }
                ctx.log.warn(&format!("{name}: {e:#} (continuing)"));
            }
        }
    }
    RunOutcome::Completed
}
