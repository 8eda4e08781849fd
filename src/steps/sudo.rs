use anyhow::{Result, bail};

use super::Step;
use crate::context::Context;
use crate::exec::Executor as _;
use crate::probe;

/// Validate sudo credentials once per run.
///
/// Later steps (apt installs, chsh) assume a warm sudo timestamp; the
/// password prompt blocks the run until answered, which is the documented
/// interactive behavior. Credentials are not refreshed in the background —
/// the engine is single-threaded by contract.
#[derive(Debug)]
pub struct AcquireSudo;

impl Step for AcquireSudo {
    fn name(&self) -> &str {
        "Acquire sudo"
    }

    fn is_satisfied(&self, ctx: &Context) -> bool {
        // Satisfied when sudo exists and its credential cache is still warm
        // (`-n` never prompts, so this probe cannot block).
        probe::is_installed(&*ctx.executor, "sudo")
            && ctx
                .executor
                .run("sudo", &["-n", "-v"])
                .map(|r| r.success)
                .unwrap_or(false)
    }

    fn run(&self, ctx: &Context) -> Result<()> {
        if !probe::is_installed(&*ctx.executor, "sudo") {
            if ctx.platform.is_debian_like() {
                bail!("sudo is not installed; run `apt-get install sudo` as root first");
            }
            bail!("sudo is not installed");
        }
        ctx.runner()
            .run("sudo credentials", "sudo", &["-v"])?;
        Ok(())
    }
}
