use anyhow::{Context as _, Result};

use super::Step;
use crate::context::Context;
use crate::probe;
use crate::resources::installer::InstallerScript;

/// starship's official installer script.
const PROMPT_INSTALLER: InstallerScript = InstallerScript {
    name: "starship",
    url: "https://starship.rs/install.sh",
};

/// Install the prompt engine into the user's bin directory.
#[derive(Debug)]
pub struct PromptEngine;

impl Step for PromptEngine {
    fn name(&self) -> &str {
        "Prompt engine"
    }

    fn is_satisfied(&self, ctx: &Context) -> bool {
        // The bin dir may not be on PATH until the next login, so check the
        // installed binary on disk as well.
        probe::is_installed(&*ctx.executor, "starship")
            || ctx.run.bin_dir.join("starship").is_file()
    }

    fn run(&self, ctx: &Context) -> Result<()> {
        let bin_dir = ctx.run.bin_dir.to_string_lossy().to_string();
        std::fs::create_dir_all(&ctx.run.bin_dir)
            .with_context(|| format!("create bin dir: {}", ctx.run.bin_dir.display()))?;
        PROMPT_INSTALLER
            .fetch_and_run(
                &ctx.run.cache_dir,
                &ctx.runner(),
                &["-y", "-b", bin_dir.as_str()],
                &[],
            )
            .context("install starship")?;
        Ok(())
    }
}
