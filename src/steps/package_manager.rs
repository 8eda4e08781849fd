use anyhow::{Context as _, Result, bail};

use super::Step;
use crate::context::Context;
use crate::platform::Os;
use crate::probe;
use crate::resources::installer::InstallerScript;

/// Homebrew's official installer script.
const HOMEBREW_INSTALLER: InstallerScript = InstallerScript {
    name: "homebrew",
    url: "https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh",
};

/// Ensure the platform package manager is present and its index is fresh.
///
/// The guard is deliberately never satisfied: "updated" cannot be detected
/// without performing the update, so re-runs refresh the index (a cheap
/// no-op on an already-fresh system). Every later install step depends on
/// this one having run.
#[derive(Debug)]
pub struct PackageManager;

impl Step for PackageManager {
    fn name(&self) -> &str {
        "Package manager"
    }

    fn applies(&self, ctx: &Context) -> bool {
        ctx.platform.has_package_manager()
    }

    fn is_satisfied(&self, _ctx: &Context) -> bool {
        false
    }

    fn run(&self, ctx: &Context) -> Result<()> {
        let runner = ctx.runner();
        match ctx.platform.os {
            Os::MacOs => {
                if !probe::is_installed(&*ctx.executor, "brew") {
                    let script = HOMEBREW_INSTALLER
                        .fetch(&ctx.run.cache_dir)
                        .context("fetch homebrew installer")?;
                    let path = script.to_string_lossy();
                    // The installer insists on bash and prompts unless told
                    // otherwise.
                    runner.run_with_env(
                        "homebrew installer",
                        "/bin/bash",
                        &[&path],
                        &[("NONINTERACTIVE", "1")],
                    )?;
                }
                runner.run("brew update", "brew", &["update"])?;
                Ok(())
            }
            Os::DebianLike => {
                runner.run("apt-get update", "sudo", &["apt-get", "update"])?;
                Ok(())
            }
            Os::OtherLinux => bail!("no supported package manager for this platform"),
        }
    }
}
