use anyhow::Result;

use super::Step;
use crate::context::Context;
use crate::probe;
use crate::resources::Applicable as _;
use crate::resources::package::PackageResource;

/// Install the GitHub CLI through the package manager.
#[derive(Debug)]
pub struct InstallGithubCli;

impl Step for InstallGithubCli {
    fn name(&self) -> &str {
        "GitHub CLI"
    }

    fn applies(&self, ctx: &Context) -> bool {
        ctx.platform.has_package_manager()
    }

    fn is_satisfied(&self, ctx: &Context) -> bool {
        probe::is_installed(&*ctx.executor, "gh")
    }

    fn run(&self, ctx: &Context) -> Result<()> {
        let runner = ctx.runner();
        let pkg = PackageResource::new("gh", &ctx.platform, &runner);
        pkg.apply()?;
        Ok(())
    }
}
