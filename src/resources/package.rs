//! Package installs through the platform package manager.

use anyhow::{Result, bail};

use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::exec::CommandRunner;
use crate::platform::{Os, Platform};

/// A package installable via `brew` or `apt-get`, probed through the
/// command it provides (which may differ from the package name, e.g.
/// `ripgrep` installs `rg`).
#[derive(Debug)]
pub struct PackageResource<'a> {
    /// Name passed to the package manager.
    pub package: String,
    /// Executable the package provides, used for the installed-ness probe.
    pub command: String,
    platform: &'a Platform,
    runner: &'a CommandRunner,
}

impl<'a> PackageResource<'a> {
    /// A package whose command name equals the package name.
    #[must_use]
    pub fn new(package: &str, platform: &'a Platform, runner: &'a CommandRunner) -> Self {
        Self::with_command(package, package, platform, runner)
    }

    /// A package probed through a differently named command.
    #[must_use]
    pub fn with_command(
        package: &str,
        command: &str,
        platform: &'a Platform,
        runner: &'a CommandRunner,
    ) -> Self {
        Self {
            package: package.to_string(),
            command: command.to_string(),
            platform,
            runner,
        }
    }
}

impl Applicable for PackageResource<'_> {
    fn description(&self) -> String {
        format!("package {}", self.package)
    }

    fn apply(&self) -> Result<ResourceChange> {
        let label = format!("install {}", self.package);
        match self.platform.os {
            Os::MacOs => self.runner.run(&label, "brew", &["install", &self.package])?,
            Os::DebianLike => self.runner.run(
                &label,
                "sudo",
                &["apt-get", "install", "-y", &self.package],
            )?,
            Os::OtherLinux => {
                bail!("no supported package manager for this platform")
            }
        }
        Ok(ResourceChange::Applied)
    }
}

impl Resource for PackageResource<'_> {
    fn current_state(&self) -> Result<ResourceState> {
        if !self.platform.has_package_manager() {
            return Ok(ResourceState::Invalid {
                reason: "no supported package manager".to_string(),
            });
        }
        if self.runner.which(&self.command) {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Missing)
        }
    }
}
