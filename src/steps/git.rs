use anyhow::{Result, bail};

use super::Step;
use crate::context::Context;
use crate::platform::Os;
use crate::probe;
use crate::resources::Applicable as _;
use crate::resources::package::PackageResource;

/// Ensure the version-control tool exists before anything is cloned.
///
/// On macOS git ships with the Xcode command line tools, which predate
/// Homebrew on a fresh machine; on Debian it comes from apt.
#[derive(Debug)]
pub struct InstallGit;

impl Step for InstallGit {
    fn name(&self) -> &str {
        "Install git"
    }

    fn is_satisfied(&self, ctx: &Context) -> bool {
        probe::is_installed(&*ctx.executor, "git")
    }

    fn run(&self, ctx: &Context) -> Result<()> {
        match ctx.platform.os {
            Os::MacOs => {
                // Triggers the command line tools install dialog; the run
                // blocks at the next git invocation until it completes.
                ctx.runner()
                    .run("xcode command line tools", "xcode-select", &["--install"])?;
                Ok(())
            }
            Os::DebianLike => {
                let runner = ctx.runner();
                let pkg = PackageResource::new("git", &ctx.platform, &runner);
                pkg.apply()?;
                Ok(())
            }
            Os::OtherLinux => bail!("no supported way to install git on this platform"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::exec::test_helpers::MockExecutor;
    use crate::steps::test_helpers::{fake_run_context, make_context};
    use std::sync::Arc;

    #[test]
    fn satisfied_when_git_on_path() {
        let executor = Arc::new(MockExecutor::ok().with_which(true));
        let (ctx, _log) = make_context(fake_run_context(), Os::DebianLike, executor);
        assert!(InstallGit.is_satisfied(&ctx));
    }

    #[test]
    fn run_installs_via_apt_on_debian() {
        let executor = Arc::new(MockExecutor::ok());
        let (ctx, _log) = make_context(fake_run_context(), Os::DebianLike, Arc::clone(&executor) as _);
        InstallGit.run(&ctx).unwrap();
        assert_eq!(
            executor.calls()[0],
            vec!["sudo", "apt-get", "install", "-y", "git"]
        );
    }

    #[test]
    fn run_uses_xcode_select_on_macos() {
        let executor = Arc::new(MockExecutor::ok());
        let (ctx, _log) = make_context(fake_run_context(), Os::MacOs, Arc::clone(&executor) as _);
        InstallGit.run(&ctx).unwrap();
        assert_eq!(executor.calls()[0], vec!["xcode-select", "--install"]);
    }

    #[test]
    fn run_fails_on_unsupported_platform() {
        let executor = Arc::new(MockExecutor::ok());
        let (ctx, _log) = make_context(fake_run_context(), Os::OtherLinux, executor);
        assert!(InstallGit.run(&ctx).is_err());
    }
}
