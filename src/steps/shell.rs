use anyhow::{Context as _, Result};

use super::Step;
use crate::context::Context;
use crate::logging::Log as _;
use crate::probe;
use crate::resources::Applicable as _;
use crate::resources::package::PackageResource;

/// The interactive shell every later step configures for.
const SHELL: &str = "zsh";

/// Install zsh and register it as the login shell.
///
/// Runs before the framework step: oh-my-zsh refuses to install without a
/// zsh on PATH.
#[derive(Debug)]
pub struct DefaultShell;

impl Step for DefaultShell {
    fn name(&self) -> &str {
        "Default shell"
    }

    fn is_satisfied(&self, ctx: &Context) -> bool {
        probe::is_installed(&*ctx.executor, SHELL)
            && probe::is_default_shell(ctx.run.login_shell.as_deref(), SHELL)
    }

    fn run(&self, ctx: &Context) -> Result<()> {
        let runner = ctx.runner();

        if !probe::is_installed(&*ctx.executor, SHELL) {
            let pkg = PackageResource::new(SHELL, &ctx.platform, &runner);
            pkg.apply().context("install zsh")?;
        }

        if !probe::is_default_shell(ctx.run.login_shell.as_deref(), SHELL) {
            let path = runner.capture("locate zsh", "which", &[SHELL])?;
            let path = path.trim();
            // chsh prompts for the user's password; the run blocks until
            // answered.
            runner.run("change login shell", "chsh", &["-s", path])?;
            ctx.log.info(&format!("login shell set to {path}"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::exec::test_helpers::MockExecutor;
    use crate::platform::Os;
    use crate::steps::test_helpers::{fake_run_context, make_context};
    use std::sync::Arc;

    #[test]
    fn satisfied_when_zsh_installed_and_default() {
        let executor = Arc::new(MockExecutor::ok().with_which(true));
        let mut run = fake_run_context();
        run.login_shell = Some("/usr/bin/zsh".to_string());
        let (ctx, _log) = make_context(run, Os::DebianLike, executor);
        assert!(DefaultShell.is_satisfied(&ctx));
    }

    #[test]
    fn unsatisfied_when_login_shell_is_bash() {
        let executor = Arc::new(MockExecutor::ok().with_which(true));
        let (ctx, _log) = make_context(fake_run_context(), Os::DebianLike, executor);
        assert!(!DefaultShell.is_satisfied(&ctx));
    }

    #[test]
    fn unsatisfied_when_login_shell_unknown() {
        let executor = Arc::new(MockExecutor::ok().with_which(true));
        let mut run = fake_run_context();
        run.login_shell = None;
        let (ctx, _log) = make_context(run, Os::DebianLike, executor);
        assert!(!DefaultShell.is_satisfied(&ctx));
    }

    #[test]
    fn run_installs_then_registers_shell() {
        // zsh not on PATH: install, locate, chsh.
        let executor = Arc::new(MockExecutor::with_responses(vec![
            (true, String::new()),              // apt-get install
            (true, "/usr/bin/zsh\n".to_string()), // which zsh
            (true, String::new()),              // chsh
        ]));
        let (ctx, _log) = make_context(fake_run_context(), Os::DebianLike, Arc::clone(&executor) as _);

        DefaultShell.run(&ctx).unwrap();

        let calls = executor.calls();
        assert_eq!(calls[0], vec!["sudo", "apt-get", "install", "-y", "zsh"]);
        assert_eq!(calls[1], vec!["which", "zsh"]);
        assert_eq!(calls[2], vec!["chsh", "-s", "/usr/bin/zsh"]);
    }

    #[test]
    fn run_skips_install_when_zsh_present() {
        let executor = Arc::new(
            MockExecutor::with_responses(vec![
                (true, "/bin/zsh\n".to_string()), // which zsh
                (true, String::new()),            // chsh
            ])
            .with_which(true),
        );
        let (ctx, _log) = make_context(fake_run_context(), Os::MacOs, Arc::clone(&executor) as _);

        DefaultShell.run(&ctx).unwrap();

        let calls = executor.calls();
        assert_eq!(calls[0], vec!["which", "zsh"]);
        assert_eq!(calls[1], vec!["chsh", "-s", "/bin/zsh"]);
    }

    #[test]
    fn run_propagates_chsh_failure() {
        let executor = Arc::new(
            MockExecutor::with_responses(vec![
                (true, "/bin/zsh\n".to_string()),
                (false, String::new()),
            ])
            .with_which(true),
        );
        let (ctx, _log) = make_context(fake_run_context(), Os::DebianLike, executor);
        assert!(DefaultShell.run(&ctx).is_err());
    }
}
