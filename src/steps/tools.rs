use anyhow::{Result, bail};

use super::Step;
use crate::context::Context;
use crate::exec::Executor as _;
use crate::logging::Log as _;
use crate::resources::Applicable as _;
use crate::resources::package::PackageResource;

/// The built-in auxiliary tool set: `(package, command)` pairs, used when
/// the settings file does not override the list.
const DEFAULT_TOOLS: [(&str, &str); 5] = [
    ("ripgrep", "rg"),
    ("fzf", "fzf"),
    ("jq", "jq"),
    ("tmux", "tmux"),
    ("htop", "htop"),
];

/// One installable tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tool {
    /// Name passed to the package manager.
    pub package: String,
    /// Executable used for the installed-ness probe.
    pub command: String,
}

/// Install the auxiliary utilities, each if absent.
///
/// The only non-fatal step in the catalog: a broken formula for a
/// monitoring utility should not strand a half-provisioned machine, so
/// failures degrade to warnings and the run continues.
#[derive(Debug)]
pub struct ExtraTools {
    tools: Vec<Tool>,
}

impl ExtraTools {
    /// Build the step from the settings override, falling back to the
    /// built-in list when the override is empty. Overridden entries probe
    /// via their package name.
    #[must_use]
    pub fn new(extra_tools: &[String]) -> Self {
        let tools = if extra_tools.is_empty() {
            DEFAULT_TOOLS
                .iter()
                .map(|(package, command)| Tool {
                    package: (*package).to_string(),
                    command: (*command).to_string(),
                })
                .collect()
        } else {
            extra_tools
                .iter()
                .map(|name| Tool {
                    package: name.clone(),
                    command: name.clone(),
                })
                .collect()
        };
        Self { tools }
    }

    /// The tools this step manages.
    #[must_use]
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }
}

impl Step for ExtraTools {
    fn name(&self) -> &str {
        "Extra tools"
    }

    fn fatal(&self) -> bool {
        false
    }

    fn applies(&self, ctx: &Context) -> bool {
        ctx.platform.has_package_manager()
    }

    fn is_satisfied(&self, ctx: &Context) -> bool {
        self.tools.iter().all(|t| ctx.executor.which(&t.command))
    }

    fn run(&self, ctx: &Context) -> Result<()> {
        let runner = ctx.runner();
        let mut failed: Vec<&str> = Vec::new();

        for tool in &self.tools {
            if ctx.executor.which(&tool.command) {
                ctx.log
                    .debug(&format!("{}: already installed", tool.package));
                continue;
            }
            let pkg =
                PackageResource::with_command(&tool.package, &tool.command, &ctx.platform, &runner);
            match pkg.apply() {
                Ok(_) => ctx.log.info(&format!("installed {}", tool.package)),
                Err(e) => {
                    ctx.log.warn(&format!("{}: {e:#}", tool.package));
                    failed.push(&tool.package);
                }
            }
        }

        if !failed.is_empty() {
            bail!("{} tool(s) failed to install: {}", failed.len(), failed.join(", "));
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
    fn default_list_probes_via_command_names() {
        let step = ExtraTools::new(&[]);
        assert_eq!(step.tools().len(), DEFAULT_TOOLS.len());
        let rg = &step.tools()[0];
        assert_eq!(rg.package, "ripgrep");
        assert_eq!(rg.command, "rg");
    }

    #[test]
    fn settings_override_replaces_default_list() {
        let step = ExtraTools::new(&["bat".to_string(), "eza".to_string()]);
        assert_eq!(
            step.tools(),
            &[
                Tool {
                    package: "bat".to_string(),
                    command: "bat".to_string()
                },
                Tool {
                    package: "eza".to_string(),
                    command: "eza".to_string()
                },
            ]
        );
    }

    #[test]
    fn step_is_not_fatal() {
        assert!(!ExtraTools::new(&[]).fatal());
    }

    #[test]
    fn satisfied_when_every_command_present() {
        let executor = Arc::new(MockExecutor::ok().with_which(true));
        let (ctx, _log) = make_context(fake_run_context(), Os::DebianLike, executor);
        assert!(ExtraTools::new(&[]).is_satisfied(&ctx));
    }

    #[test]
    fn unsatisfied_when_any_command_missing() {
        let executor = Arc::new(MockExecutor::ok().with_which(false));
        let (ctx, _log) = make_context(fake_run_context(), Os::DebianLike, executor);
        assert!(!ExtraTools::new(&[]).is_satisfied(&ctx));
    }

    #[test]
    fn run_installs_each_missing_tool() {
        let executor = Arc::new(MockExecutor::ok());
        let (ctx, _log) = make_context(fake_run_context(), Os::DebianLike, Arc::clone(&executor) as _);
        ExtraTools::new(&["jq".to_string(), "tmux".to_string()])
            .run(&ctx)
            .unwrap();

        let calls = executor.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], vec!["sudo", "apt-get", "install", "-y", "jq"]);
        assert_eq!(calls[1], vec!["sudo", "apt-get", "install", "-y", "tmux"]);
    }

    #[test]
    fn run_continues_past_individual_failures() {
        // First install fails, second succeeds; the step reports the
        // failure but still attempts every tool.
        let executor = Arc::new(MockExecutor::with_responses(vec![
            (false, String::new()),
            (true, String::new()),
        ]));
        let (ctx, log) = make_context(fake_run_context(), Os::DebianLike, Arc::clone(&executor) as _);

        let err = ExtraTools::new(&["broken".to_string(), "jq".to_string()])
            .run(&ctx)
            .unwrap_err();

        assert!(err.to_string().contains("1 tool(s) failed"));
        assert_eq!(executor.call_count(), 2, "every tool must be attempted");
        assert!(log.lines().iter().any(|l| l.starts_with("WRN")));
    }
}
