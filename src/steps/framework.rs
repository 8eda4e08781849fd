use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use super::Step;
use crate::context::Context;
use crate::logging::Log as _;
use crate::probe;
use crate::resources::installer::InstallerScript;
use crate::resources::repo::{RepoFetcher, RepoRef};

/// oh-my-zsh's official installer script.
const FRAMEWORK_INSTALLER: InstallerScript = InstallerScript {
    name: "oh-my-zsh",
    url: "https://raw.githubusercontent.com/ohmyzsh/ohmyzsh/master/tools/install.sh",
};

/// Plugins cloned into the framework's custom plugin directory.
const PLUGINS: [&str; 2] = ["zsh-autosuggestions", "zsh-syntax-highlighting"];

fn plugin_ref(name: &str, home: &Path) -> RepoRef {
    RepoRef::at(
        name,
        &format!("https://github.com/zsh-users/{name}.git"),
        plugin_dir(home).join(name),
    )
}

fn plugin_dir(home: &Path) -> PathBuf {
    home.join(".oh-my-zsh").join("custom").join("plugins")
}

/// Install the shell framework and its plugin set.
///
/// The framework is a function library, not an executable, so the guard
/// checks its entry script on disk rather than PATH.
#[derive(Debug)]
pub struct ShellFramework;

impl Step for ShellFramework {
    fn name(&self) -> &str {
        "Shell framework"
    }

    fn is_satisfied(&self, ctx: &Context) -> bool {
        probe::framework_installed(&ctx.run.home)
            && PLUGINS
                .iter()
                .all(|name| plugin_ref(name, &ctx.run.home).checked_out())
    }

    fn run(&self, ctx: &Context) -> Result<()> {
        let runner = ctx.runner();

        if !probe::framework_installed(&ctx.run.home) {
            // RUNZSH/CHSH: do not drop into a new shell or re-register the
            // login shell (the shell step owns that); KEEP_ZSHRC: the conf
            // repository's zshrc is already linked.
            FRAMEWORK_INSTALLER
                .fetch_and_run(
                    &ctx.run.cache_dir,
                    &runner,
                    &[],
                    &[("RUNZSH", "no"), ("CHSH", "no"), ("KEEP_ZSHRC", "yes")],
                )
                .context("install oh-my-zsh")?;
        }

        let fetcher = RepoFetcher::new(&runner);
        for name in PLUGINS {
            let plugin = plugin_ref(name, &ctx.run.home);
            if plugin.checked_out() {
                ctx.log.debug(&format!("{name}: already installed"));
                continue;
            }
            ctx.log.info(&format!("installing plugin {name}"));
            fetcher
                .fetch(&plugin)
                .with_context(|| format!("install plugin '{name}'"))?;
        }
        Ok(())
    }
}
