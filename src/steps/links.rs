use std::path::PathBuf;

use anyhow::{Context as _, Result};

use super::Step;
use crate::context::{Context, RunContext};
use crate::logging::Log as _;
use crate::probe;
use crate::resources::symlink::{self, LinkOutcome};

/// One symlink from the workspace into the home directory tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSpec {
    pub source: PathBuf,
    pub target: PathBuf,
}

/// The fixed set of links a provisioned home carries: shell and git
/// configuration out of the `conf` repository, the prompt configuration
/// into the XDG config root, and the `bin` repository as the user's
/// executable directory.
#[must_use]
pub fn link_specs(run: &RunContext) -> Vec<LinkSpec> {
    let conf = run.workspace.join("conf");
    vec![
        LinkSpec {
            source: conf.join("zshrc"),
            target: run.home.join(".zshrc"),
        },
        LinkSpec {
            source: conf.join("gitconfig"),
            target: run.home.join(".gitconfig"),
        },
        LinkSpec {
            source: conf.join("starship.toml"),
            target: run.config_dir.join("starship.toml"),
        },
        LinkSpec {
            source: run.workspace.join("bin"),
            target: run.bin_dir.clone(),
        },
    ]
}

/// Symlink the companion repositories' files into place.
#[derive(Debug)]
pub struct LinkDotfiles;

impl Step for LinkDotfiles {
    fn name(&self) -> &str {
        "Link dotfiles"
    }

    fn is_satisfied(&self, ctx: &Context) -> bool {
        link_specs(&ctx.run)
            .iter()
            .all(|spec| probe::link_points_to(&spec.target, &spec.source))
    }

    fn run(&self, ctx: &Context) -> Result<()> {
        for spec in link_specs(&ctx.run) {
            let outcome = symlink::link(&spec.source, &spec.target)
                .with_context(|| format!("link {}", spec.target.display()))?;
            match outcome {
                LinkOutcome::AlreadyCorrect => {
                    ctx.log
                        .debug(&format!("{}: already linked", spec.target.display()));
                }
                LinkOutcome::Created => {
                    ctx.log.info(&format!(
                        "linked {} -> {}",
                        spec.target.display(),
                        spec.source.display()
                    ));
                }
                LinkOutcome::ReplacedLink => {
                    ctx.log
                        .info(&format!("relinked {}", spec.target.display()));
                }
                LinkOutcome::BackedUp(backup) => {
                    ctx.log.info(&format!(
                        "linked {} (previous content kept at {})",
                        spec.target.display(),
                        backup.display()
                    ));
                }
            }
        }
        Ok(())
    }
}
