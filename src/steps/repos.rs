use anyhow::{Context as _, Result};

use super::Step;
use crate::context::Context;
use crate::logging::Log as _;
use crate::resources::repo::{COMPANION_REPOS, RepoFetcher, RepoRef};

/// Fetch the companion repositories into the workspace.
///
/// Only repositories without a valid checkout are fetched; a fetch is
/// destroy-then-fresh, so whatever occupied the local path is discarded.
#[derive(Debug)]
pub struct FetchRepos;

impl FetchRepos {
    fn refs(ctx: &Context) -> Vec<RepoRef> {
        COMPANION_REPOS
            .iter()
            .map(|name| RepoRef::companion(name, &ctx.run.github_org, &ctx.run.workspace))
            .collect()
    }
}

impl Step for FetchRepos {
    fn name(&self) -> &str {
        "Fetch companion repositories"
    }

    fn is_satisfied(&self, ctx: &Context) -> bool {
        Self::refs(ctx).iter().all(RepoRef::checked_out)
    }

    fn run(&self, ctx: &Context) -> Result<()> {
        let runner = ctx.runner();
        let fetcher = RepoFetcher::new(&runner);
        for repo in Self::refs(ctx) {
            if repo.checked_out() {
                ctx.log.debug(&format!("{}: already checked out", repo.name));
                continue;
            }
            ctx.log.info(&format!("cloning {}", repo.name));
            fetcher
                .fetch(&repo)
                .with_context(|| format!("fetch companion repository '{}'", repo.name))?;
        }
        Ok(())
    }
}
