//! The named, strictly ordered provisioning steps.
//!
//! Ordering is significant and fixed: later steps assume earlier steps'
//! postconditions. The package manager must be ready before anything is
//! installed through it, the companion repositories must exist before
//! their files are linked, and the shell must be installed before the
//! framework that extends it. Reordering the catalog is unsafe.

pub mod framework;
pub mod git;
pub mod github_cli;
pub mod links;
pub mod package_manager;
pub mod prompt;
pub mod repos;
pub mod sequencer;
pub mod shell;
pub mod sudo;
pub mod tools;

use anyhow::Result;

use crate::config::Settings;
use crate::context::Context;

/// A named, idempotent provisioning step.
///
/// The sequencer consults [`applies`](Step::applies) (platform
/// applicability), then [`is_satisfied`](Step::is_satisfied) (the guard),
/// and only then invokes [`run`](Step::run). Steps classify themselves as
/// fatal or recoverable at definition time, never dynamically.
pub trait Step: Send + Sync {
    /// Human-readable step name, unique within the catalog.
    fn name(&self) -> &str;

    /// Whether a failure of this step aborts the whole run.
    fn fatal(&self) -> bool {
        true
    }

    /// Whether this step applies to the current platform.
    fn applies(&self, ctx: &Context) -> bool {
        let _ = ctx;
        true
    }

    /// The guard: whether the step's effect is already present. A `true`
    /// here skips the action entirely.
    fn is_satisfied(&self, ctx: &Context) -> bool;

    /// Execute the step's action.
    ///
    /// # Errors
    ///
    /// Returns an error if the action fails; the sequencer decides whether
    /// that aborts the run based on [`fatal`](Step::fatal).
    fn run(&self, ctx: &Context) -> Result<()>;
}

/// The complete provisioning catalog in execution order.
#[must_use]
pub fn catalog(settings: &Settings) -> Vec<Box<dyn Step>> {
    vec![
        Box::new(sudo::AcquireSudo),
        Box::new(git::InstallGit),
        Box::new(package_manager::PackageManager),
        Box::new(github_cli::InstallGithubCli),
        Box::new(repos::FetchRepos),
        Box::new(links::LinkDotfiles),
        Box::new(shell::DefaultShell),
        Box::new(framework::ShellFramework),
        Box::new(prompt::PromptEngine),
        Box::new(tools::ExtraTools::new(&settings.extra_tools)),
    ]
}

/// Filter the catalog by the `--skip`/`--only` keyword lists
/// (case-insensitive substring match on step names). `--only` wins when
/// both are given.
#[must_use]
pub fn filter<'a>(
    steps: &'a [Box<dyn Step>],
    skip: &[String],
    only: &[String],
) -> Vec<&'a dyn Step> {
    steps
        .iter()
        .filter(|s| {
            let name = s.name().to_lowercase();
            if !only.is_empty() {
                return only.iter().any(|o| name.contains(&o.to_lowercase()));
            }
            if !skip.is_empty() {
                return !skip.iter().any(|k| name.contains(&k.to_lowercase()));
            }
            true
        })
        .map(AsRef::as_ref)
        .collect()
}
