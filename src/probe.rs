//! Side-effect-free host probes.
//!
//! Every probe answers a yes/no question about the host and never raises:
//! an inability to determine state reads as `false`, which only ever causes
//! a redundant safe re-install, never a skipped step.

use std::path::Path;

use crate::exec::Executor;

/// True iff an executable of that name resolves on the search path.
#[must_use]
pub fn is_installed(executor: &dyn Executor, command: &str) -> bool {
    executor.which(command)
}

/// True iff the shell framework is installed under `home`.
///
/// oh-my-zsh installs a function library, not a standalone executable, so
/// PATH lookup cannot see it; its entry script on disk is the documented
/// installed-ness marker.
#[must_use]
pub fn framework_installed(home: &Path) -> bool {
    home.join(".oh-my-zsh").join("oh-my-zsh.sh").is_file()
}

/// True iff the registered login shell is `shell` (by name or full path).
///
/// `login_shell` is the value captured in the RunContext at startup; `None`
/// (indeterminate) reads as `false`.
#[must_use]
pub fn is_default_shell(login_shell: Option<&str>, shell: &str) -> bool {
    login_shell.is_some_and(|current| {
        current == shell || current.ends_with(&format!("/{shell}"))
    })
}

/// True iff `target` is a symlink resolving exactly to `source`.
///
/// Comparison uses the raw link value first, then the canonicalised forms,
/// so both `ln -s /abs/path` links and links through intermediate symlinks
/// are recognised. Broken links and plain files read as `false`.
#[must_use]
pub fn link_points_to(target: &Path, source: &Path) -> bool {
    let Ok(existing) = std::fs::read_link(target) else {
        return false;
    };
    if existing == source {
        return true;
    }
    match (target.canonicalize(), source.canonicalize()) {
        (Ok(resolved_target), Ok(resolved_source)) => resolved_target == resolved_source,
        _ => false,
    }
}
