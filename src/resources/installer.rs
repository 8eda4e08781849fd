//! Vendor installer scripts fetched over the network.
//!
//! The shell framework and the prompt engine ship as `curl | sh` installer
//! scripts. The engine instead downloads each script to the cache
//! directory and executes it from disk through the [`CommandRunner`], so
//! the exact bytes that ran are available next to the run log.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::exec::CommandRunner;

/// A named installer script with a fixed download URL.
#[derive(Debug, Clone, Copy)]
pub struct InstallerScript {
    /// Short name, used for the cached file and log labels.
    pub name: &'static str,
    /// Download URL.
    pub url: &'static str,
}

impl InstallerScript {
    /// Download the script into `cache_dir`, returning the cached path.
    ///
    /// The file is rewritten on every fetch so a re-run always executes the
    /// vendor's current script.
    ///
    /// # Errors
    ///
    /// Returns an error if the download fails or the file cannot be
    /// written.
    pub fn fetch(&self, cache_dir: &Path) -> Result<PathBuf> {
        let mut response = ureq::get(self.url)
            .call()
            .with_context(|| format!("download {} installer from {}", self.name, self.url))?;

        let body = response
            .body_mut()
            .read_to_string()
            .with_context(|| format!("read {} installer body", self.name))?;

        std::fs::create_dir_all(cache_dir)
            .with_context(|| format!("create cache dir: {}", cache_dir.display()))?;
        let path = cache_dir.join(format!("{}-install.sh", self.name));
        std::fs::write(&path, body)
            .with_context(|| format!("write installer: {}", path.display()))?;
        Ok(path)
    }

    /// Download the script and run it with `sh`, passing `args` to the
    /// script and `env` to the interpreter.
    ///
    /// # Errors
    ///
    /// Returns an error if the download fails or the script exits
    /// non-zero.
    pub fn fetch_and_run(
        &self,
        cache_dir: &Path,
        runner: &CommandRunner,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> Result<()> {
        let script = self.fetch(cache_dir)?;
        let script_path = script.to_string_lossy();
        let mut argv: Vec<&str> = vec![&script_path];
        argv.extend_from_slice(args);
        runner
            .run_with_env(&format!("{} installer", self.name), "sh", &argv, env)
            .with_context(|| format!("run {} installer", self.name))?;
        Ok(())
    }
}
