//! Optional user settings.
//!
//! A small TOML file at `<config dir>/bootstrap/config.toml` can override
//! the workspace directory, the GitHub organization the companion
//! repositories are cloned from, and the extra-tools list. A missing file
//! yields the defaults; a malformed file is an error (silently ignoring a
//! typo'd config would be worse than failing the run).

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use serde::Deserialize;

/// Parsed contents of `config.toml`.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Companion-repository workspace directory (default: `~/workspace`).
    pub workspace: Option<PathBuf>,

    /// GitHub organization the companion repositories live under.
    pub github_org: Option<String>,

    /// Replacement for the built-in extra-tools list. Each entry is a
    /// package whose command name equals the package name.
    #[serde(default)]
    pub extra_tools: Vec<String>,
}

impl Settings {
    /// Load settings from `<config_dir>/bootstrap/config.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let path = config_dir.join("bootstrap").join("config.toml");
        if !path.is_file() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("read settings: {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("parse settings: {}", path.display()))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn write_settings(dir: &Path, contents: &str) {
        let conf = dir.join("bootstrap");
        std::fs::create_dir_all(&conf).unwrap();
        std::fs::write(conf.join("config.toml"), contents).unwrap();
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn full_settings_parse() {
        let dir = tempfile::tempdir().unwrap();
        write_settings(
            dir.path(),
            "workspace = \"/srv/repos\"\ngithub_org = \"acme\"\nextra_tools = [\"jq\", \"tmux\"]\n",
        );
        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings.workspace, Some(PathBuf::from("/srv/repos")));
        assert_eq!(settings.github_org.as_deref(), Some("acme"));
        assert_eq!(settings.extra_tools, vec!["jq", "tmux"]);
    }

    #[test]
    fn partial_settings_parse() {
        let dir = tempfile::tempdir().unwrap();
        write_settings(dir.path(), "github_org = \"acme\"\n");
        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings.workspace, None);
        assert!(settings.extra_tools.is_empty());
    }

    #[test]
    fn unknown_key_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write_settings(dir.path(), "workspce = \"/typo\"\n");
        let err = Settings::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("parse settings"));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write_settings(dir.path(), "workspace = [broken\n");
        assert!(Settings::load(dir.path()).is_err());
    }
}
