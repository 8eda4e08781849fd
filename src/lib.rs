//! Workstation bootstrap engine.
//!
//! Provisions a fresh macOS or Debian/Ubuntu machine with a baseline shell
//! environment: package manager, CLI tools, companion repositories, dotfile
//! symlinks, login shell, shell framework, and prompt theming — all as a
//! fixed sequence of idempotent, detect-then-skip-or-install steps.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]** — optional TOML settings and path resolution
//! - **[`resources`]** — idempotent `check + apply` primitives (symlinks, clones, packages)
//! - **[`steps`]** — the named, strictly ordered provisioning catalog and its sequencer
//! - **[`commands`]** — top-level subcommand orchestration (`provision`, `doctor`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod exec;
pub mod logging;
pub mod platform;
pub mod probe;
pub mod resources;
pub mod steps;
