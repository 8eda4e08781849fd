use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the bootstrap engine.
#[derive(Parser, Debug)]
#[command(
    name = "bootstrap",
    about = "Idempotent workstation bootstrap for macOS and Debian-based Linux",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Override the companion-repository workspace directory
    #[arg(long, global = true)]
    pub workspace: Option<std::path::PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the full provisioning step catalog
    Provision(ProvisionOpts),
    /// Report which steps are already satisfied without changing anything
    Doctor,
    /// Print version information
    Version,
}

/// Options for the `provision` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ProvisionOpts {
    /// Skip steps whose names contain any of these keywords
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Run only steps whose names contain any of these keywords
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,
}
