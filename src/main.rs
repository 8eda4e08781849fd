use anyhow::Result;
use clap::Parser;

use bootstrap_cli::{cli, commands};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    match args.command {
        cli::Command::Provision(opts) => commands::provision::run(&args.global, &opts),
        cli::Command::Doctor => commands::doctor::run(&args.global),
        cli::Command::Version => {
            let version = option_env!("BOOTSTRAP_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
            println!("bootstrap {version}");
            Ok(())
        }
    }
}
