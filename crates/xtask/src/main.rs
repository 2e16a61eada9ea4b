//! Development tasks for the cherts workspace
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Check, Preview};

/// Development tasks for the cherts workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for cherts", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Set up a match and print every piece's possible moves
    Preview(Preview),

    /// Validate match content without printing moves
    Check(Check),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Preview(cmd) => cmd.execute(),
        Command::Check(cmd) => cmd.execute(),
    }
}
