//! Infexion CLI - Command-line interface
//!
//! Commands:
//! - suggest: Pick a move for a saved position
//! - selfplay: Play full games with the engine

mod selfplay;
mod suggest;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "infexion")]
#[command(about = "Infexion alpha-beta game engine")]
struct Cli {
    /// Random seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick a move for a saved position
    Suggest(suggest::SuggestArgs),
    /// Play full games with the engine
    Selfplay(selfplay::SelfplayArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Suggest(args) => suggest::run(args),
        Commands::Selfplay(args) => selfplay::run(args, cli.seed),
    }
}
