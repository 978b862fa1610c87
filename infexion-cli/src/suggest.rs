//! Suggest command - pick a move for a saved position

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use infexion_core::{AlphaBetaAI, BoardState, Player, SearchConfig, SearchResult};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Colour {
    Red,
    Blue,
}

impl From<Colour> for Player {
    fn from(colour: Colour) -> Self {
        match colour {
            Colour::Red => Player::Red,
            Colour::Blue => Player::Blue,
        }
    }
}

#[derive(Args)]
pub struct SuggestArgs {
    /// Board JSON file: a list of {"cell": [r, q], "player": "red", "power": n}
    #[arg(long, value_name = "FILE")]
    pub board: PathBuf,

    /// Side to move
    #[arg(long, value_enum)]
    pub player: Colour,

    /// Search config JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override search depth
    #[arg(long)]
    pub depth: Option<u32>,

    /// Output the move as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run suggest command
pub fn run(args: SuggestArgs) -> Result<()> {
    let board = load_board(&args.board)?;
    let mut config = match &args.config {
        Some(path) => SearchConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => SearchConfig::default(),
    };
    if let Some(depth) = args.depth {
        config.depth = depth;
    }

    let result = suggest(&board, args.player.into(), &config)?;

    tracing::info!(
        "Searched {} nodes ({} cutoffs), score {:.2}",
        result.nodes,
        result.cutoffs,
        result.score
    );

    if args.json {
        println!("{}", serde_json::to_string(&result.best_move)?);
    } else {
        println!("{}", result.best_move);
    }
    Ok(())
}

fn load_board(path: &Path) -> Result<BoardState> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read board: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse board: {}", path.display()))
}

fn suggest(board: &BoardState, player: Player, config: &SearchConfig) -> Result<SearchResult> {
    let mut ai = AlphaBetaAI::from_config(config)?;
    let result = ai
        .search(board, player)
        .with_context(|| format!("No move available for {}", player))?;
    Ok(result)
}
