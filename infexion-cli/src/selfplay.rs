//! Selfplay command - play full games with the engine
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_config(), play_series(), report_results()
//! - Level 3: play_single_game(), compute_statistics()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use infexion_core::{play_game, AlphaBetaAI, Agent, GameResult, Move, Player, RandomAgent, SearchConfig};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SelfplayArgs {
    /// Search config JSON file (depth, breadth, heuristics)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Override search depth
    #[arg(long)]
    pub depth: Option<u32>,

    /// Override successors kept per node
    #[arg(long)]
    pub breadth: Option<usize>,

    /// Play the engine against a random mover (alternating colours)
    #[arg(long)]
    pub vs_random: bool,

    /// Maximum turns per game before a draw
    #[arg(long, default_value = "343")]
    pub max_turns: u32,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    result: GameResult,
    turns: u32,
    red: String,
    blue: String,
    #[allow(dead_code)] // Kept for replay
    moves: Vec<Move>,
}

/// Aggregated series results
#[derive(Clone, Debug)]
struct SeriesResults {
    games: Vec<GameRecord>,
    red_wins: usize,
    blue_wins: usize,
    draws: usize,
    engine_wins: usize,
    avg_turns: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run selfplay command
///
/// 1. Resolve the search config
/// 2. Play the series
/// 3. Report results
pub fn run(args: SelfplayArgs, seed: Option<u64>) -> Result<()> {
    let config = load_config(&args)?;

    tracing::info!(
        "Starting selfplay: {} games, depth={}, breadth={}{}",
        args.games,
        config.depth,
        config.breadth,
        if args.vs_random { ", vs random" } else { "" }
    );

    let results = play_series(&config, &args, seed)?;

    report_results(&results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Load config file if given, then apply command-line overrides
fn load_config(args: &SelfplayArgs) -> Result<SearchConfig> {
    let mut config = match &args.config {
        Some(path) => SearchConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => SearchConfig::default(),
    };

    if let Some(depth) = args.depth {
        config.depth = depth;
    }
    if let Some(breadth) = args.breadth {
        config.breadth = breadth;
    }
    config.validate().context("Invalid search settings")?;

    Ok(config)
}

/// Play all games in the series
fn play_series(config: &SearchConfig, args: &SelfplayArgs, seed: Option<u64>) -> Result<SeriesResults> {
    let mut rng = create_rng(seed);
    let mut games = Vec::with_capacity(args.games);

    for game_num in 0..args.games {
        // Alternate colours for fairness against the random mover
        let engine_colour = if game_num % 2 == 0 { Player::Red } else { Player::Blue };

        let record = play_single_game(config, args, game_num + 1, engine_colour, rng.gen())?;

        tracing::info!(
            "Game {}: {:?} ({} turns)",
            record.game_number,
            record.result,
            record.turns
        );

        games.push(record);
    }

    Ok(compute_statistics(games))
}

/// Report series results
fn report_results(results: &SeriesResults, args: &SelfplayArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(results, args.vs_random);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one game, engine against engine or against a random mover
fn play_single_game(
    config: &SearchConfig,
    args: &SelfplayArgs,
    game_number: usize,
    engine_colour: Player,
    game_seed: u64,
) -> Result<GameRecord> {
    let mut engine = AlphaBetaAI::from_config(config)?;
    let mut opponent: Box<dyn Agent> = if args.vs_random {
        Box::new(RandomAgent::new(game_seed))
    } else {
        Box::new(AlphaBetaAI::from_config(config)?)
    };

    let (game, moves) = match engine_colour {
        Player::Red => play_game(&mut engine, opponent.as_mut(), args.max_turns),
        Player::Blue => play_game(opponent.as_mut(), &mut engine, args.max_turns),
    }
    .with_context(|| format!("Game {} aborted", game_number))?;

    let (red, blue) = match engine_colour {
        Player::Red => (engine.name().to_string(), opponent.name().to_string()),
        Player::Blue => (opponent.name().to_string(), engine.name().to_string()),
    };

    Ok(GameRecord {
        game_number,
        result: game.result(),
        turns: game.turn,
        red,
        blue,
        moves,
    })
}

/// Compute aggregate statistics from game records
fn compute_statistics(games: Vec<GameRecord>) -> SeriesResults {
    let count = |result: GameResult| games.iter().filter(|g| g.result == result).count();
    let red_wins = count(GameResult::RedWins);
    let blue_wins = count(GameResult::BlueWins);
    let draws = count(GameResult::Draw);

    let engine_wins = games
        .iter()
        .filter(|g| match g.result {
            GameResult::RedWins => g.red == "alpha-beta",
            GameResult::BlueWins => g.blue == "alpha-beta",
            _ => false,
        })
        .count();

    let total_turns: u32 = games.iter().map(|g| g.turns).sum();
    let avg_turns = if games.is_empty() {
        0.0
    } else {
        total_turns as f32 / games.len() as f32
    };

    SeriesResults {
        games,
        red_wins,
        blue_wins,
        draws,
        engine_wins,
        avg_turns,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn percent(part: usize, total: usize) -> f32 {
    if total > 0 {
        part as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

/// Print results as JSON
fn print_json_results(results: &SeriesResults) {
    #[derive(serde::Serialize)]
    struct JsonGame<'a> {
        game_number: usize,
        result: GameResult,
        turns: u32,
        red: &'a str,
        blue: &'a str,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        total_games: usize,
        red_wins: usize,
        blue_wins: usize,
        draws: usize,
        engine_wins: usize,
        avg_turns: f32,
        games: Vec<JsonGame<'a>>,
    }

    let output = JsonOutput {
        total_games: results.games.len(),
        red_wins: results.red_wins,
        blue_wins: results.blue_wins,
        draws: results.draws,
        engine_wins: results.engine_wins,
        avg_turns: results.avg_turns,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                result: g.result,
                turns: g.turns,
                red: &g.red,
                blue: &g.blue,
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text
fn print_text_results(results: &SeriesResults, vs_random: bool) {
    let total = results.games.len();

    println!("\n=== Selfplay Results ===");
    println!("Total games: {}", total);
    println!(
        "Red wins:    {} ({:.1}%)",
        results.red_wins,
        percent(results.red_wins, total)
    );
    println!(
        "Blue wins:   {} ({:.1}%)",
        results.blue_wins,
        percent(results.blue_wins, total)
    );
    println!(
        "Draws:       {} ({:.1}%)",
        results.draws,
        percent(results.draws, total)
    );
    if vs_random {
        println!(
            "Engine wins: {} ({:.1}%)",
            results.engine_wins,
            percent(results.engine_wins, total)
        );
    }
    println!("Avg turns:   {:.1}", results.avg_turns);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: {} (red) vs {} (blue): {:?} in {} turns",
            game.game_number, game.red, game.blue, game.result, game.turns
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(n: usize, result: GameResult, turns: u32, red: &str, blue: &str) -> GameRecord {
        GameRecord {
            game_number: n,
            result,
            turns,
            red: red.into(),
            blue: blue.into(),
            moves: vec![],
        }
    }

    #[test]
    fn test_compute_statistics_empty() {
        let results = compute_statistics(vec![]);
        assert_eq!(results.red_wins, 0);
        assert_eq!(results.blue_wins, 0);
        assert_eq!(results.draws, 0);
        assert_eq!(results.avg_turns, 0.0);
    }

    #[test]
    fn test_compute_statistics() {
        let games = vec![
            record(1, GameResult::RedWins, 10, "alpha-beta", "random"),
            record(2, GameResult::RedWins, 20, "random", "alpha-beta"),
            record(3, GameResult::Draw, 30, "alpha-beta", "random"),
        ];

        let results = compute_statistics(games);
        assert_eq!(results.red_wins, 2);
        assert_eq!(results.blue_wins, 0);
        assert_eq!(results.draws, 1);
        assert_eq!(results.engine_wins, 1);
        assert_eq!(results.avg_turns, 20.0);
    }

    #[test]
    fn test_create_rng_deterministic() {
        let mut rng1 = create_rng(Some(42));
        let mut rng2 = create_rng(Some(42));
        assert_eq!(rng1.gen::<u64>(), rng2.gen::<u64>());
    }

    #[test]
    fn test_overrides_apply() {
        let args = SelfplayArgs {
            config: None,
            games: 1,
            depth: Some(2),
            breadth: Some(3),
            vs_random: true,
            max_turns: 10,
            json: false,
        };
        let config = load_config(&args).unwrap();
        assert_eq!(config.depth, 2);
        assert_eq!(config.breadth, 3);

        let bad = SelfplayArgs { depth: Some(0), ..args };
        assert!(load_config(&bad).is_err());
    }

    #[test]
    fn test_short_series_vs_random() {
        let args = SelfplayArgs {
            config: None,
            games: 2,
            depth: Some(2),
            breadth: Some(3),
            vs_random: true,
            max_turns: 30,
            json: false,
        };
        let config = load_config(&args).unwrap();
        let results = play_series(&config, &args, Some(9)).unwrap();
        assert_eq!(results.games.len(), 2);
        assert_eq!(results.games[0].red, "alpha-beta");
        assert_eq!(results.games[1].blue, "alpha-beta");
        assert!(results.games.iter().all(|g| g.turns <= 30));
    }
}
