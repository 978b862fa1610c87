//! Infexion Core - Board rules and game-tree search
//!
//! This crate provides the decision engine for Infexion:
//! - Board geometry (7x7 toroidal hex grid with axial coordinates)
//! - Board state with spawn/spread and undo
//! - Coverage analysis and attack/defence evaluation
//! - Move generation and successor pruning
//! - Alpha-beta search and a game driver

pub mod board;
pub mod state;
pub mod coverage;
pub mod eval;
pub mod movegen;
pub mod select;
pub mod ai;
pub mod agent;
pub mod game;
pub mod config;
pub mod error;

// Re-exports for convenient access
pub use board::{Cell, Direction, CELLS, DIM, DIRECTIONS};
pub use state::{BoardState, Move, Player, Token, MAX_BOARD_POWER, MAX_POWER};
pub use coverage::{is_peaceful, Coverage};
pub use eval::{evaluate_power, AttackDefense, Evaluator, Heuristics, WIN_VALUE};
pub use ai::{AlphaBetaAI, SearchResult};
pub use agent::{Agent, RandomAgent};
pub use game::{play_game, Game, GameResult};
pub use config::{SearchConfig, MAX_TURNS};
pub use error::{InfexionError, Result};
