//! Turn-by-turn game driver
//!
//! Tracks the board, the side to move and the turn count, folds in moves
//! from either player, and decides when the game is over.

use serde::{Deserialize, Serialize};

use crate::agent::Agent;
use crate::config::MAX_TURNS;
use crate::error::{InfexionError, Result};
use crate::state::{BoardState, Move, Player};

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    RedWins,
    BlueWins,
    Draw,
}

/// A game in progress. Red moves first.
#[derive(Clone, Debug)]
pub struct Game {
    board: BoardState,
    to_move: Player,
    /// Moves played so far
    pub turn: u32,
    max_turns: u32,
    result: GameResult,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::with_max_turns(MAX_TURNS)
    }

    pub fn with_max_turns(max_turns: u32) -> Self {
        Self {
            board: BoardState::new(),
            to_move: Player::Red,
            turn: 0,
            max_turns,
            result: GameResult::Ongoing,
        }
    }

    /// Resume from a position, counting it as mid-game
    pub fn from_position(board: BoardState, to_move: Player, turn: u32) -> Self {
        let mut game = Self {
            board,
            to_move,
            turn,
            max_turns: MAX_TURNS,
            result: GameResult::Ongoing,
        };
        game.result = game.compute_result();
        game
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.to_move
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    /// Validate and play `mv` for the side to move
    pub fn apply_move(&mut self, mv: Move) -> Result<GameResult> {
        if self.result != GameResult::Ongoing {
            return Err(InfexionError::GameOver(self.result));
        }
        self.board = self.board.apply_external(mv, self.to_move)?;
        self.to_move = self.to_move.opponent();
        self.turn += 1;
        self.result = self.compute_result();
        Ok(self.result)
    }

    /// Elimination counts once both sides have had a turn; the turn limit is a draw
    fn compute_result(&self) -> GameResult {
        if self.turn >= 2 {
            match (self.board.count(Player::Red), self.board.count(Player::Blue)) {
                (0, 0) => return GameResult::Draw,
                (0, _) => return GameResult::BlueWins,
                (_, 0) => return GameResult::RedWins,
                _ => {}
            }
        }
        if self.turn >= self.max_turns {
            GameResult::Draw
        } else {
            GameResult::Ongoing
        }
    }
}

/// Play a full game between two agents, returning the final game and the
/// moves played
pub fn play_game(
    red: &mut dyn Agent,
    blue: &mut dyn Agent,
    max_turns: u32,
) -> Result<(Game, Vec<Move>)> {
    let mut game = Game::with_max_turns(max_turns);
    let mut history = Vec::new();

    while game.result() == GameResult::Ongoing {
        let agent: &mut dyn Agent = match game.current_player() {
            Player::Red => &mut *red,
            Player::Blue => &mut *blue,
        };
        let mv = agent.choose_move(game.board(), game.current_player())?;
        game.apply_move(mv)?;
        history.push(mv);
    }

    Ok((game, history))
}
