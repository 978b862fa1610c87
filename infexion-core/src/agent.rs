//! Move-choosing players: the alpha-beta engine and a random baseline

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::ai::AlphaBetaAI;
use crate::error::{InfexionError, Result};
use crate::eval::Evaluator;
use crate::movegen::legal_moves;
use crate::state::{BoardState, Move, Player};

/// Anything that can pick a move for the side to play
pub trait Agent {
    fn choose_move(&mut self, board: &BoardState, to_move: Player) -> Result<Move>;

    fn name(&self) -> &str;
}

impl<E: Evaluator> Agent for AlphaBetaAI<E> {
    fn choose_move(&mut self, board: &BoardState, to_move: Player) -> Result<Move> {
        AlphaBetaAI::choose_move(self, board, to_move)
    }

    fn name(&self) -> &str {
        "alpha-beta"
    }
}

/// Plays a uniformly random legal move
pub struct RandomAgent {
    rng: ChaCha8Rng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn choose_move(&mut self, board: &BoardState, to_move: Player) -> Result<Move> {
        legal_moves(board, to_move)
            .choose(&mut self.rng)
            .copied()
            .ok_or(InfexionError::NoLegalMoves(to_move))
    }

    fn name(&self) -> &str {
        "random"
    }
}
