//! Per-cell coverage: how much spread reach each colour has over every cell
//!
//! A token of power `p` covers the `p` cells along each of the six
//! directions, i.e. every cell a spread from it could touch. Coverage of a
//! cell counts those (token, direction, step) hits, so stronger and more
//! numerous tokens weigh more.

use crate::board::{Cell, CELLS, DIRECTIONS};
use crate::state::{BoardState, Player};

/// Coverage maps for both colours
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Coverage {
    maps: [[u16; CELLS]; 2],
}

impl Coverage {
    /// Compute coverage for both colours on `board`
    pub fn of(board: &BoardState) -> Self {
        let mut maps = [[0u16; CELLS]; 2];
        for (origin, token) in board.tokens() {
            let map = &mut maps[token.owner as usize];
            for dir in DIRECTIONS {
                let mut pos = origin;
                for _ in 0..token.power {
                    pos = pos.step(dir);
                    map[pos.index()] += 1;
                }
            }
        }
        Self { maps }
    }

    /// Coverage of `cell` by `player`
    pub fn get(&self, player: Player, cell: Cell) -> u16 {
        self.maps[player as usize][cell.index()]
    }

    /// Whether `player` can reach `cell` with a single spread
    pub fn reaches(&self, player: Player, cell: Cell) -> bool {
        self.get(player, cell) > 0
    }

    /// True when neither colour can touch an opposing token with any spread
    pub fn is_peaceful(&self, board: &BoardState) -> bool {
        board
            .tokens()
            .all(|(cell, token)| !self.reaches(token.owner.opponent(), cell))
    }
}

/// Shorthand for `Coverage::of(board).is_peaceful(board)`
pub fn is_peaceful(board: &BoardState) -> bool {
    Coverage::of(board).is_peaceful(board)
}
