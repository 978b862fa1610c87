//! Position evaluation
//!
//! Scores share one axis: positive favours Red, negative favours Blue.
//! [`Evaluator::attack_defense`] is the exception and is oriented to the
//! player passed in; callers fold it onto the axis with [`Player::sign`].

use serde::{Deserialize, Serialize};

use crate::coverage::Coverage;
use crate::state::{BoardState, Player};

/// Score of an eliminated opponent (effectively infinite)
pub const WIN_VALUE: f32 = 1000.0;

/// Heuristic scores are clamped into `(-WIN_VALUE, WIN_VALUE)`
pub const HEURISTIC_LIMIT: f32 = WIN_VALUE - 1.0;

/// Attack/defence breakdown for one player
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct AttackDefense {
    /// Weighted total, higher is better for the player scored
    pub score: f32,
    /// Own power minus opposing power
    pub material: i32,
    /// Opposing power sitting on cells this player reaches
    pub threat: u32,
    /// Own power sitting on cells the opponent reaches
    pub exposure: u32,
    /// Exposed own power this player could retake
    pub defended: u32,
}

/// Pluggable static evaluation used by move selection and the search horizon
pub trait Evaluator {
    /// Heuristic value of `board` for `player`; finite and within
    /// [`HEURISTIC_LIMIT`] for every reachable board
    fn attack_defense(&self, board: &BoardState, player: Player) -> AttackDefense;
}

/// Heuristic weights for the coverage-based evaluator
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Heuristics {
    /// Weight for raw power difference
    pub material_weight: f32,
    /// Weight for opposing power within reach
    pub attack_weight: f32,
    /// Penalty for own power within the opponent's reach
    pub exposure_weight: f32,
    /// Credit for exposed power that can be retaken
    pub defense_weight: f32,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            material_weight: 1.0,
            attack_weight: 0.5,
            exposure_weight: 0.5,
            defense_weight: 0.25,
        }
    }
}

impl Heuristics {
    /// Weights must be finite so scores stay finite
    pub fn is_valid(&self) -> bool {
        [
            self.material_weight,
            self.attack_weight,
            self.exposure_weight,
            self.defense_weight,
        ]
        .iter()
        .all(|w| w.is_finite())
    }
}

impl Evaluator for Heuristics {
    fn attack_defense(&self, board: &BoardState, player: Player) -> AttackDefense {
        let coverage = Coverage::of(board);
        let opponent = player.opponent();

        let mut threat = 0u32;
        let mut exposure = 0u32;
        let mut defended = 0u32;

        for (cell, token) in board.tokens() {
            let power = token.power as u32;
            if token.owner == player {
                if coverage.reaches(opponent, cell) {
                    exposure += power;
                    if coverage.reaches(player, cell) {
                        defended += power;
                    }
                }
            } else if coverage.reaches(player, cell) {
                threat += power;
            }
        }

        let material = board.power_of(player) as i32 - board.power_of(opponent) as i32;
        let score = self.material_weight * material as f32
            + self.attack_weight * threat as f32
            - self.exposure_weight * exposure as f32
            + self.defense_weight * defended as f32;

        AttackDefense {
            score: score.clamp(-HEURISTIC_LIMIT, HEURISTIC_LIMIT),
            material,
            threat,
            exposure,
            defended,
        }
    }
}

/// Raw power differential, Red minus Blue
pub fn evaluate_power(board: &BoardState) -> i32 {
    board.power_of(Player::Red) as i32 - board.power_of(Player::Blue) as i32
}

/// Win/loss sentinel when a colour has been eliminated.
/// Both colours gone scores as a draw.
pub fn terminal_score(board: &BoardState) -> Option<f32> {
    match (board.count(Player::Red), board.count(Player::Blue)) {
        (0, 0) => Some(0.0),
        (0, _) => Some(-WIN_VALUE),
        (_, 0) => Some(WIN_VALUE),
        _ => None,
    }
}
