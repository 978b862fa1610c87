//! Successor pruning
//!
//! Ranks a node's candidate moves by how bad they leave the position for the
//! opponent, keeps the best `breadth`, and always searches the move with the
//! best raw power swing first.

use crate::eval::{evaluate_power, Evaluator};
use crate::state::{BoardState, Move, Player};

/// A candidate move with its ordering keys, both on the Red-positive axis
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    pub mv: Move,
    /// Opponent's attack/defence score after the move, folded onto the axis
    pub rank: f32,
    /// Power differential after the move
    pub power: i32,
}

/// Score each move by applying it to `board` and undoing it again
pub fn score_candidates<E: Evaluator>(
    board: &mut BoardState,
    mover: Player,
    moves: &[Move],
    evaluator: &E,
) -> Vec<Candidate> {
    let opponent = mover.opponent();
    moves
        .iter()
        .map(|&mv| {
            let undo = board.apply(mv, mover);
            let rank = opponent.sign() * evaluator.attack_defense(board, opponent).score;
            let power = evaluate_power(board);
            board.undo(undo);
            Candidate { mv, rank, power }
        })
        .collect()
}

/// Order and truncate candidates for `mover`.
///
/// The result holds at most `breadth` moves. The greedy power pick is always
/// first; the rest follow in heuristic order.
pub fn select(mut candidates: Vec<Candidate>, mover: Player, breadth: usize) -> Vec<Move> {
    if candidates.is_empty() || breadth == 0 {
        return Vec::new();
    }

    // Stable sorts keep generation order among ties
    if mover.is_maximizing() {
        candidates.sort_by(|a, b| b.rank.total_cmp(&a.rank));
    } else {
        candidates.sort_by(|a, b| a.rank.total_cmp(&b.rank));
    }

    let greedy = greedy_index(&candidates, mover);
    let pick = candidates[greedy];

    if greedy < breadth {
        candidates.remove(greedy);
        candidates.truncate(breadth - 1);
    } else {
        candidates.truncate(breadth);
        candidates.pop();
    }
    candidates.insert(0, pick);

    candidates.into_iter().map(|c| c.mv).collect()
}

/// First candidate with the most mover-favouring power differential
fn greedy_index(candidates: &[Candidate], mover: Player) -> usize {
    let mut best = 0;
    for (i, c) in candidates.iter().enumerate().skip(1) {
        let better = if mover.is_maximizing() {
            c.power > candidates[best].power
        } else {
            c.power < candidates[best].power
        };
        if better {
            best = i;
        }
    }
    best
}
