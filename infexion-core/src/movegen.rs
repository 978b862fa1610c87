//! Move generation
//!
//! Order is fixed: own tokens in row-major order with the six directions in
//! [`DIRECTIONS`] order, then spawn cells in row-major order. Successor
//! pruning relies on this for reproducible tie-breaking.

use crate::board::{Cell, DIRECTIONS};
use crate::coverage::Coverage;
use crate::state::{BoardState, Move, Player};

/// Every rules-legal move for `player`, unfiltered
pub fn legal_moves(board: &BoardState, player: Player) -> Vec<Move> {
    let mut moves = spread_moves(board, player);
    if board.can_spawn() {
        moves.extend(
            Cell::all()
                .filter(|&cell| board.is_empty(cell))
                .map(|cell| Move::Spawn { cell }),
        );
    }
    moves
}

/// Candidate moves for search: all spreads, plus spawns on empty cells where
/// `player`'s coverage is at least the opponent's.
///
/// `coverage` must be computed on `board` before any move is applied. If the
/// filter leaves no move at all, every empty cell is offered instead.
pub fn generate(board: &BoardState, player: Player, coverage: &Coverage) -> Vec<Move> {
    let mut moves = spread_moves(board, player);
    if !board.can_spawn() {
        return moves;
    }

    let opponent = player.opponent();
    let empty = move || Cell::all().filter(move |&cell| board.is_empty(cell));
    moves.extend(
        empty()
            .filter(|&cell| coverage.get(player, cell) >= coverage.get(opponent, cell))
            .map(|cell| Move::Spawn { cell }),
    );

    if moves.is_empty() {
        tracing::warn!("No spawn survives the coverage filter for {}, offering all cells", player);
        moves.extend(empty().map(|cell| Move::Spawn { cell }));
    }
    moves
}

/// [`generate`] with each move materialised into its own board copy
pub fn generate_successors(
    board: &BoardState,
    player: Player,
    coverage: &Coverage,
) -> Vec<(BoardState, Move)> {
    generate(board, player, coverage)
        .into_iter()
        .map(|mv| {
            let mut next = board.clone();
            next.apply(mv, player);
            (next, mv)
        })
        .collect()
}

fn spread_moves(board: &BoardState, player: Player) -> Vec<Move> {
    board
        .cells_of(player)
        .flat_map(|cell| {
            DIRECTIONS
                .into_iter()
                .map(move |direction| Move::Spread { cell, direction })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Direction, CELLS};

    fn board(tokens: &[(i8, i8, Player, u8)]) -> BoardState {
        let tokens: Vec<_> = tokens
            .iter()
            .map(|&(r, q, p, k)| (Cell::new(r, q), p, k))
            .collect();
        BoardState::from_tokens(&tokens).unwrap()
    }

    #[test]
    fn test_empty_board_offers_every_spawn() {
        let b = BoardState::new();
        let moves = generate(&b, Player::Red, &Coverage::of(&b));
        assert_eq!(moves.len(), CELLS);
        assert!(moves.iter().all(|m| matches!(m, Move::Spawn { .. })));
        assert_eq!(moves[0], Move::Spawn { cell: Cell::new(0, 0) });
    }

    #[test]
    fn test_spreads_come_first_in_direction_order() {
        let b = board(&[(2, 2, Player::Red, 1), (4, 4, Player::Red, 1)]);
        let moves = generate(&b, Player::Red, &Coverage::of(&b));
        assert_eq!(
            moves[0],
            Move::Spread { cell: Cell::new(2, 2), direction: Direction::Up }
        );
        assert_eq!(
            moves[5],
            Move::Spread { cell: Cell::new(2, 2), direction: Direction::UpLeft }
        );
        assert_eq!(
            moves[6],
            Move::Spread { cell: Cell::new(4, 4), direction: Direction::Up }
        );
        assert!(matches!(moves[12], Move::Spawn { .. }));
    }

    #[test]
    fn test_spawn_filter_avoids_opponent_territory() {
        let b = board(&[(3, 3, Player::Blue, 2), (0, 0, Player::Red, 1)]);
        let cov = Coverage::of(&b);
        let moves = generate(&b, Player::Red, &cov);
        for mv in &moves {
            if let Move::Spawn { cell } = mv {
                assert!(cov.get(Player::Red, *cell) >= cov.get(Player::Blue, *cell));
            }
        }
        // Next to blue's token and outside red's reach
        assert!(!moves.contains(&Move::Spawn { cell: Cell::new(3, 4) }));
        // Uncontested cells are allowed
        assert!(moves.contains(&Move::Spawn { cell: Cell::new(6, 3) }));
    }

    #[test]
    fn test_no_spawns_at_power_cap() {
        let mut tokens = Vec::new();
        for r in 0..7 {
            tokens.push((r, 0, Player::Red, 6));
        }
        tokens.push((0, 3, Player::Red, 6));
        tokens.push((5, 5, Player::Blue, 1));
        let b = board(&tokens);
        let moves = generate(&b, Player::Blue, &Coverage::of(&b));
        assert_eq!(moves.len(), 6);
        assert_eq!(legal_moves(&b, Player::Blue).len(), 6);
    }

    #[test]
    fn test_fallback_when_filter_rejects_everything() {
        // Blue has no tokens and red covers every empty cell
        let mut tokens = Vec::new();
        for r in 0..7 {
            tokens.push((r, 0, Player::Red, 6));
        }
        let b = board(&tokens);
        let cov = Coverage::of(&b);
        assert!(Cell::all().filter(|&c| b.is_empty(c)).all(|c| cov.reaches(Player::Red, c)));
        let moves = generate(&b, Player::Blue, &cov);
        assert_eq!(moves.len(), CELLS - 7);
    }

    #[test]
    fn test_successors_are_independent_copies() {
        let b = board(&[(1, 1, Player::Red, 2), (5, 5, Player::Blue, 1)]);
        let succ = generate_successors(&b, Player::Red, &Coverage::of(&b));
        for (next, mv) in &succ {
            assert_eq!(*next, b.apply_external(*mv, Player::Red).unwrap());
        }
        assert_eq!(b.get(Cell::new(1, 1)).map(|t| t.power), Some(2));
    }

    #[test]
    fn test_deterministic_order() {
        let b = board(&[(1, 1, Player::Red, 2), (5, 5, Player::Blue, 3)]);
        let cov = Coverage::of(&b);
        assert_eq!(generate(&b, Player::Blue, &cov), generate(&b, Player::Blue, &cov));
    }
}
