//! Depth-limited minimax with alpha-beta pruning
//!
//! Red maximises and Blue minimises on a single score axis, so one recursive
//! function handles both sides. Each node expands only the pruned successor
//! list from [`crate::select`], applying moves to one shared board and
//! undoing them on the way back up.

use crate::board::DIRECTIONS;
use crate::config::SearchConfig;
use crate::coverage::Coverage;
use crate::error::{InfexionError, Result};
use crate::eval::{evaluate_power, terminal_score, Evaluator, Heuristics, WIN_VALUE};
use crate::movegen;
use crate::select;
use crate::state::{BoardState, Move, Player};

// ============================================================================
// TYPES
// ============================================================================

/// Outcome of a root search
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchResult {
    pub best_move: Move,
    /// Score of `best_move` on the Red-positive axis
    pub score: f32,
    /// Nodes visited below the root
    pub nodes: u64,
    /// Alpha-beta cutoffs taken
    pub cutoffs: u64,
}

/// Alpha-Beta AI player
pub struct AlphaBetaAI<E = Heuristics> {
    pub depth: u32,
    pub breadth: usize,
    pub finish_immediate_wins: bool,
    pub evaluator: E,
    nodes: u64,
    cutoffs: u64,
}

impl AlphaBetaAI<Heuristics> {
    pub fn new(depth: u32, breadth: usize) -> Self {
        Self::with_evaluator(depth, breadth, Heuristics::default())
    }

    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        config.validate()?;
        let mut ai = Self::with_evaluator(config.depth, config.breadth, config.heuristics.clone());
        ai.finish_immediate_wins = config.finish_immediate_wins;
        Ok(ai)
    }
}

impl<E: Evaluator> AlphaBetaAI<E> {
    pub fn with_evaluator(depth: u32, breadth: usize, evaluator: E) -> Self {
        assert!(depth >= 1 && breadth >= 1, "depth and breadth must be positive");
        Self {
            depth,
            breadth,
            finish_immediate_wins: true,
            evaluator,
            nodes: 0,
            cutoffs: 0,
        }
    }

    /// Get best move for `to_move` on `board`
    pub fn choose_move(&mut self, board: &BoardState, to_move: Player) -> Result<Move> {
        self.search(board, to_move).map(|r| r.best_move)
    }

    /// Search the position and report the chosen move with its score
    pub fn search(&mut self, board: &BoardState, to_move: Player) -> Result<SearchResult> {
        self.nodes = 0;
        self.cutoffs = 0;
        let mut scratch = board.clone();

        if self.finish_immediate_wins {
            if let Some(mv) = find_eliminating_spread(&mut scratch, to_move) {
                tracing::debug!("{} finishes with {}", to_move, mv);
                return Ok(SearchResult {
                    best_move: mv,
                    score: to_move.sign() * WIN_VALUE,
                    nodes: 0,
                    cutoffs: 0,
                });
            }
        }

        let coverage = Coverage::of(&scratch);
        let moves = self.successors(&mut scratch, to_move, &coverage);
        if moves.is_empty() {
            return Err(InfexionError::NoLegalMoves(to_move));
        }

        let maximizing = to_move.is_maximizing();
        let mut alpha = f32::NEG_INFINITY;
        let mut beta = f32::INFINITY;
        let mut best: Option<(Move, f32)> = None;

        for mv in moves {
            let undo = scratch.apply(mv, to_move);
            let score = self.alpha_beta(&mut scratch, to_move.opponent(), alpha, beta, self.depth - 1);
            scratch.undo(undo);
            tracing::debug!("candidate {} scored {:.2}", mv, score);

            let improves = match best {
                None => true,
                Some((_, s)) if maximizing => score > s,
                Some((_, s)) => score < s,
            };
            if improves {
                best = Some((mv, score));
            }
            if maximizing {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }
        }

        let (best_move, score) = best.ok_or(InfexionError::NoLegalMoves(to_move))?;
        tracing::debug!(
            "{} plays {} (score {:.2}, {} nodes, {} cutoffs)",
            to_move,
            best_move,
            score,
            self.nodes,
            self.cutoffs
        );

        Ok(SearchResult {
            best_move,
            score,
            nodes: self.nodes,
            cutoffs: self.cutoffs,
        })
    }

    /// Value of `board` with `to_move` to play, searched `depth` plies deep
    /// with a full window
    pub fn minimax(&mut self, board: &BoardState, to_move: Player, depth: u32) -> f32 {
        let mut scratch = board.clone();
        self.alpha_beta(&mut scratch, to_move, f32::NEG_INFINITY, f32::INFINITY, depth)
    }

    /// Static value of a node where search stops: the mover's attack/defence
    /// score folded onto the Red-positive axis
    fn horizon(&self, board: &BoardState, to_move: Player) -> f32 {
        to_move.sign() * self.evaluator.attack_defense(board, to_move).score
    }

    /// Generate, score and prune the successors of a node
    fn successors(&self, board: &mut BoardState, to_move: Player, coverage: &Coverage) -> Vec<Move> {
        let moves = movegen::generate(board, to_move, coverage);
        let candidates = select::score_candidates(board, to_move, &moves, &self.evaluator);
        select::select(candidates, to_move, self.breadth)
    }

    fn alpha_beta(
        &mut self,
        board: &mut BoardState,
        to_move: Player,
        mut alpha: f32,
        mut beta: f32,
        depth: u32,
    ) -> f32 {
        self.nodes += 1;

        // Elimination outranks everything, at any depth
        if let Some(score) = terminal_score(board) {
            return score;
        }

        let coverage = Coverage::of(board);
        if coverage.is_peaceful(board) {
            return evaluate_power(board) as f32;
        }

        if depth == 0 {
            return self.horizon(board, to_move);
        }

        let moves = self.successors(board, to_move, &coverage);
        if moves.is_empty() {
            return self.horizon(board, to_move);
        }

        let maximizing = to_move.is_maximizing();
        let mut best = if maximizing {
            f32::NEG_INFINITY
        } else {
            f32::INFINITY
        };

        for mv in moves {
            let undo = board.apply(mv, to_move);
            let score = self.alpha_beta(board, to_move.opponent(), alpha, beta, depth - 1);
            board.undo(undo);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }

            if alpha >= beta {
                self.cutoffs += 1;
                break;
            }
        }

        best
    }
}

/// First spread (in generation order) that leaves the opponent with no tokens
/// while `player` keeps at least one
pub fn find_eliminating_spread(board: &mut BoardState, player: Player) -> Option<Move> {
    let opponent = player.opponent();
    if board.count(opponent) == 0 {
        return None;
    }

    let cells: Vec<_> = board.cells_of(player).collect();
    for cell in cells {
        for direction in DIRECTIONS {
            let mv = Move::Spread { cell, direction };
            let undo = board.apply(mv, player);
            let wins = board.count(opponent) == 0 && board.count(player) > 0;
            board.undo(undo);
            if wins {
                return Some(mv);
            }
        }
    }
    None
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, Direction};

    fn board(tokens: &[(i8, i8, Player, u8)]) -> BoardState {
        let tokens: Vec<_> = tokens
            .iter()
            .map(|&(r, q, p, k)| (Cell::new(r, q), p, k))
            .collect();
        BoardState::from_tokens(&tokens).unwrap()
    }

    #[test]
    fn test_empty_board_spawns() {
        let mut ai = AlphaBetaAI::new(3, 1);
        let mv = ai.choose_move(&BoardState::new(), Player::Red).unwrap();
        assert!(matches!(mv, Move::Spawn { .. }));
    }

    #[test]
    fn test_terminal_precedence_at_any_depth() {
        let red_only = board(&[(0, 0, Player::Red, 2), (4, 4, Player::Red, 1)]);
        let blue_only = board(&[(2, 2, Player::Blue, 1)]);
        let mut ai = AlphaBetaAI::new(4, 6);
        for depth in 0..4 {
            for to_move in [Player::Red, Player::Blue] {
                assert_eq!(ai.minimax(&red_only, to_move, depth), WIN_VALUE);
                assert_eq!(ai.minimax(&blue_only, to_move, depth), -WIN_VALUE);
            }
        }
    }

    #[test]
    fn test_peaceful_returns_power_difference() {
        let peaceful = board(&[(0, 0, Player::Red, 1), (3, 5, Player::Blue, 1)]);
        let mut ai = AlphaBetaAI::new(4, 6);
        assert_eq!(ai.minimax(&peaceful, Player::Red, 3), 0.0);

        let peaceful = board(&[(0, 0, Player::Red, 2), (3, 4, Player::Blue, 1)]);
        assert!(crate::coverage::is_peaceful(&peaceful));
        assert_eq!(ai.minimax(&peaceful, Player::Blue, 3), 1.0);
    }

    #[test]
    fn test_horizon_uses_heuristic() {
        let b = board(&[(0, 0, Player::Red, 2), (0, 1, Player::Blue, 1)]);
        let h = Heuristics::default();
        let mut ai = AlphaBetaAI::new(4, 6);
        assert_eq!(
            ai.minimax(&b, Player::Red, 0),
            h.attack_defense(&b, Player::Red).score
        );
        assert_eq!(
            ai.minimax(&b, Player::Blue, 0),
            -h.attack_defense(&b, Player::Blue).score
        );
    }

    #[test]
    fn test_finds_capture_of_last_token() {
        // Red power 2 at (3, 3); blue's only token sits two cells right
        let b = board(&[(3, 3, Player::Red, 2), (3, 5, Player::Blue, 3)]);
        let mut ai = AlphaBetaAI::new(2, 6);
        let result = ai.search(&b, Player::Red).unwrap();
        assert_eq!(
            result.best_move,
            Move::Spread { cell: Cell::new(3, 3), direction: Direction::DownRight }
        );
        assert_eq!(result.score, WIN_VALUE);
    }

    #[test]
    fn test_search_finds_win_without_finisher() {
        let b = board(&[(3, 3, Player::Blue, 2), (3, 5, Player::Red, 3)]);
        let mut ai = AlphaBetaAI::new(2, 6);
        ai.finish_immediate_wins = false;
        let result = ai.search(&b, Player::Blue).unwrap();
        assert_eq!(
            result.best_move,
            Move::Spread { cell: Cell::new(3, 3), direction: Direction::DownRight }
        );
        assert_eq!(result.score, -WIN_VALUE);
        assert!(result.nodes > 0);
    }

    #[test]
    fn test_deterministic_choice() {
        let b = board(&[
            (0, 0, Player::Red, 2),
            (1, 3, Player::Red, 1),
            (4, 4, Player::Blue, 2),
            (5, 1, Player::Blue, 1),
        ]);
        let mut first = AlphaBetaAI::new(3, 5);
        let mut second = AlphaBetaAI::new(3, 5);
        for to_move in [Player::Red, Player::Blue] {
            assert_eq!(
                first.choose_move(&b, to_move).unwrap(),
                second.choose_move(&b, to_move).unwrap()
            );
            assert_eq!(
                first.choose_move(&b, to_move).unwrap(),
                first.choose_move(&b, to_move).unwrap()
            );
        }
    }

    #[test]
    fn test_search_does_not_mutate_input() {
        let b = board(&[(2, 2, Player::Red, 3), (2, 4, Player::Blue, 2)]);
        let snapshot = b.clone();
        let mut ai = AlphaBetaAI::new(3, 4);
        ai.choose_move(&b, Player::Blue).unwrap();
        assert_eq!(b, snapshot);
    }

    #[test]
    fn test_no_legal_moves_at_root() {
        // Blue holds the whole power budget; red has nothing to spread and cannot spawn
        let mut tokens = Vec::new();
        for r in 0..7 {
            tokens.push((r, 0, Player::Blue, 6));
        }
        tokens.push((0, 3, Player::Blue, 6));
        tokens.push((3, 3, Player::Blue, 1));
        let b = board(&tokens);
        let mut ai = AlphaBetaAI::new(2, 6);
        assert!(matches!(
            ai.choose_move(&b, Player::Red),
            Err(InfexionError::NoLegalMoves(Player::Red))
        ));
    }

    #[test]
    fn test_eliminating_spread_requires_survivor() {
        // Overloading blue's last token also consumes red's only token
        let mut b = board(&[(0, 0, Player::Red, 1), (0, 1, Player::Blue, 6)]);
        assert_eq!(find_eliminating_spread(&mut b, Player::Red), None);

        let mut b = board(&[
            (0, 0, Player::Red, 1),
            (5, 5, Player::Red, 1),
            (0, 1, Player::Blue, 6),
        ]);
        assert_eq!(
            find_eliminating_spread(&mut b, Player::Red),
            Some(Move::Spread { cell: Cell::new(0, 0), direction: Direction::DownRight })
        );
    }

    #[test]
    fn test_custom_evaluator() {
        struct MaterialOnly;
        impl Evaluator for MaterialOnly {
            fn attack_defense(&self, board: &BoardState, player: Player) -> crate::eval::AttackDefense {
                let material =
                    board.power_of(player) as i32 - board.power_of(player.opponent()) as i32;
                crate::eval::AttackDefense {
                    score: material as f32,
                    material,
                    ..Default::default()
                }
            }
        }

        let b = board(&[(2, 2, Player::Red, 2), (2, 3, Player::Blue, 1), (5, 5, Player::Blue, 1)]);
        let mut ai = AlphaBetaAI::with_evaluator(2, 4, MaterialOnly);
        assert!(ai.choose_move(&b, Player::Red).is_ok());
    }
}
