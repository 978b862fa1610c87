//! Board state, tokens and moves
//!
//! The board is a flat array of 49 optional tokens. Search mutates a single
//! board in place and reverts each move with the [`Undo`] record returned by
//! [`BoardState::apply`], so sibling branches never see each other's changes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Cell, Direction, CELLS};
use crate::error::{InfexionError, Result};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Highest power a token can hold; one more and it is destroyed
pub const MAX_POWER: u8 = 6;

/// Cap on the sum of all token powers; spawning is illegal at the cap
pub const MAX_BOARD_POWER: u32 = 49;

/// Cells touched by one move: the spread walk plus the origin
const UNDO_CAPACITY: usize = MAX_POWER as usize + 1;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Player colour. Red is the maximising side of the score axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Red = 0,
    Blue = 1,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Red => Player::Blue,
            Player::Blue => Player::Red,
        }
    }

    /// Orientation of this player on the score axis
    pub fn sign(self) -> f32 {
        match self {
            Player::Red => 1.0,
            Player::Blue => -1.0,
        }
    }

    pub fn is_maximizing(self) -> bool {
        self == Player::Red
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Red => write!(f, "red"),
            Player::Blue => write!(f, "blue"),
        }
    }
}

/// A token on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub owner: Player,
    pub power: u8,
}

/// A move, as exchanged with the host
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Move {
    Spawn { cell: Cell },
    Spread { cell: Cell, direction: Direction },
}

impl Move {
    pub fn cell(&self) -> Cell {
        match *self {
            Move::Spawn { cell } | Move::Spread { cell, .. } => cell,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Spawn { cell } => write!(f, "SPAWN{}", cell),
            Move::Spread { cell, direction } => write!(f, "SPREAD{} {}", cell, direction),
        }
    }
}

/// Record of the cells a move changed, in the order they changed
#[derive(Clone, Copy, Debug)]
pub struct Undo {
    len: u8,
    entries: [(Cell, Option<Token>); UNDO_CAPACITY],
}

impl Undo {
    fn new() -> Self {
        Self {
            len: 0,
            entries: [(Cell::new(0, 0), None); UNDO_CAPACITY],
        }
    }

    fn record(&mut self, cell: Cell, previous: Option<Token>) {
        assert!((self.len as usize) < UNDO_CAPACITY, "undo record overflow");
        self.entries[self.len as usize] = (cell, previous);
        self.len += 1;
    }
}

// ============================================================================
// BOARD STATE
// ============================================================================

/// Occupied cells mapped to their tokens
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TokenEntry>", into = "Vec<TokenEntry>")]
pub struct BoardState {
    cells: [Option<Token>; CELLS],
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardState {
    /// Empty board
    pub fn new() -> Self {
        Self { cells: [None; CELLS] }
    }

    /// Build a board from `(cell, owner, power)` triples, checking every invariant
    pub fn from_tokens(tokens: &[(Cell, Player, u8)]) -> Result<Self> {
        let mut board = Self::new();
        for &(cell, owner, power) in tokens {
            if !(1..=MAX_POWER).contains(&power) {
                return Err(InfexionError::InvalidPower(power));
            }
            if board.get(cell).is_some() {
                return Err(InfexionError::DuplicateCell(cell));
            }
            board.cells[cell.index()] = Some(Token { owner, power });
        }
        let total = board.total_power();
        if total > MAX_BOARD_POWER {
            return Err(InfexionError::BoardOverPowered(total));
        }
        Ok(board)
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn get(&self, cell: Cell) -> Option<Token> {
        self.cells[cell.index()]
    }

    pub fn is_empty(&self, cell: Cell) -> bool {
        self.get(cell).is_none()
    }

    /// Occupied cells with their tokens, in row-major order
    pub fn tokens(&self) -> impl Iterator<Item = (Cell, Token)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|token| (Cell::from_index(i), token)))
    }

    /// Cells owned by `player`, in row-major order
    pub fn cells_of(&self, player: Player) -> impl Iterator<Item = Cell> + '_ {
        self.tokens()
            .filter(move |(_, token)| token.owner == player)
            .map(|(cell, _)| cell)
    }

    pub fn count(&self, player: Player) -> usize {
        self.cells_of(player).count()
    }

    /// Sum of every token's power
    pub fn total_power(&self) -> u32 {
        self.tokens().map(|(_, t)| t.power as u32).sum()
    }

    /// Sum of `player`'s token powers
    pub fn power_of(&self, player: Player) -> u32 {
        self.tokens()
            .filter(|(_, t)| t.owner == player)
            .map(|(_, t)| t.power as u32)
            .sum()
    }

    /// Whether spawning is still allowed by the board power cap
    pub fn can_spawn(&self) -> bool {
        self.total_power() < MAX_BOARD_POWER
    }

    // ========================================================================
    // MUTATIONS
    // ========================================================================

    /// Place a power-1 token of `player` on an empty cell
    pub fn spawn(&mut self, cell: Cell, player: Player) -> Undo {
        let previous = self.get(cell);
        assert!(previous.is_none(), "spawn on occupied cell {}", cell);
        let mut undo = Undo::new();
        undo.record(cell, previous);
        self.cells[cell.index()] = Some(Token { owner: player, power: 1 });
        undo
    }

    /// Consume the token at `origin`, adding one power to each of the next
    /// `power` cells along `direction`
    pub fn spread(&mut self, origin: Cell, direction: Direction) -> Undo {
        let token = match self.get(origin) {
            Some(token) => token,
            None => panic!("spread from empty cell {}", origin),
        };

        let mut undo = Undo::new();
        let mut pos = origin;
        for _ in 0..token.power {
            pos = pos.step(direction);
            undo.record(pos, self.get(pos));
            self.spread_to(pos, token.owner);
        }

        // The walk never reaches the origin while power < DIM, so this reads
        // the untouched token
        undo.record(origin, self.get(origin));
        self.cells[origin.index()] = None;
        undo
    }

    /// One step of a spread: claim an empty cell, or bump and recolour an
    /// occupied one, destroying it past [`MAX_POWER`]
    fn spread_to(&mut self, cell: Cell, owner: Player) {
        let slot = &mut self.cells[cell.index()];
        *slot = match *slot {
            None => Some(Token { owner, power: 1 }),
            Some(token) if token.power >= MAX_POWER => None,
            Some(token) => Some(Token {
                owner,
                power: token.power + 1,
            }),
        };
    }

    /// Apply an internally generated move for `player`
    pub fn apply(&mut self, mv: Move, player: Player) -> Undo {
        match mv {
            Move::Spawn { cell } => self.spawn(cell, player),
            Move::Spread { cell, direction } => {
                debug_assert_eq!(self.get(cell).map(|t| t.owner), Some(player));
                self.spread(cell, direction)
            }
        }
    }

    /// Revert the move that produced `undo`. Must be called in reverse order
    /// of the corresponding `apply` calls.
    pub fn undo(&mut self, undo: Undo) {
        for &(cell, previous) in undo.entries[..undo.len as usize].iter().rev() {
            self.cells[cell.index()] = previous;
        }
    }

    /// Validate and apply a move received from outside the engine, returning
    /// the resulting board
    pub fn apply_external(&self, mv: Move, player: Player) -> Result<BoardState> {
        match mv {
            Move::Spawn { cell } => {
                if self.get(cell).is_some() {
                    return Err(InfexionError::CellOccupied(cell));
                }
                if !self.can_spawn() {
                    return Err(InfexionError::PowerCap);
                }
            }
            Move::Spread { cell, .. } => match self.get(cell) {
                None => return Err(InfexionError::EmptyCell(cell)),
                Some(token) if token.owner != player => {
                    return Err(InfexionError::NotOwner {
                        cell,
                        owner: token.owner,
                        player,
                    });
                }
                Some(_) => {}
            },
        }

        let mut next = self.clone();
        next.apply(mv, player);
        Ok(next)
    }
}

// ============================================================================
// SERIALIZATION
// ============================================================================

/// One occupied cell in a board snapshot
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TokenEntry {
    pub cell: Cell,
    pub player: Player,
    pub power: u8,
}

impl TryFrom<Vec<TokenEntry>> for BoardState {
    type Error = InfexionError;

    fn try_from(entries: Vec<TokenEntry>) -> Result<Self> {
        let tokens: Vec<_> = entries
            .into_iter()
            .map(|e| (e.cell, e.player, e.power))
            .collect();
        BoardState::from_tokens(&tokens)
    }
}

impl From<BoardState> for Vec<TokenEntry> {
    fn from(board: BoardState) -> Self {
        board
            .tokens()
            .map(|(cell, token)| TokenEntry {
                cell,
                player: token.owner,
                power: token.power,
            })
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
