//! Error types

use crate::board::Cell;
use crate::game::GameResult;
use crate::state::Player;

#[derive(Debug, thiserror::Error)]
pub enum InfexionError {
    #[error("Cell {0} is already occupied")]
    CellOccupied(Cell),

    #[error("Cell {0} is empty")]
    EmptyCell(Cell),

    #[error("Token at {cell} belongs to {owner}, not {player}")]
    NotOwner {
        cell: Cell,
        owner: Player,
        player: Player,
    },

    #[error("Board power is at the spawn cap")]
    PowerCap,

    #[error("Coordinate ({r}, {q}) is off the board")]
    OutOfBounds { r: i16, q: i16 },

    #[error("Token power {0} is outside 1..=6")]
    InvalidPower(u8),

    #[error("Cell {0} is listed more than once")]
    DuplicateCell(Cell),

    #[error("Total board power {0} exceeds the cap")]
    BoardOverPowered(u32),

    #[error("No legal moves for {0}")]
    NoLegalMoves(Player),

    #[error("Game is already over: {0:?}")]
    GameOver(GameResult),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, InfexionError>;
