//! Toroidal hex board geometry with axial coordinates

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::InfexionError;

/// Board dimension (cells per axis)
pub const DIM: i8 = 7;

/// Number of cells on the board
pub const CELLS: usize = (DIM as usize) * (DIM as usize);

/// Axial cell coordinate `(r, q)`, each component in `0..DIM`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(i16, i16)", into = "(i16, i16)")]
pub struct Cell {
    pub r: i8,
    pub q: i8,
}

impl Cell {
    /// Create a cell, wrapping both components onto the torus
    pub const fn new(r: i8, q: i8) -> Self {
        Self {
            r: r.rem_euclid(DIM),
            q: q.rem_euclid(DIM),
        }
    }

    /// Row-major index into a flat board array
    pub fn index(self) -> usize {
        self.r as usize * DIM as usize + self.q as usize
    }

    /// Inverse of [`Cell::index`]
    pub fn from_index(index: usize) -> Self {
        debug_assert!(index < CELLS);
        Self {
            r: (index / DIM as usize) as i8,
            q: (index % DIM as usize) as i8,
        }
    }

    /// Neighbour one step away in `direction`, wrapping at the edges
    pub fn step(self, direction: Direction) -> Self {
        let (dr, dq) = direction.vector();
        Cell::new(self.r + dr, self.q + dq)
    }

    /// All cells in row-major order
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..CELLS).map(Cell::from_index)
    }
}

impl TryFrom<(i16, i16)> for Cell {
    type Error = InfexionError;

    fn try_from((r, q): (i16, i16)) -> Result<Self, Self::Error> {
        let range = 0..DIM as i16;
        if range.contains(&r) && range.contains(&q) {
            Ok(Cell::new(r as i8, q as i8))
        } else {
            Err(InfexionError::OutOfBounds { r, q })
        }
    }
}

impl From<Cell> for (i16, i16) {
    fn from(cell: Cell) -> Self {
        (cell.r as i16, cell.q as i16)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.r, self.q)
    }
}

/// The six unit directions of the hex grid, as `(dr, dq)`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    UpRight,
    DownRight,
    Down,
    DownLeft,
    UpLeft,
}

/// Direction order used everywhere moves are enumerated
pub const DIRECTIONS: [Direction; 6] = [
    Direction::Up,        // (1, -1)
    Direction::UpRight,   // (1, 0)
    Direction::DownRight, // (0, 1)
    Direction::Down,      // (-1, 1)
    Direction::DownLeft,  // (-1, 0)
    Direction::UpLeft,    // (0, -1)
];

impl Direction {
    /// Unit vector `(dr, dq)`
    pub const fn vector(self) -> (i8, i8) {
        match self {
            Direction::Up => (1, -1),
            Direction::UpRight => (1, 0),
            Direction::DownRight => (0, 1),
            Direction::Down => (-1, 1),
            Direction::DownLeft => (-1, 0),
            Direction::UpLeft => (0, -1),
        }
    }

    /// Look up a direction from its unit vector
    pub fn from_vector(dr: i8, dq: i8) -> Option<Self> {
        DIRECTIONS.into_iter().find(|d| d.vector() == (dr, dq))
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::UpRight => Direction::DownLeft,
            Direction::DownRight => Direction::UpLeft,
            Direction::Down => Direction::Up,
            Direction::DownLeft => Direction::UpRight,
            Direction::UpLeft => Direction::DownRight,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (dr, dq) = self.vector();
        write!(f, "[{}, {}]", dr, dq)
    }
}
