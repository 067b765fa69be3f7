//! Core board types for tic-tac-toe.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// A mark placed on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// The host's mark (host always moves first).
    X,
    /// The guest's mark.
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A single cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// No mark placed yet.
    Empty,
    /// Cell occupied by a mark.
    Occupied(Mark),
}

impl Cell {
    /// Wire label for this cell: `"X"`, `"O"`, or `""` when empty.
    pub fn label(self) -> &'static str {
        match self {
            Cell::Empty => "",
            Cell::Occupied(Mark::X) => "X",
            Cell::Occupied(Mark::O) => "O",
        }
    }
}

/// Rejected move against a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum InvalidMove {
    /// Cell index outside 0..=8.
    #[display("cell index out of range")]
    OutOfRange,
    /// Target cell already holds a mark.
    #[display("cell is already taken")]
    CellTaken,
}

/// 3x3 tic-tac-toe board.
///
/// Cells are stored in row-major order: row = index / 3, col = index % 3.
/// Boards are value types; [`Board::with_mark`] returns a new board rather
/// than mutating in place, so a published snapshot never changes under a
/// reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Gets the cell at the given index (0-8).
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Checks whether the cell at the given index is empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    /// Returns all cells as a slice.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Returns a copy of this board with `mark` placed at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMove::OutOfRange`] if `index` is outside 0..=8 and
    /// [`InvalidMove::CellTaken`] if the cell is already occupied.
    pub fn with_mark(&self, index: usize, mark: Mark) -> Result<Board, InvalidMove> {
        if index >= 9 {
            return Err(InvalidMove::OutOfRange);
        }
        if self.cells[index] != Cell::Empty {
            return Err(InvalidMove::CellTaken);
        }
        let mut next = *self;
        next.cells[index] = Cell::Occupied(mark);
        Ok(next)
    }

}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
