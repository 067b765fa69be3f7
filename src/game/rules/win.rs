//! Win detection logic for tic-tac-toe.

use crate::game::board::{Board, Cell, Mark};
use tracing::instrument;

/// Checks if there is a winner on the board.
///
/// Evaluates the 8 winning lines in a fixed order (rows, columns, diagonals)
/// and returns the mark occupying the first complete line. At most one mark
/// can complete a line because every move is validated before acceptance.
#[instrument]
pub fn check_winner(board: &Board) -> Option<Mark> {
    const LINES: [[usize; 3]; 8] = [
        // Rows
        [0, 1, 2],
        [3, 4, 5],
        [6, 7, 8],
        // Columns
        [0, 3, 6],
        [1, 4, 7],
        [2, 5, 8],
        // Diagonals
        [0, 4, 8],
        [2, 4, 6],
    ];

    for [a, b, c] in LINES {
        let cell = board.get(a);
        if cell != Some(Cell::Empty) && cell == board.get(b) && cell == board.get(c) {
            return match cell {
                Some(Cell::Occupied(mark)) => Some(mark),
                _ => None,
            };
        }
    }

    None
}
