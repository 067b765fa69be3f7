//! Draw detection logic for tic-tac-toe.

use super::win::check_winner;
use crate::game::board::{Board, Cell};
use tracing::instrument;

/// Checks if the board is full (all cells occupied).
#[instrument]
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|c| *c != Cell::Empty)
}

/// Checks if the board is a draw: full with no winner.
#[instrument]
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && check_winner(board).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::Mark;

    fn board_from(marks: [Option<Mark>; 9]) -> Board {
        let mut board = Board::new();
        for (index, mark) in marks.into_iter().enumerate() {
            if let Some(mark) = mark {
                board = board.with_mark(index, mark).expect("legal move");
            }
        }
        board
    }

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_full(&Board::new()));
    }

    #[test]
    fn test_partial_board_not_full() {
        let board = board_from([None, None, None, None, Some(Mark::X), None, None, None, None]);
        assert!(!is_full(&board));
    }

    #[test]
    fn test_draw_detection() {
        // X O X / O X X / O X O - full, no line
        use Mark::{O, X};
        let board = board_from([
            Some(X),
            Some(O),
            Some(X),
            Some(O),
            Some(X),
            Some(X),
            Some(O),
            Some(X),
            Some(O),
        ]);
        assert!(is_draw(&board));
    }

    #[test]
    fn test_not_draw_if_winner() {
        use Mark::{O, X};
        let board = board_from([
            Some(X),
            Some(X),
            Some(X),
            Some(O),
            Some(O),
            None,
            None,
            None,
            None,
        ]);
        assert!(!is_draw(&board));
    }
}
