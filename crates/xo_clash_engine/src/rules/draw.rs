//! Draw detection logic for tic-tac-toe.

use super::win::check_winner;
use crate::{Board, Square};

/// Checks if the board is full (all squares occupied).
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}

/// A full board with no winner.
///
/// The winner check runs first because the winning move can fill the board.
pub fn is_draw(board: &Board) -> bool {
    check_winner(board).is_none() && is_full(board)
}
