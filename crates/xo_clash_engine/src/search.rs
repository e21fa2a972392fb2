//! Exhaustive minimax over tic-tac-toe positions.
//!
//! Scores are from the automated player's point of view. `depth` starts at
//! [`ROOT_DEPTH`] for the children of the root and grows by one per ply, so
//! a win scores `10 - depth` and a loss `depth - 10`: faster wins and slower
//! losses score slightly better. The search never prunes; the 3x3 state
//! space is small enough to expand fully.

use crate::rules::{has_won, is_full};
use crate::{Board, Player, Position, Square};
use tracing::{instrument, trace};

/// Depth passed to the first recursive call, after the candidate mark.
pub const ROOT_DEPTH: i32 = -3;

/// Base score of a win before the depth adjustment.
const WIN_SCORE: i32 = 10;

/// Scores `board` with `me` as the maximizing side.
///
/// `maximizing` says whose turn it is on `board`: `me` when true, the
/// opponent otherwise. The board is mutated during the search and restored
/// before returning.
pub fn minimax(board: &mut Board, depth: i32, maximizing: bool, me: Player) -> i32 {
    if has_won(board, me) {
        return WIN_SCORE - depth;
    }
    if has_won(board, me.opponent()) {
        return depth - WIN_SCORE;
    }
    if is_full(board) {
        return 0;
    }

    let mover = if maximizing { me } else { me.opponent() };
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for pos in Position::ALL {
        if !board.is_empty(pos) {
            continue;
        }
        board.set(pos, Square::Occupied(mover));
        let score = minimax(board, depth + 1, !maximizing, me);
        board.set(pos, Square::Empty);

        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }

    best
}

/// Minimax score of placing `me` at `pos`, with the opponent replying.
///
/// Works on a copy; `board` is left untouched.
pub fn score_move(board: &Board, pos: Position, me: Player) -> i32 {
    let mut scratch = *board;
    scratch.set(pos, Square::Occupied(me));
    minimax(&mut scratch, ROOT_DEPTH, false, me)
}

/// Picks the empty cell with the highest minimax score.
///
/// Ties go to the first cell in row-major order. Returns `None` when the
/// board has no empty cell.
#[instrument(skip(board), fields(board = %board))]
pub fn best_move(board: &Board, me: Player) -> Option<Position> {
    let mut best: Option<(Position, i32)> = None;

    for pos in board.empty_positions() {
        let score = score_move(board, pos, me);
        trace!(position = %pos, score, "Scored candidate");
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((pos, score));
        }
    }

    best.map(|(pos, _)| pos)
}
