//! Game state snapshots and move application.

use super::action::{Move, MoveError};
use super::rules;
use super::{Board, Player, Position, Square};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Outcome of the game so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Win(Player),
    /// Game ended in a draw.
    Draw,
}

impl GameResult {
    /// Classifies a board: winner first, then draw.
    pub fn of(board: &Board) -> Self {
        if let Some(winner) = rules::check_winner(board) {
            GameResult::Win(winner)
        } else if rules::is_full(board) {
            GameResult::Draw
        } else {
            GameResult::InProgress
        }
    }

    /// True once the game is won or drawn.
    pub fn is_over(&self) -> bool {
        !matches!(self, GameResult::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameResult::Win(player) => Some(*player),
            _ => None,
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::InProgress => write!(f, "In progress"),
            GameResult::Win(player) => write!(f, "{player} wins"),
            GameResult::Draw => write!(f, "Draw"),
        }
    }
}

/// Immutable snapshot of a game.
///
/// Every transition returns a new snapshot; the shell decides when to
/// re-render from it.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameState {
    /// The board.
    board: Board,
    /// Player to move next (the last mover once the game is over).
    to_move: Player,
    /// Result after the last move.
    result: GameResult,
    /// Moves applied so far.
    history: Vec<Move>,
}

impl GameState {
    /// Creates a new game: empty board, Cross to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Player::Cross,
            result: GameResult::InProgress,
            history: Vec::new(),
        }
    }

    /// Applies a move, or declines it.
    ///
    /// An illegal move returns an unchanged copy of this snapshot, with the
    /// prior result.
    #[instrument(skip(self), fields(to_move = ?self.to_move))]
    pub fn apply(&self, action: Move) -> GameState {
        match self.try_apply(action) {
            Ok(next) => next,
            Err(e) => {
                debug!(error = %e, %action, "Move declined");
                self.clone()
            }
        }
    }

    /// Applies a move, reporting why an illegal one was declined.
    #[instrument(skip(self), fields(to_move = ?self.to_move))]
    pub fn try_apply(&self, action: Move) -> Result<GameState, MoveError> {
        if self.result.is_over() {
            return Err(MoveError::GameOver);
        }
        if action.player != self.to_move {
            return Err(MoveError::WrongPlayer(action.player));
        }
        if !self.board.is_empty(action.position) {
            return Err(MoveError::SquareOccupied(action.position));
        }

        let mut next = self.clone();
        next.board.set(action.position, Square::Occupied(action.player));
        next.history.push(action);

        next.result = if rules::has_won(&next.board, action.player) {
            GameResult::Win(action.player)
        } else if rules::is_full(&next.board) {
            GameResult::Draw
        } else {
            next.to_move = action.player.opponent();
            GameResult::InProgress
        };

        if !next.board.marks_balanced() {
            warn!(board = %next.board, "Mark counts out of balance");
        }
        debug_assert!(next.board.marks_balanced(), "Board consistency violated");

        debug!(result = ?next.result, "Move applied");
        Ok(next)
    }

    /// Places the current player's mark at `position`.
    pub fn play(&self, position: Position) -> GameState {
        self.apply(Move::new(self.to_move, position))
    }

    /// Returns valid positions (empty if the game is over).
    pub fn valid_moves(&self) -> Vec<Position> {
        if self.result.is_over() {
            return Vec::new();
        }
        Position::valid_moves(&self.board)
    }

    /// Replays moves from the initial state, stopping at the first illegal one.
    #[instrument(skip(moves), fields(count = moves.len()))]
    pub fn replay(moves: &[Move]) -> Result<GameState, MoveError> {
        moves
            .iter()
            .try_fold(GameState::new(), |state, action| state.try_apply(*action))
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
