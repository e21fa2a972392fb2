//! Moves and the reasons they get declined.
//!
//! A move is plain data: local input, the bot and a remote peer all
//! produce the same value and hand it to the game to check.

use super::{Player, Position};
use serde::{Deserialize, Serialize};

/// One mark placed by one player. Also the peer wire payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Who places the mark.
    pub player: Player,
    /// Where it goes.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(player: Player, position: Position) -> Self {
        Self { player, position }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.player, self.position)
    }
}

/// Reason a move was declined. The game is left as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// Target square is taken.
    #[display("{} is already taken", _0)]
    SquareOccupied(#[error(not(source))] Position),

    /// Someone already won, or the board is full.
    #[display("The game is over")]
    GameOver,

    /// Mover is not the player whose turn it is.
    #[display("It is not {}'s turn", _0)]
    WrongPlayer(#[error(not(source))] Player),
}
