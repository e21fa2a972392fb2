//! XO Clash engine - tic-tac-toe rules and a bot opponent
//!
//! Pure game logic with no I/O. A shell (terminal, GUI, or a peer
//! transport) owns a [`GameSession`] and drives it one move at a time.
//!
//! # Architecture
//!
//! - **Rules**: win and draw detection over the 8 lines
//! - **Game**: immutable [`GameState`] snapshots; illegal moves are declined
//! - **Search**: exhaustive minimax with a depth-biased score
//! - **Strategy**: the [`AutomatedOpponent`], strategic 80% of the time
//! - **Session**: scores, opponent mode and cancellable deferred bot moves
//! - **Peer**: decodes remote moves and applies them on the remote turn
//!
//! # Example
//!
//! ```
//! use xo_clash_engine::{AutomatedOpponent, GameState, Player, Position};
//!
//! let state = GameState::new().play(Position::Center);
//! let mut bot = AutomatedOpponent::seeded(Player::Circle, 7);
//! let reply = bot.choose_move(state.board()).expect("board has room");
//! assert!(state.board().is_empty(reply));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod game;
mod peer;
mod position;
pub mod rules;
pub mod search;
mod session;
mod strategy;
mod types;

pub use action::{Move, MoveError};
pub use game::{GameResult, GameState};
pub use peer::{decode_move, encode_move, PeerError, PeerEvent, PeerId, PeerLink, PeerUpdate};
pub use position::Position;
pub use session::{
    GameSession, OpponentMode, PendingMove, PendingOutcome, Scoreboard, BOT_NAME,
    DEFAULT_PLAYER_NAME, SECOND_PLAYER_NAME,
};
pub use strategy::{
    blocking_move, positional_move, random_move, strategic_move, winning_move,
    AutomatedOpponent, MoveSource, STRATEGIC_MOVE_PROBABILITY,
};
pub use types::{Board, BoardParseError, Player, Square};
