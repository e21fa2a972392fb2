//! Game rules for tic-tac-toe.
//!
//! Pure functions evaluating a board. Rules are separated from board
//! storage so the search can call them on scratch boards.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{check_winner, has_won, LINES};
