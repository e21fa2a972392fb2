//! Move selection for the automated opponent.
//!
//! The opponent rolls once per move. Below [`STRATEGIC_MOVE_PROBABILITY`]
//! it plays strategically: win now, else block, else the best minimax
//! move. Otherwise, or if the strategic path finds nothing, it picks a
//! uniformly random empty cell.

use crate::rules::has_won;
use crate::search;
use crate::{Board, Player, Position, Square};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, instrument};

/// Chance that the opponent takes the strategic path on a given move.
pub const STRATEGIC_MOVE_PROBABILITY: f64 = 0.8;

/// First empty cell (row-major) where `player` would complete a line.
pub fn winning_move(board: &Board, player: Player) -> Option<Position> {
    board.empty_positions().find(|pos| {
        let mut scratch = *board;
        scratch.set(*pos, Square::Occupied(player));
        has_won(&scratch, player)
    })
}

/// First empty cell (row-major) where the opponent of `player` would
/// complete a line.
pub fn blocking_move(board: &Board, player: Player) -> Option<Position> {
    winning_move(board, player.opponent())
}

/// The deterministic part of the strategy: win, block, then lookahead.
#[instrument(skip(board), fields(board = %board))]
pub fn strategic_move(board: &Board, me: Player) -> Option<Position> {
    if let Some(pos) = winning_move(board, me) {
        debug!(position = %pos, "Taking the win");
        return Some(pos);
    }
    if let Some(pos) = blocking_move(board, me) {
        debug!(position = %pos, "Blocking the opponent");
        return Some(pos);
    }
    let pos = search::best_move(board, me);
    debug!(position = ?pos, "Lookahead move");
    pos
}

/// Uniformly random empty cell, or `None` on a full board.
pub fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Position> {
    let available = Position::valid_moves(board);
    available.choose(rng).copied()
}

/// Center, then corners, then edges.
///
/// A fixed positional preference with no lookahead. It does not feed into
/// [`AutomatedOpponent::choose_move`]; shells use it for hints.
pub fn positional_move(board: &Board) -> Option<Position> {
    const PREFERENCE: [Position; 9] = [
        Position::Center,
        Position::TopLeft,
        Position::TopRight,
        Position::BottomLeft,
        Position::BottomRight,
        Position::TopCenter,
        Position::MiddleLeft,
        Position::MiddleRight,
        Position::BottomCenter,
    ];
    PREFERENCE.into_iter().find(|pos| board.is_empty(*pos))
}

/// Which branch produced the opponent's move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveSource {
    /// Win, block or lookahead.
    #[display("strategic")]
    Strategic,
    /// Uniform choice among empty cells.
    #[display("random")]
    Random,
}

/// The bot: a symbol plus a source of randomness.
#[derive(Debug, Clone)]
pub struct AutomatedOpponent<R = StdRng> {
    player: Player,
    rng: R,
}

impl AutomatedOpponent<StdRng> {
    /// Opponent seeded from the operating system.
    #[instrument]
    pub fn new(player: Player) -> Self {
        Self::with_rng(player, StdRng::from_os_rng())
    }
}

impl AutomatedOpponent<ChaCha8Rng> {
    /// Reproducible opponent for a fixed seed.
    #[instrument]
    pub fn seeded(player: Player, seed: u64) -> Self {
        Self::with_rng(player, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> AutomatedOpponent<R> {
    /// Opponent drawing from the given generator.
    pub fn with_rng(player: Player, rng: R) -> Self {
        Self { player, rng }
    }

    /// The symbol this opponent plays.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Chooses a move for a non-terminal board.
    ///
    /// Returns `None` only when the board has no empty cell.
    pub fn choose_move(&mut self, board: &Board) -> Option<Position> {
        self.choose_move_with_source(board).map(|(pos, _)| pos)
    }

    /// Like [`choose_move`](Self::choose_move), also reporting the branch taken.
    #[instrument(skip(self, board), fields(player = %self.player, board = %board))]
    pub fn choose_move_with_source(&mut self, board: &Board) -> Option<(Position, MoveSource)> {
        let roll: f64 = self.rng.random();
        if roll < STRATEGIC_MOVE_PROBABILITY
            && let Some(pos) = strategic_move(board, self.player)
        {
            return Some((pos, MoveSource::Strategic));
        }

        debug!(roll, "Falling back to a random move");
        random_move(board, &mut self.rng).map(|pos| (pos, MoveSource::Random))
    }
}
