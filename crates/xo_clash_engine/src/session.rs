//! Match bookkeeping: opponent mode, scores and deferred bot moves.

use crate::game::{GameResult, GameState};
use crate::{Move, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Display name of the second seat in two-player mode.
pub const SECOND_PLAYER_NAME: &str = "Joueur 2";

/// Display name of the automated opponent.
pub const BOT_NAME: &str = "Bot";

/// Default name for the first seat.
pub const DEFAULT_PLAYER_NAME: &str = "Joueur 1";

/// Who sits in the Circle seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpponentMode {
    /// Two humans share the board.
    #[serde(alias = "player")]
    TwoPlayer,
    /// The automated opponent plays Circle.
    #[default]
    Bot,
}

impl OpponentMode {
    /// Toggles between `TwoPlayer` and `Bot`.
    pub fn toggle(self) -> Self {
        match self {
            Self::TwoPlayer => Self::Bot,
            Self::Bot => Self::TwoPlayer,
        }
    }
}

impl std::str::FromStr for OpponentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bot" => Ok(Self::Bot),
            "player" | "two-player" | "twoplayer" => Ok(Self::TwoPlayer),
            other => Err(format!("unknown opponent mode {other:?} (expected bot or player)")),
        }
    }
}

/// A bot move waiting out its presentation delay.
///
/// Tagged with the round it was computed for, so a reset in the meantime
/// makes it stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingMove {
    round: u64,
    action: Move,
}

impl PendingMove {
    /// The move to apply.
    pub fn action(&self) -> Move {
        self.action
    }

    /// Round the move belongs to.
    pub fn round(&self) -> u64 {
        self.round
    }
}

/// What happened to a pending move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingOutcome {
    /// Applied to the current game.
    Applied,
    /// The game was reset since; the move was dropped.
    Stale,
    /// Same round, but the game declined the move.
    Declined,
}

/// In-memory score counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Games won by Cross.
    pub cross_wins: u32,
    /// Games won by Circle.
    pub circle_wins: u32,
    /// Games finished, draws included.
    pub games_played: u32,
}

impl Scoreboard {
    /// Counts one finished game.
    pub fn record(&mut self, result: GameResult) {
        match result {
            GameResult::InProgress => return,
            GameResult::Win(Player::Cross) => self.cross_wins += 1,
            GameResult::Win(Player::Circle) => self.circle_wins += 1,
            GameResult::Draw => {}
        }
        self.games_played += 1;
    }

    /// Wins for `player`.
    pub fn wins(&self, player: Player) -> u32 {
        match player {
            Player::Cross => self.cross_wins,
            Player::Circle => self.circle_wins,
        }
    }
}

/// A sequence of games between the same two seats.
///
/// The single owner of the current [`GameState`]. All moves, local, bot or
/// remote, go through [`play`](Self::play) or
/// [`apply_pending`](Self::apply_pending).
#[derive(Debug, Clone)]
pub struct GameSession {
    player_name: String,
    mode: OpponentMode,
    state: GameState,
    scores: Scoreboard,
    round: u64,
}

impl GameSession {
    /// Creates a session with an empty board and zeroed scores.
    #[instrument(skip(player_name))]
    pub fn new(player_name: impl Into<String>, mode: OpponentMode) -> Self {
        let player_name = player_name.into();
        info!(player_name = %player_name, ?mode, "Creating game session");
        Self {
            player_name,
            mode,
            state: GameState::new(),
            scores: Scoreboard::default(),
            round: 0,
        }
    }

    /// Current game snapshot.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Score counters.
    pub fn scores(&self) -> &Scoreboard {
        &self.scores
    }

    /// Opponent mode.
    pub fn mode(&self) -> OpponentMode {
        self.mode
    }

    /// Round counter, bumped by every reset.
    pub fn round(&self) -> u64 {
        self.round
    }

    /// Name of the first seat.
    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// Renames the first seat.
    pub fn set_player_name(&mut self, name: impl Into<String>) {
        self.player_name = name.into();
    }

    /// Display name for the seat playing `player`.
    pub fn name_of(&self, player: Player) -> &str {
        match (player, self.mode) {
            (Player::Cross, _) => &self.player_name,
            (Player::Circle, OpponentMode::TwoPlayer) => SECOND_PLAYER_NAME,
            (Player::Circle, OpponentMode::Bot) => BOT_NAME,
        }
    }

    /// The symbol the bot plays, if the bot is seated.
    pub fn bot_player(&self) -> Option<Player> {
        match self.mode {
            OpponentMode::Bot => Some(Player::Circle),
            OpponentMode::TwoPlayer => None,
        }
    }

    /// True when the game is live and the bot is to move.
    pub fn bot_to_move(&self) -> bool {
        !self.state.result().is_over() && self.bot_player() == Some(*self.state.to_move())
    }

    /// Plays `position` for whoever is to move.
    ///
    /// Returns the result after the attempt; an illegal move leaves the
    /// game unchanged.
    #[instrument(skip(self), fields(round = self.round))]
    pub fn play(&mut self, position: Position) -> GameResult {
        let action = Move::new(*self.state.to_move(), position);
        self.apply(action)
    }

    /// Applies an explicit move, counting the game if it just ended.
    #[instrument(skip(self), fields(round = self.round))]
    pub fn apply(&mut self, action: Move) -> GameResult {
        let next = self.state.apply(action);
        if next == self.state {
            return *self.state.result();
        }

        let result = *next.result();
        self.state = next;
        if result.is_over() {
            self.scores.record(result);
            info!(%result, games_played = self.scores.games_played, "Game finished");
        }
        result
    }

    /// Wraps a bot move for delayed delivery in this round.
    pub fn defer(&self, position: Position) -> Option<PendingMove> {
        let player = self.bot_player()?;
        Some(PendingMove {
            round: self.round,
            action: Move::new(player, position),
        })
    }

    /// Applies a deferred move unless the game was reset since.
    #[instrument(skip(self), fields(round = self.round))]
    pub fn apply_pending(&mut self, pending: PendingMove) -> PendingOutcome {
        if pending.round != self.round {
            debug!(pending_round = pending.round, "Discarding stale bot move");
            return PendingOutcome::Stale;
        }
        let before = self.state.history().len();
        self.apply(pending.action);
        if self.state.history().len() > before {
            PendingOutcome::Applied
        } else {
            PendingOutcome::Declined
        }
    }

    /// New board for the next game; scores are kept.
    #[instrument(skip(self))]
    pub fn reset_round(&mut self) {
        self.state = GameState::new();
        self.round += 1;
        debug!(round = self.round, "Round reset");
    }

    /// New board and zeroed scores.
    #[instrument(skip(self))]
    pub fn end_game(&mut self) {
        self.reset_round();
        self.scores = Scoreboard::default();
        info!("Scores cleared");
    }

    /// Switches opponent mode, which also clears the board and scores.
    #[instrument(skip(self))]
    pub fn set_mode(&mut self, mode: OpponentMode) {
        self.mode = mode;
        self.end_game();
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYER_NAME, OpponentMode::default())
    }
}
