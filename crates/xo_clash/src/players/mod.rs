//! Input sources and the bot seat.

mod bot;
mod human;
mod scripted;

pub use bot::BotPlayer;
pub use human::StdinHuman;
pub use scripted::ScriptedHuman;

use anyhow::Result;
use xo_clash_engine::Position;

/// One line of player intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Place a mark for whoever is to move.
    Place(Position),
    /// Ask for a suggestion.
    Hint,
    /// Start the next round, keeping scores.
    Reset,
    /// Start over with zeroed scores.
    NewMatch,
    /// Switch between bot and two-player mode.
    ToggleMode,
    /// Leave the game.
    Quit,
    /// Anything unrecognised.
    Unknown(String),
}

impl Input {
    /// Parses a typed command or a position.
    pub fn parse(line: &str) -> Self {
        match line.trim().to_lowercase().as_str() {
            "hint" | "h" => Input::Hint,
            "reset" | "r" => Input::Reset,
            "new" => Input::NewMatch,
            "mode" | "m" => Input::ToggleMode,
            "quit" | "q" | "exit" => Input::Quit,
            other => Position::parse_input(other)
                .map(Input::Place)
                .unwrap_or_else(|| Input::Unknown(line.trim().to_string())),
        }
    }
}

/// Anything that yields player input.
///
/// Implementations must be cancel-safe: the orchestrator drops a pending
/// `next_input` future whenever a bot move arrives first.
#[async_trait::async_trait]
pub trait InputSource: Send {
    /// Waits for the next input; `None` means the source is exhausted.
    async fn next_input(&mut self) -> Result<Option<Input>>;
}
