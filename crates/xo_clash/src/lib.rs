//! XO Clash terminal shell
//!
//! Drives a [`xo_clash_engine::GameSession`] from the terminal: reads
//! player input, paces the bot's replies and prints the board.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod orchestrator;
pub mod players;

pub use config::{ConfigError, ShellConfig};
pub use orchestrator::{GameEvent, Orchestrator};
pub use players::{BotPlayer, Input, InputSource, ScriptedHuman, StdinHuman};
