//! Command-line interface for xo_clash.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use xo_clash_engine::{OpponentMode, Player};

/// XO Clash - tic-tac-toe against a friend or the bot
#[derive(Parser, Debug)]
#[command(name = "xo_clash")]
#[command(about = "Tic-tac-toe with a minimax bot", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game in the terminal
    Play(PlayArgs),

    /// Print the bot's strategic move for a board
    Suggest {
        /// Nine cells in row-major order, e.g. "XX_/_O_/___"
        board: String,

        /// Side to move
        #[arg(short, long, default_value = "circle")]
        player: Player,
    },
}

/// Options for `play`; each overrides the config file.
#[derive(Args, Debug)]
pub struct PlayArgs {
    /// Path to config file
    #[arg(short, long, default_value = crate::config::DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Name for the Cross seat
    #[arg(long)]
    pub name: Option<String>,

    /// Opponent: bot or player
    #[arg(long)]
    pub opponent: Option<OpponentMode>,

    /// Bot delay in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Seed for the bot's random choices
    #[arg(long)]
    pub seed: Option<u64>,
}
