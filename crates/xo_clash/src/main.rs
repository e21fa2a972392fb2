//! XO Clash - terminal tic-tac-toe
//!
//! Play against a friend or the minimax bot.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use xo_clash::cli::{Cli, Command, PlayArgs};
use xo_clash::{BotPlayer, GameEvent, Orchestrator, ShellConfig, StdinHuman};
use xo_clash_engine::{
    AutomatedOpponent, Board, GameResult, GameSession, Player, positional_move, strategic_move,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    match cli.command {
        Command::Play(args) => run_play(args).await,
        Command::Suggest { board, player } => run_suggest(&board, player),
    }
}

/// Logs go to stderr so the board owns stdout.
fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Run an interactive game
#[instrument(skip_all, fields(config_path = %args.config.display()))]
async fn run_play(args: PlayArgs) -> Result<()> {
    let config = ShellConfig::load(&args.config)?.with_overrides(
        args.name,
        args.opponent,
        args.delay_ms,
        args.seed,
    );

    let seed = (*config.seed()).unwrap_or_else(rand::random);
    info!(seed, opponent = ?config.opponent(), "Starting game");

    let session = GameSession::new(config.player_name().clone(), *config.opponent());
    let bot = BotPlayer::new(
        AutomatedOpponent::seeded(Player::Circle, seed),
        config.bot_delay(),
    );

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<GameEvent>();
    let renderer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            println!("{event}");
        }
    });

    println!("XO Clash - type 1-9 or 'row col' to play, 'quit' to leave");
    let mut orchestrator = Orchestrator::new(session, bot, event_tx);
    let mut human = StdinHuman::new();
    orchestrator.run(&mut human).await?;

    drop(orchestrator);
    renderer.await.context("Renderer task failed")?;
    Ok(())
}

/// Print the strategic move for a board
#[instrument]
fn run_suggest(board: &str, player: Player) -> Result<()> {
    let board: Board = board
        .parse()
        .with_context(|| format!("Invalid board {board:?}"))?;

    println!("{}\n", board.display());
    let result = GameResult::of(&board);
    if result.is_over() {
        println!("Game over: {result}");
        return Ok(());
    }

    match strategic_move(&board, player) {
        Some(pos) => println!("Bot ({player}) plays {pos}"),
        None => println!("No move available"),
    }
    if let Some(pos) = positional_move(&board) {
        println!("Positional preference: {pos}");
    }
    Ok(())
}
