//! Tests for the game loop, driven by scripted input on a paused clock.

use tokio::sync::mpsc;
use tokio::time::Duration;
use xo_clash::{BotPlayer, GameEvent, Input, Orchestrator, ScriptedHuman};
use xo_clash_engine::{AutomatedOpponent, GameSession, OpponentMode, Player, Position};

const BOT_DELAY: Duration = Duration::from_millis(500);

fn orchestrator(
    mode: OpponentMode,
) -> (
    Orchestrator<impl rand::Rng>,
    mpsc::UnboundedReceiver<GameEvent>,
) {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let session = GameSession::new("Alice", mode);
    let bot = BotPlayer::new(AutomatedOpponent::seeded(Player::Circle, 5), BOT_DELAY);
    (Orchestrator::new(session, bot, event_tx), event_rx)
}

fn drain(rx: &mut mpsc::UnboundedReceiver<GameEvent>) -> Vec<GameEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn at(ms: u64, input: Input) -> (Duration, Input) {
    (Duration::from_millis(ms), input)
}

#[tokio::test(start_paused = true)]
async fn test_bot_replies_after_delay() {
    let (mut game, mut rx) = orchestrator(OpponentMode::Bot);
    let mut human = ScriptedHuman::new([
        at(0, Input::Place(Position::Center)),
        at(1_000, Input::Quit),
    ]);

    game.run(&mut human).await.unwrap();

    let history = game.session().state().history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].player, Player::Circle);
    assert_ne!(history[1].position, Position::Center);

    let events = drain(&mut rx);
    assert!(events.contains(&GameEvent::BotThinking));
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::MoveMade { player, .. } if player == "Bot"
    )));
}

#[tokio::test(start_paused = true)]
async fn test_reset_discards_pending_bot_move() {
    let (mut game, mut rx) = orchestrator(OpponentMode::Bot);
    let mut human = ScriptedHuman::new([
        at(0, Input::Place(Position::Center)),
        at(100, Input::Reset),
        at(2_000, Input::Quit),
    ]);

    game.run(&mut human).await.unwrap();

    assert!(game.session().state().history().is_empty());
    assert_eq!(game.session().round(), 1);
    let events = drain(&mut rx);
    assert!(!events.iter().any(|e| matches!(
        e,
        GameEvent::MoveMade { player, .. } if player == "Bot"
    )));
}

#[tokio::test(start_paused = true)]
async fn test_human_input_refused_while_bot_is_thinking() {
    let (mut game, mut rx) = orchestrator(OpponentMode::Bot);
    let mut human = ScriptedHuman::new([
        at(0, Input::Place(Position::Center)),
        at(100, Input::Place(Position::BottomRight)),
        at(1_000, Input::Quit),
    ]);

    game.run(&mut human).await.unwrap();

    let history = game.session().state().history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].player, Player::Circle);
    let events = drain(&mut rx);
    assert!(events.contains(&GameEvent::Notice("Wait for the bot to move".to_string())));
}

#[tokio::test(start_paused = true)]
async fn test_two_player_game_scores_and_starts_next_round() {
    let (mut game, mut rx) = orchestrator(OpponentMode::TwoPlayer);
    let moves = [
        Position::TopLeft,
        Position::Center,
        Position::TopCenter,
        Position::BottomLeft,
        Position::TopRight,
    ];
    let script = moves
        .into_iter()
        .enumerate()
        .map(|(i, pos)| at(i as u64 * 10, Input::Place(pos)))
        .chain([at(1_000, Input::Quit)]);
    let mut human = ScriptedHuman::new(script.collect::<Vec<_>>());

    game.run(&mut human).await.unwrap();

    assert_eq!(game.session().scores().cross_wins, 1);
    assert_eq!(game.session().scores().games_played, 1);
    assert!(game.session().state().history().is_empty());

    let events = drain(&mut rx);
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::GameOver { winner: Some(name), .. } if name == "Alice"
    )));
    assert!(!events.contains(&GameEvent::BotThinking));
}

#[tokio::test(start_paused = true)]
async fn test_occupied_square_and_unknown_input_are_reported() {
    let (mut game, mut rx) = orchestrator(OpponentMode::TwoPlayer);
    let mut human = ScriptedHuman::new([
        at(0, Input::Place(Position::Center)),
        at(10, Input::Place(Position::Center)),
        at(20, Input::parse("dance")),
    ]);

    // Script runs dry, which ends the loop like quit.
    game.run(&mut human).await.unwrap();

    assert_eq!(game.session().state().history().len(), 1);
    let events = drain(&mut rx);
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::Notice(message) if message.contains("not available")
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::Notice(message) if message.starts_with("Unknown input")
    )));
}

#[tokio::test(start_paused = true)]
async fn test_toggle_mode_clears_scores() {
    let (mut game, _rx) = orchestrator(OpponentMode::Bot);
    let mut human = ScriptedHuman::new([
        at(0, Input::Place(Position::Center)),
        at(100, Input::ToggleMode),
        at(2_000, Input::Quit),
    ]);

    game.run(&mut human).await.unwrap();

    assert_eq!(game.session().mode(), OpponentMode::TwoPlayer);
    assert!(game.session().state().history().is_empty());
}
