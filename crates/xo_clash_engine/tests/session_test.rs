//! Tests for match bookkeeping, deferred bot moves and the peer channel.

use xo_clash_engine::{
    encode_move, GameResult, GameSession, Move, OpponentMode, PeerEvent, PeerLink, PeerUpdate,
    PendingOutcome, Player, Position,
};

fn play_all(session: &mut GameSession, positions: &[Position]) -> GameResult {
    let mut result = GameResult::InProgress;
    for pos in positions {
        result = session.play(*pos);
    }
    result
}

const CROSS_WINS: [Position; 5] = [
    Position::TopLeft,
    Position::Center,
    Position::TopCenter,
    Position::BottomLeft,
    Position::TopRight,
];

#[test]
fn test_finished_game_is_scored_once() {
    let mut session = GameSession::new("Alice", OpponentMode::TwoPlayer);
    assert_eq!(play_all(&mut session, &CROSS_WINS), GameResult::Win(Player::Cross));
    assert_eq!(session.scores().cross_wins, 1);
    assert_eq!(session.scores().games_played, 1);

    // Further input after the end changes nothing.
    assert_eq!(session.play(Position::BottomRight), GameResult::Win(Player::Cross));
    assert_eq!(session.scores().games_played, 1);
}

#[test]
fn test_reset_round_keeps_scores_end_game_clears_them() {
    let mut session = GameSession::new("Alice", OpponentMode::TwoPlayer);
    play_all(&mut session, &CROSS_WINS);

    session.reset_round();
    assert_eq!(*session.state().result(), GameResult::InProgress);
    assert!(session.state().history().is_empty());
    assert_eq!(session.scores().cross_wins, 1);

    session.end_game();
    assert_eq!(session.scores().games_played, 0);
    assert_eq!(session.scores().cross_wins, 0);
}

#[test]
fn test_switching_mode_resets_everything() {
    let mut session = GameSession::new("Alice", OpponentMode::TwoPlayer);
    play_all(&mut session, &CROSS_WINS);
    session.set_mode(OpponentMode::Bot);
    assert_eq!(session.mode(), OpponentMode::Bot);
    assert_eq!(session.scores().games_played, 0);
    assert!(session.state().history().is_empty());
}

#[test]
fn test_pending_bot_move_applies_in_same_round() {
    let mut session = GameSession::new("Alice", OpponentMode::Bot);
    session.play(Position::Center);
    assert!(session.bot_to_move());

    let pending = session.defer(Position::TopLeft).expect("bot is seated");
    assert_eq!(pending.action(), Move::new(Player::Circle, Position::TopLeft));
    assert_eq!(session.apply_pending(pending), PendingOutcome::Applied);
    assert_eq!(*session.state().to_move(), Player::Cross);
}

#[test]
fn test_pending_bot_move_discarded_after_reset() {
    let mut session = GameSession::new("Alice", OpponentMode::Bot);
    session.play(Position::Center);
    let pending = session.defer(Position::TopLeft).expect("bot is seated");

    session.reset_round();
    assert_eq!(session.apply_pending(pending), PendingOutcome::Stale);
    assert!(session.state().board().is_empty(Position::TopLeft));
    assert!(session.state().history().is_empty());
}

#[test]
fn test_pending_move_for_occupied_square_is_declined() {
    let mut session = GameSession::new("Alice", OpponentMode::Bot);
    session.play(Position::Center);
    let pending = session.defer(Position::Center).expect("bot is seated");
    assert_eq!(session.apply_pending(pending), PendingOutcome::Declined);
}

#[test]
fn test_human_cannot_move_while_bot_is_pending() {
    let mut session = GameSession::new("Alice", OpponentMode::Bot);
    session.play(Position::Center);
    let before = session.state().clone();
    // Circle's turn until the deferred bot move lands.
    session.apply(Move::new(Player::Cross, Position::TopLeft));
    assert_eq!(session.state(), &before);
}

#[test]
fn test_peer_moves_apply_only_on_remote_turn() {
    let mut session = GameSession::new("Alice", OpponentMode::TwoPlayer);
    let mut link = PeerLink::new(Player::Cross);

    link.handle(PeerEvent::Connected("bob-phone".into()), &mut session)
        .expect("connect");
    assert_eq!(link.peer(), Some("bob-phone"));

    // Remote tries to move before local Cross has played.
    let early = Move::new(Player::Circle, Position::Center);
    let update = link
        .handle(PeerEvent::DataReceived(encode_move(&early).unwrap()), &mut session)
        .expect("decodes");
    assert_eq!(update, PeerUpdate::MoveIgnored(early));

    session.play(Position::TopLeft);
    let update = link
        .handle(PeerEvent::DataReceived(encode_move(&early).unwrap()), &mut session)
        .expect("decodes");
    assert_eq!(update, PeerUpdate::MoveApplied(early, GameResult::InProgress));
    assert_eq!(*session.state().to_move(), Player::Cross);
}

#[test]
fn test_peer_cannot_move_for_local_side() {
    let mut session = GameSession::new("Alice", OpponentMode::TwoPlayer);
    let mut link = PeerLink::new(Player::Cross);
    link.handle(PeerEvent::Connected("bob".into()), &mut session)
        .expect("connect");

    let forged = Move::new(Player::Cross, Position::Center);
    let update = link
        .handle(PeerEvent::DataReceived(encode_move(&forged).unwrap()), &mut session)
        .expect("decodes");
    assert_eq!(update, PeerUpdate::MoveIgnored(forged));
    assert!(session.state().history().is_empty());
}

#[test]
fn test_peer_data_without_connection_or_garbage_is_error() {
    let mut session = GameSession::new("Alice", OpponentMode::TwoPlayer);
    let mut link = PeerLink::new(Player::Circle);

    let action = Move::new(Player::Cross, Position::Center);
    assert!(
        link.handle(PeerEvent::DataReceived(encode_move(&action).unwrap()), &mut session)
            .is_err()
    );

    link.handle(PeerEvent::Connected("bob".into()), &mut session)
        .expect("connect");
    assert!(
        link.handle(PeerEvent::DataReceived(b"{}".to_vec()), &mut session)
            .is_err()
    );
    assert!(session.state().history().is_empty());

    let update = link
        .handle(PeerEvent::ConnectionLost("bob".into()), &mut session)
        .expect("disconnect");
    assert_eq!(update, PeerUpdate::Disconnected);
    assert_eq!(link.peer(), None);
}
