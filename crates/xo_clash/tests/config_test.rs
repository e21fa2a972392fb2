//! Tests for shell configuration and CLI parsing.

use clap::Parser;
use std::io::Write;
use xo_clash::ShellConfig;
use xo_clash::cli::{Cli, Command};
use xo_clash_engine::{OpponentMode, Player};

#[test]
fn test_defaults_when_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let config = ShellConfig::load(dir.path().join("missing.toml")).unwrap();
    assert_eq!(config, ShellConfig::default());
    assert_eq!(config.player_name(), "Joueur 1");
    assert_eq!(*config.opponent(), OpponentMode::Bot);
    assert_eq!(*config.bot_delay_ms(), 500);
    assert_eq!(*config.seed(), None);
}

#[test]
fn test_loads_partial_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "player_name = \"Alice\"\nopponent = \"player\"\nseed = 42").unwrap();

    let config = ShellConfig::from_file(file.path()).unwrap();
    assert_eq!(config.player_name(), "Alice");
    assert_eq!(*config.opponent(), OpponentMode::TwoPlayer);
    assert_eq!(*config.bot_delay_ms(), 500);
    assert_eq!(*config.seed(), Some(42));
}

#[test]
fn test_bad_file_reports_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "bot_delay_ms = \"soon\"").unwrap();

    let err = ShellConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"), "{err}");
}

#[test]
fn test_overrides_win_over_file_values() {
    let config = ShellConfig::default().with_overrides(
        Some("Bob".to_string()),
        Some(OpponentMode::TwoPlayer),
        Some(0),
        None,
    );
    assert_eq!(config.player_name(), "Bob");
    assert_eq!(*config.opponent(), OpponentMode::TwoPlayer);
    assert_eq!(config.bot_delay(), std::time::Duration::ZERO);
    assert_eq!(*config.seed(), None);
}

#[test]
fn test_cli_parses_play_and_suggest() {
    let cli = Cli::try_parse_from(["xo_clash", "play", "--opponent", "player", "--seed", "7"])
        .unwrap();
    match cli.command {
        Command::Play(args) => {
            assert_eq!(args.opponent, Some(OpponentMode::TwoPlayer));
            assert_eq!(args.seed, Some(7));
            assert_eq!(args.config, std::path::PathBuf::from("xo_clash.toml"));
        }
        other => panic!("unexpected command {other:?}"),
    }

    let cli = Cli::try_parse_from(["xo_clash", "suggest", "XX_______", "--player", "o"]).unwrap();
    match cli.command {
        Command::Suggest { board, player } => {
            assert_eq!(board, "XX_______");
            assert_eq!(player, Player::Circle);
        }
        other => panic!("unexpected command {other:?}"),
    }

    assert!(Cli::try_parse_from(["xo_clash", "play", "--opponent", "robot"]).is_err());
}
