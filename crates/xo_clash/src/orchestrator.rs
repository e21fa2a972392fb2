//! Game loop between the human, the bot and the board.

use crate::players::{BotPlayer, Input, InputSource};
use anyhow::Result;
use rand::Rng;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};
use xo_clash_engine::{
    GameResult, GameSession, PendingMove, PendingOutcome, Player, Position, positional_move,
};

/// Messages sent from orchestrator to UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Board redrawn.
    StateChanged {
        /// Rendered board.
        board: String,
        /// Name of the seat to move; `None` once the game is over.
        to_move: Option<String>,
    },
    /// The bot is choosing.
    BotThinking,
    /// Move was made.
    MoveMade {
        /// Name of the mover.
        player: String,
        /// Where the mark went.
        position: Position,
    },
    /// Game ended; a new round follows.
    GameOver {
        /// Winner's name, `None` for a draw.
        winner: Option<String>,
        /// Score line after the game.
        scores: String,
    },
    /// Informational message.
    Notice(String),
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::StateChanged { board, to_move } => match to_move {
                Some(name) => write!(f, "\n{board}\n\n{name} to move"),
                None => write!(f, "\n{board}\n"),
            },
            GameEvent::BotThinking => write!(f, "Bot is thinking..."),
            GameEvent::MoveMade { player, position } => write!(f, "{player} plays {position}"),
            GameEvent::GameOver { winner, scores } => match winner {
                Some(name) => write!(f, "{name} wins!\n{scores}"),
                None => write!(f, "Draw!\n{scores}"),
            },
            GameEvent::Notice(message) => write!(f, "{message}"),
        }
    }
}

/// Owns the session and serializes every move into it.
pub struct Orchestrator<R> {
    session: GameSession,
    bot: BotPlayer<R>,
    event_tx: mpsc::UnboundedSender<GameEvent>,
    pending_tx: mpsc::UnboundedSender<PendingMove>,
    pending_rx: mpsc::UnboundedReceiver<PendingMove>,
    pending_task: Option<JoinHandle<()>>,
}

enum Step {
    Input(Option<Input>),
    Bot(PendingMove),
}

impl<R: Rng> Orchestrator<R> {
    /// Creates a new orchestrator.
    pub fn new(
        session: GameSession,
        bot: BotPlayer<R>,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        let (pending_tx, pending_rx) = mpsc::unbounded_channel();
        Self {
            session,
            bot,
            event_tx,
            pending_tx,
            pending_rx,
            pending_task: None,
        }
    }

    /// The session as it stands.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Runs the game loop until the input quits or runs dry.
    #[instrument(skip_all)]
    pub async fn run(&mut self, input: &mut dyn InputSource) -> Result<()> {
        info!(mode = ?self.session.mode(), "Starting game orchestration");
        self.publish_state()?;

        loop {
            let step = tokio::select! {
                line = input.next_input() => Step::Input(line?),
                Some(pending) = self.pending_rx.recv() => Step::Bot(pending),
            };

            match step {
                Step::Input(None) | Step::Input(Some(Input::Quit)) => break,
                Step::Input(Some(line)) => self.handle_input(line)?,
                Step::Bot(pending) => self.deliver(pending)?,
            }
        }

        self.cancel_pending();
        info!(scores = ?self.session.scores(), "Game loop finished");
        Ok(())
    }

    #[instrument(skip(self))]
    fn handle_input(&mut self, line: Input) -> Result<()> {
        match line {
            Input::Place(position) => self.place(position),
            Input::Hint => {
                let hint = match positional_move(self.session.state().board()) {
                    Some(pos) => format!("Hint: try {pos}"),
                    None => "No squares left".to_string(),
                };
                self.notify(hint)
            }
            Input::Reset => {
                self.cancel_pending();
                self.session.reset_round();
                self.notify("New round".to_string())?;
                self.publish_state()
            }
            Input::NewMatch => {
                self.cancel_pending();
                self.session.end_game();
                self.notify("Scores cleared".to_string())?;
                self.publish_state()
            }
            Input::ToggleMode => {
                self.cancel_pending();
                let mode = self.session.mode().toggle();
                self.session.set_mode(mode);
                let opponent = self.session.name_of(Player::Circle).to_string();
                self.notify(format!("Now playing against {opponent}"))?;
                self.publish_state()
            }
            Input::Quit => Ok(()),
            Input::Unknown(text) => self.notify(format!(
                "Unknown input {text:?}. Type 1-9, 'row col', hint, reset, new, mode or quit."
            )),
        }
    }

    fn place(&mut self, position: Position) -> Result<()> {
        if self.session.bot_to_move() {
            return self.notify("Wait for the bot to move".to_string());
        }

        let mover = *self.session.state().to_move();
        let before = self.session.state().history().len();
        let result = self.session.play(position);
        if self.session.state().history().len() == before {
            debug!(%position, "Human move declined");
            return self.notify(format!("{position} is not available"));
        }

        self.after_move(mover, position, result)
    }

    #[instrument(skip(self))]
    fn deliver(&mut self, pending: PendingMove) -> Result<()> {
        self.pending_task = None;
        match self.session.apply_pending(pending) {
            PendingOutcome::Applied => {
                let action = pending.action();
                let result = *self.session.state().result();
                self.after_move(action.player, action.position, result)
            }
            PendingOutcome::Stale => {
                debug!("Stale bot move dropped");
                Ok(())
            }
            PendingOutcome::Declined => {
                warn!(action = %pending.action(), "Bot move declined");
                Ok(())
            }
        }
    }

    fn after_move(&mut self, mover: Player, position: Position, result: GameResult) -> Result<()> {
        self.event_tx.send(GameEvent::MoveMade {
            player: self.session.name_of(mover).to_string(),
            position,
        })?;

        if result.is_over() {
            let winner = result
                .winner()
                .map(|player| self.session.name_of(player).to_string());
            self.event_tx.send(GameEvent::StateChanged {
                board: self.session.state().board().display(),
                to_move: None,
            })?;
            self.event_tx.send(GameEvent::GameOver {
                winner,
                scores: self.score_line(),
            })?;
            self.session.reset_round();
            return self.publish_state();
        }

        self.publish_state()?;
        self.schedule_bot()
    }

    fn schedule_bot(&mut self) -> Result<()> {
        if !self.session.bot_to_move() {
            return Ok(());
        }
        self.event_tx.send(GameEvent::BotThinking)?;
        self.pending_task = self.bot.schedule(&self.session, self.pending_tx.clone());
        Ok(())
    }

    fn cancel_pending(&mut self) {
        if let Some(task) = self.pending_task.take() {
            debug!("Cancelling pending bot move");
            task.abort();
        }
    }

    fn publish_state(&self) -> Result<()> {
        let to_move = *self.session.state().to_move();
        self.event_tx.send(GameEvent::StateChanged {
            board: self.session.state().board().display(),
            to_move: Some(self.session.name_of(to_move).to_string()),
        })?;
        Ok(())
    }

    fn notify(&self, message: String) -> Result<()> {
        self.event_tx.send(GameEvent::Notice(message))?;
        Ok(())
    }

    fn score_line(&self) -> String {
        let scores = self.session.scores();
        format!(
            "{}: {}  {}: {}  (games: {})",
            self.session.name_of(Player::Cross),
            scores.cross_wins,
            self.session.name_of(Player::Circle),
            scores.circle_wins,
            scores.games_played
        )
    }
}
