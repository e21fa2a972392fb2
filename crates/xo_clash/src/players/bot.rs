//! The automated opponent's seat.

use rand::Rng;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tracing::{debug, instrument};
use xo_clash_engine::{AutomatedOpponent, GameSession, PendingMove};

/// Chooses bot moves and delivers them after a delay.
pub struct BotPlayer<R> {
    opponent: AutomatedOpponent<R>,
    delay: Duration,
}

impl<R: Rng> BotPlayer<R> {
    /// Creates a bot seat with the given presentation delay.
    pub fn new(opponent: AutomatedOpponent<R>, delay: Duration) -> Self {
        Self { opponent, delay }
    }

    /// Chooses a move now and sends it on `tx` once the delay has passed.
    ///
    /// Returns `None` if the bot is not seated or has no move. The move is
    /// tagged with the session's round, so a reset before delivery makes
    /// it stale.
    #[instrument(skip_all, fields(round = session.round()))]
    pub fn schedule(
        &mut self,
        session: &GameSession,
        tx: mpsc::UnboundedSender<PendingMove>,
    ) -> Option<JoinHandle<()>> {
        let (position, source) = self
            .opponent
            .choose_move_with_source(session.state().board())?;
        let pending = session.defer(position)?;
        debug!(position = %position, %source, delay_ms = self.delay.as_millis() as u64, "Bot move scheduled");

        let delay = self.delay;
        Some(tokio::spawn(async move {
            sleep(delay).await;
            // The receiver only goes away when the game loop has ended.
            let _ = tx.send(pending);
        }))
    }
}
