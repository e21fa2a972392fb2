//! Peer-to-peer move channel.
//!
//! The transport is someone else's problem: it reports connection changes
//! and hands over opaque payloads as [`PeerEvent`]s. [`PeerLink`] decodes
//! payloads into [`Move`]s and feeds them through the session like any
//! local move, but only on the remote side's turn.

use crate::game::GameResult;
use crate::session::GameSession;
use crate::{Move, Player};
use derive_more::{Display, Error};
use tracing::{debug, info, instrument, warn};

/// Identifier a transport uses for a remote device.
pub type PeerId = String;

/// Callbacks from the transport, reduced to data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerEvent {
    /// A peer joined the session.
    Connected(PeerId),
    /// A peer sent a payload.
    DataReceived(Vec<u8>),
    /// A peer left or the link dropped.
    ConnectionLost(PeerId),
}

/// What the link did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerUpdate {
    /// The peer is now connected.
    Connected,
    /// The remote move was applied.
    MoveApplied(Move, GameResult),
    /// The remote move was out of turn or illegal and was declined.
    MoveIgnored(Move),
    /// The peer is gone.
    Disconnected,
}

/// Peer channel error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Peer error: {} at {}:{}", message, file, line)]
pub struct PeerError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl PeerError {
    /// Creates a new peer error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Serializes a move into a payload for the transport.
#[instrument]
pub fn encode_move(action: &Move) -> Result<Vec<u8>, PeerError> {
    serde_json::to_vec(action).map_err(|e| PeerError::new(format!("Failed to encode move: {e}")))
}

/// Decodes a payload received from the transport.
#[instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode_move(bytes: &[u8]) -> Result<Move, PeerError> {
    serde_json::from_slice(bytes).map_err(|e| PeerError::new(format!("Failed to decode move: {e}")))
}

/// Binds one side of a session to a remote peer.
#[derive(Debug, Clone)]
pub struct PeerLink {
    local: Player,
    peer: Option<PeerId>,
}

impl PeerLink {
    /// Creates a link where this device plays `local`.
    pub fn new(local: Player) -> Self {
        Self { local, peer: None }
    }

    /// Symbol played on this device.
    pub fn local(&self) -> Player {
        self.local
    }

    /// Symbol played by the remote peer.
    pub fn remote(&self) -> Player {
        self.local.opponent()
    }

    /// Connected peer, if any.
    pub fn peer(&self) -> Option<&str> {
        self.peer.as_deref()
    }

    /// Handles one transport event.
    ///
    /// # Errors
    ///
    /// Fails if data arrives with no peer connected or the payload does not
    /// decode. The session is untouched in both cases.
    #[instrument(skip(self, session), fields(local = %self.local))]
    pub fn handle(
        &mut self,
        event: PeerEvent,
        session: &mut GameSession,
    ) -> Result<PeerUpdate, PeerError> {
        match event {
            PeerEvent::Connected(peer) => {
                info!(peer = %peer, "Peer connected");
                self.peer = Some(peer);
                Ok(PeerUpdate::Connected)
            }
            PeerEvent::ConnectionLost(peer) => {
                if self.peer.as_deref() == Some(peer.as_str()) {
                    self.peer = None;
                }
                warn!(peer = %peer, "Peer connection lost");
                Ok(PeerUpdate::Disconnected)
            }
            PeerEvent::DataReceived(bytes) => {
                if self.peer.is_none() {
                    return Err(PeerError::new("Data received with no connected peer"));
                }
                let action = decode_move(&bytes)?;
                self.apply_remote(action, session)
            }
        }
    }

    fn apply_remote(
        &self,
        action: Move,
        session: &mut GameSession,
    ) -> Result<PeerUpdate, PeerError> {
        if action.player != self.remote() || *session.state().to_move() != self.remote() {
            debug!(%action, "Ignoring out-of-turn remote move");
            return Ok(PeerUpdate::MoveIgnored(action));
        }

        let before = session.state().history().len();
        let result = session.apply(action);
        if session.state().history().len() == before {
            debug!(%action, "Remote move declined");
            return Ok(PeerUpdate::MoveIgnored(action));
        }
        Ok(PeerUpdate::MoveApplied(action, result))
    }
}
