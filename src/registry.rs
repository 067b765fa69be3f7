//! Concurrency-safe store of all game sessions.
//!
//! The registry exclusively owns every [`GameSession`]; callers only ever
//! receive cloned snapshots. All mutating operations run their whole
//! check-then-act sequence under one coarse lock, so mutations appear
//! strictly serialized: a losing concurrent join observes [`RegistryError::AlreadyFull`],
//! a losing move on the same cell observes [`RegistryError::CellTaken`] or a
//! turn mismatch, and no reader ever sees a half-updated session.

use crate::game::{InvalidMove, rules};
use crate::lobby::{self, LobbyPolicy};
use crate::session::{GameSession, SessionId, SessionState, SessionStatus};
use derive_more::{Display, Error};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument, warn};

/// Maximum length of a session's friendly name, in characters.
pub const MAX_NAME_LEN: usize = 50;

/// Expected business-rule rejections from registry operations.
///
/// These are ordinary outcomes of input and current state, not defects; the
/// transport layer renders them as user-facing messages.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum RegistryError {
    /// Malformed, missing, or oversized input.
    #[display("invalid input: {_0}")]
    Validation(#[error(not(source))] String),
    /// Unknown session id.
    #[display("game not found")]
    NotFound,
    /// A guest has already joined this session.
    #[display("game already has two players")]
    AlreadyFull,
    /// A player may not join their own session.
    #[display("you cannot join your own game")]
    SelfJoin,
    /// Moves are only accepted while the game is in progress.
    #[display("game is not in progress")]
    NotInProgress,
    /// No guest has joined yet. Unreachable once in progress.
    #[display("game has no opponent yet")]
    NoOpponent,
    /// The player is neither the host nor the guest.
    #[display("you are not a player in this game")]
    NotParticipant,
    /// It is the other participant's turn.
    #[display("it is not your turn")]
    NotYourTurn,
    /// The target cell already holds a mark.
    #[display("that cell is already taken")]
    CellTaken,
    /// The operation is not valid in the session's current lifecycle phase.
    #[display("game is not in a state that allows that")]
    InvalidState,
    /// The player is not permitted to perform this operation.
    #[display("you are not allowed to do that")]
    Forbidden,
}

/// Process-wide registry of live sessions.
///
/// Cloning is cheap and shares the underlying map.
#[derive(Debug, Clone)]
pub struct SessionRegistry {
    sessions: Arc<Mutex<HashMap<SessionId, GameSession>>>,
    policy: LobbyPolicy,
}

impl SessionRegistry {
    /// Creates an empty registry with the default lobby policy.
    #[instrument]
    pub fn new() -> Self {
        Self::with_policy(LobbyPolicy::default())
    }

    /// Creates an empty registry with the given lobby policy.
    #[instrument]
    pub fn with_policy(policy: LobbyPolicy) -> Self {
        info!(?policy, "Creating session registry");
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            policy,
        }
    }

    /// Returns the lobby policy this registry was configured with.
    pub fn policy(&self) -> LobbyPolicy {
        self.policy
    }

    // Critical sections never leave the map inconsistent, so a poisoned
    // guard is still safe to reuse.
    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, GameSession>> {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates a new session hosted by `host_id`.
    ///
    /// The friendly name is trimmed and truncated to [`MAX_NAME_LEN`]
    /// characters. Fails only with [`RegistryError::Validation`] when either
    /// input is blank.
    #[instrument(skip(self))]
    pub fn create_session(
        &self,
        host_id: &str,
        friendly_name: &str,
    ) -> Result<GameSession, RegistryError> {
        let host_id = host_id.trim();
        if host_id.is_empty() {
            return Err(RegistryError::Validation("player id is required".into()));
        }
        let name = friendly_name.trim();
        if name.is_empty() {
            return Err(RegistryError::Validation("game name is required".into()));
        }
        let name: String = name.chars().take(MAX_NAME_LEN).collect();

        let id = uuid::Uuid::new_v4().to_string();
        let session = GameSession::new(id.clone(), host_id.to_string(), name);

        let mut sessions = self.lock();
        sessions.insert(id.clone(), session.clone());

        info!(session_id = %id, host_id, "Created new session");
        Ok(session)
    }

    /// Joins `guest_id` to the session, transitioning it to in-progress.
    ///
    /// Serialized against concurrent joins on the same id: at most one
    /// succeeds, the loser observes [`RegistryError::AlreadyFull`].
    #[instrument(skip(self))]
    pub fn join_session(&self, id: &str, guest_id: &str) -> Result<GameSession, RegistryError> {
        let mut sessions = self.lock();
        let session = sessions.get(id).ok_or(RegistryError::NotFound)?;

        if session.guest_id.is_some() {
            warn!(session_id = id, guest_id, "Join rejected: already full");
            return Err(RegistryError::AlreadyFull);
        }
        if session.host_id == guest_id {
            warn!(session_id = id, guest_id, "Join rejected: self-join");
            return Err(RegistryError::SelfJoin);
        }

        // Host moves first, so next_turn stays on the host.
        let mut joined = session.clone();
        joined.guest_id = Some(guest_id.to_string());
        joined.state.status = SessionStatus::InProgress;
        sessions.insert(id.to_string(), joined.clone());

        info!(session_id = id, guest_id, "Guest joined session");
        Ok(joined)
    }

    /// Applies a move by `player_id` at `cell_index`, advancing the turn and
    /// finishing the game on a win or draw.
    ///
    /// The stored session is replaced as one atomic unit; no intermediate
    /// state is ever observable.
    #[instrument(skip(self))]
    pub fn make_move(
        &self,
        id: &str,
        player_id: &str,
        cell_index: usize,
    ) -> Result<GameSession, RegistryError> {
        let mut sessions = self.lock();
        let session = sessions.get(id).ok_or(RegistryError::NotFound)?;

        if cell_index >= 9 {
            return Err(RegistryError::Validation(
                "cell index must be between 0 and 8".into(),
            ));
        }
        if session.state.status != SessionStatus::InProgress {
            return Err(RegistryError::NotInProgress);
        }
        if session.guest_id.is_none() {
            return Err(RegistryError::NoOpponent);
        }
        let mark = session
            .mark_of(player_id)
            .ok_or(RegistryError::NotParticipant)?;
        if session.state.next_turn.as_deref() != Some(player_id) {
            return Err(RegistryError::NotYourTurn);
        }

        let board = session
            .state
            .board
            .with_mark(cell_index, mark)
            .map_err(|e| match e {
                InvalidMove::OutOfRange => {
                    RegistryError::Validation("cell index must be between 0 and 8".into())
                }
                InvalidMove::CellTaken => RegistryError::CellTaken,
            })?;

        let state = if let Some(winning_mark) = rules::check_winner(&board) {
            let winner = session.owner_of(winning_mark).cloned();
            SessionState {
                board,
                next_turn: None,
                status: SessionStatus::Finished,
                winner,
            }
        } else if rules::is_draw(&board) {
            SessionState {
                board,
                next_turn: None,
                status: SessionStatus::Finished,
                winner: None,
            }
        } else {
            let next = session.owner_of(mark.opponent()).cloned();
            SessionState {
                board,
                next_turn: next,
                status: SessionStatus::InProgress,
                winner: None,
            }
        };

        let mut moved = session.clone();
        moved.state = state;
        sessions.insert(id.to_string(), moved.clone());

        info!(
            session_id = id,
            player_id,
            cell_index,
            status = ?moved.state.status,
            "Move accepted"
        );
        Ok(moved)
    }

    /// Cancels a session that is still awaiting an opponent.
    ///
    /// Only the host may cancel, and only before a guest joins. Returns the
    /// pre-removal snapshot for the caller's cancellation notice.
    #[instrument(skip(self))]
    pub fn cancel_session(&self, id: &str, player_id: &str) -> Result<GameSession, RegistryError> {
        let mut sessions = self.lock();
        let session = sessions.get(id).ok_or(RegistryError::NotFound)?;

        if session.host_id != player_id {
            warn!(session_id = id, player_id, "Cancel rejected: not the host");
            return Err(RegistryError::Forbidden);
        }
        if session.state.status != SessionStatus::AwaitingOpponent {
            return Err(RegistryError::InvalidState);
        }

        let removed = sessions.remove(id).ok_or(RegistryError::NotFound)?;
        info!(session_id = id, "Session cancelled");
        Ok(removed)
    }

    /// Returns a snapshot of the session with the given id.
    #[instrument(skip(self))]
    pub fn get_session(&self, id: &str) -> Result<GameSession, RegistryError> {
        let sessions = self.lock();
        let session = sessions.get(id).cloned();
        if session.is_none() {
            debug!(session_id = id, "Session not found");
        }
        session.ok_or(RegistryError::NotFound)
    }

    /// Returns a snapshot of every live session, in no particular order.
    #[instrument(skip(self))]
    pub fn list_all(&self) -> Vec<GameSession> {
        let sessions = self.lock();
        sessions.values().cloned().collect()
    }

    /// Returns the joinable sessions under this registry's lobby policy,
    /// sorted by friendly name with ties broken by id.
    #[instrument(skip(self))]
    pub fn list_joinable(&self) -> Vec<GameSession> {
        lobby::joinable(self.list_all(), self.policy)
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
