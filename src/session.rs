//! The game session entity: one match and its lifecycle state.

use crate::game::{Board, Mark};
use serde::{Deserialize, Serialize};

/// Unique identifier for a game session.
pub type SessionId = String;

/// Unique identifier for a player.
pub type PlayerId = String;

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Created by the host, waiting for a guest to join.
    AwaitingOpponent,
    /// Both participants present, moves being played.
    InProgress,
    /// Terminal: won or drawn. Never revived.
    Finished,
}

/// The mutable portion of a session, replaced wholesale on every accepted
/// move so readers never observe a half-updated state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Current board.
    pub board: Board,
    /// Whose turn it is; absent once the game is finished.
    pub next_turn: Option<PlayerId>,
    /// Lifecycle status.
    pub status: SessionStatus,
    /// The winner's id; absent while in progress and on draws.
    pub winner: Option<PlayerId>,
}

/// A game session between a host and (once joined) a guest.
///
/// Invariants, maintained by the registry:
/// - `guest_id` absent implies `status == AwaitingOpponent`;
/// - `status == InProgress` implies `next_turn` is the host or the guest;
/// - `status == Finished` implies `next_turn` is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    /// Session id, generated at creation.
    pub id: SessionId,
    /// Display name chosen by the host, trimmed and length-bounded.
    pub friendly_name: String,
    /// The creating participant. Hosts own [`Mark::X`] and move first.
    pub host_id: PlayerId,
    /// The joining participant, absent until someone joins.
    pub guest_id: Option<PlayerId>,
    /// Board, turn, status, and winner.
    pub state: SessionState,
}

impl GameSession {
    /// Creates a fresh session awaiting an opponent.
    pub fn new(id: SessionId, host_id: PlayerId, friendly_name: String) -> Self {
        let next_turn = Some(host_id.clone());
        Self {
            id,
            friendly_name,
            host_id,
            guest_id: None,
            state: SessionState {
                board: Board::new(),
                next_turn,
                status: SessionStatus::AwaitingOpponent,
                winner: None,
            },
        }
    }

    /// Returns the mark the given participant plays with, or `None` if the
    /// player is not part of this session.
    pub fn mark_of(&self, player_id: &str) -> Option<Mark> {
        if self.host_id == player_id {
            Some(Mark::X)
        } else if self.guest_id.as_deref() == Some(player_id) {
            Some(Mark::O)
        } else {
            None
        }
    }

    /// Returns the participant id owning the given mark, if present.
    pub fn owner_of(&self, mark: Mark) -> Option<&PlayerId> {
        match mark {
            Mark::X => Some(&self.host_id),
            Mark::O => self.guest_id.as_ref(),
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined() -> GameSession {
        let mut session = GameSession::new("s1".into(), "alice".into(), "Friendly".into());
        session.guest_id = Some("bob".into());
        session.state.status = SessionStatus::InProgress;
        session
    }

    #[test]
    fn test_new_session_awaits_opponent() {
        let session = GameSession::new("s1".into(), "alice".into(), "Friendly".into());
        assert_eq!(session.state.status, SessionStatus::AwaitingOpponent);
        assert_eq!(session.state.next_turn.as_deref(), Some("alice"));
        assert!(session.guest_id.is_none());
        assert!(session.state.winner.is_none());
    }

    #[test]
    fn test_mark_assignment() {
        let session = joined();
        assert_eq!(session.mark_of("alice"), Some(Mark::X));
        assert_eq!(session.mark_of("bob"), Some(Mark::O));
        assert_eq!(session.mark_of("charlie"), None);
    }

    #[test]
    fn test_owner_of_each_mark() {
        let session = joined();
        assert_eq!(session.owner_of(Mark::X).map(String::as_str), Some("alice"));
        assert_eq!(session.owner_of(Mark::O).map(String::as_str), Some("bob"));

        let waiting = GameSession::new("s2".into(), "alice".into(), "Friendly".into());
        assert_eq!(waiting.owner_of(Mark::O), None);
    }
}
