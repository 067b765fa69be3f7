//! Outbound payload shapes for the transport layer.

use crate::session::{GameSession, PlayerId, SessionId, SessionStatus};
use serde::{Deserialize, Serialize};

/// One row of the lobby listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LobbyEntry {
    /// Session id.
    pub session_id: SessionId,
    /// Display name of the game.
    pub friendly_name: String,
    /// Id of the hosting player.
    pub host_id: PlayerId,
}

impl From<&GameSession> for LobbyEntry {
    fn from(session: &GameSession) -> Self {
        Self {
            session_id: session.id.clone(),
            friendly_name: session.friendly_name.clone(),
            host_id: session.host_id.clone(),
        }
    }
}

/// Broadcast view of one session's state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    /// Session id.
    pub session_id: SessionId,
    /// Lifecycle status.
    pub status: SessionStatus,
    /// Player whose turn it is; absent once finished.
    pub next_turn: Option<PlayerId>,
    /// The winner's id; absent while in progress and on draws.
    pub winner: Option<PlayerId>,
    /// Cell labels in row-major order: `"X"`, `"O"`, or `""`.
    pub board: Vec<String>,
}

impl From<&GameSession> for SessionView {
    fn from(session: &GameSession) -> Self {
        Self {
            session_id: session.id.clone(),
            status: session.state.status,
            next_turn: session.state.next_turn.clone(),
            winner: session.state.winner.clone(),
            board: session
                .state
                .board
                .cells()
                .iter()
                .map(|c| c.label().to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Mark;

    #[test]
    fn test_session_view_from_fresh_session() {
        let session = GameSession::new("s1".into(), "alice".into(), "Friendly".into());
        let view = SessionView::from(&session);
        assert_eq!(view.session_id, "s1");
        assert_eq!(view.status, SessionStatus::AwaitingOpponent);
        assert_eq!(view.next_turn.as_deref(), Some("alice"));
        assert!(view.winner.is_none());
        assert_eq!(view.board, vec![""; 9]);
    }

    #[test]
    fn test_session_view_board_labels() {
        let mut session = GameSession::new("s1".into(), "alice".into(), "Friendly".into());
        session.state.board = session
            .state
            .board
            .with_mark(0, Mark::X)
            .and_then(|b| b.with_mark(4, Mark::O))
            .expect("legal moves");
        let view = SessionView::from(&session);
        assert_eq!(view.board[0], "X");
        assert_eq!(view.board[4], "O");
        assert_eq!(view.board[1], "");
    }

    #[test]
    fn test_lobby_entry_fields() {
        let session = GameSession::new("s1".into(), "alice".into(), "Friendly".into());
        let entry = LobbyEntry::from(&session);
        assert_eq!(entry.session_id, "s1");
        assert_eq!(entry.friendly_name, "Friendly");
        assert_eq!(entry.host_id, "alice");
    }
}
