//! Lobby projection: the filtered, sorted list of joinable sessions.

use crate::session::{GameSession, SessionStatus};

/// Policy for which sessions the lobby surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LobbyPolicy {
    /// Also list in-progress games so participants can rejoin after a
    /// disconnect. Off by default: the lobby shows only games waiting for
    /// an opponent.
    pub include_in_progress: bool,
}

/// Filters a registry snapshot down to joinable sessions and sorts them.
///
/// Ordering is by friendly name using plain ordinal comparison (locale
/// independent), with ties broken by session id so repeated calls over
/// unchanged state return identical order. Read-only; operates on a
/// snapshot and never blocks registry mutations.
pub fn joinable(sessions: Vec<GameSession>, policy: LobbyPolicy) -> Vec<GameSession> {
    let mut joinable: Vec<GameSession> = sessions
        .into_iter()
        .filter(|s| match s.state.status {
            SessionStatus::AwaitingOpponent => true,
            SessionStatus::InProgress => policy.include_in_progress,
            SessionStatus::Finished => false,
        })
        .collect();
    joinable.sort_by(|a, b| {
        a.friendly_name
            .cmp(&b.friendly_name)
            .then_with(|| a.id.cmp(&b.id))
    });
    joinable
}
