//! Integration tests for the lobby projection.

use ttt_arena::{LobbyPolicy, SessionRegistry};

#[test]
fn test_lobby_sorted_by_name() {
    let registry = SessionRegistry::new();
    registry.create_session("alice", "Zulu").expect("valid");
    registry.create_session("bob", "Alpha").expect("valid");
    registry.create_session("carol", "Mike").expect("valid");

    let names: Vec<_> = registry
        .list_joinable()
        .into_iter()
        .map(|s| s.friendly_name)
        .collect();
    assert_eq!(names, vec!["Alpha", "Mike", "Zulu"]);
}

#[test]
fn test_lobby_ties_broken_by_id() {
    let registry = SessionRegistry::new();
    for _ in 0..5 {
        registry.create_session("alice", "Same name").expect("valid");
    }

    let first: Vec<_> = registry.list_joinable().into_iter().map(|s| s.id).collect();
    let second: Vec<_> = registry.list_joinable().into_iter().map(|s| s.id).collect();
    assert_eq!(first, second);

    let mut sorted = first.clone();
    sorted.sort();
    assert_eq!(first, sorted);
}

#[test]
fn test_lobby_excludes_full_games_by_default() {
    let registry = SessionRegistry::new();
    let open = registry.create_session("alice", "Open").expect("valid");
    let full = registry.create_session("bob", "Full").expect("valid");
    registry.join_session(&full.id, "carol").expect("joinable");

    let ids: Vec<_> = registry.list_joinable().into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![open.id]);
}

#[test]
fn test_rejoin_policy_surfaces_in_progress_games() {
    let registry = SessionRegistry::with_policy(LobbyPolicy {
        include_in_progress: true,
    });
    let game = registry.create_session("alice", "Running").expect("valid");
    registry.join_session(&game.id, "bob").expect("joinable");

    let ids: Vec<_> = registry.list_joinable().into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![game.id]);
}

#[test]
fn test_finished_games_never_listed() {
    let registry = SessionRegistry::with_policy(LobbyPolicy {
        include_in_progress: true,
    });
    let game = registry.create_session("alice", "Quick").expect("valid");
    registry.join_session(&game.id, "bob").expect("joinable");
    for (player, cell) in [("alice", 0), ("bob", 3), ("alice", 1), ("bob", 4), ("alice", 2)] {
        registry.make_move(&game.id, player, cell).expect("legal");
    }

    assert!(registry.list_joinable().is_empty());
    // Still queryable directly, though.
    assert!(registry.get_session(&game.id).is_ok());
}

#[test]
fn test_cancelled_games_leave_the_lobby() {
    let registry = SessionRegistry::new();
    let game = registry.create_session("alice", "Short lived").expect("valid");
    assert_eq!(registry.list_joinable().len(), 1);

    registry.cancel_session(&game.id, "alice").expect("host cancel");
    assert!(registry.list_joinable().is_empty());
}
