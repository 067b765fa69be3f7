//! Integration tests for the outbound wire payloads.

use serde_json::{Value, json};
use ttt_arena::{LobbyEntry, SessionRegistry, SessionView};

#[test]
fn test_lobby_entry_payload_shape() {
    let registry = SessionRegistry::new();
    let game = registry.create_session("alice", "Friendly").expect("valid");

    let entry = LobbyEntry::from(&game);
    let value = serde_json::to_value(&entry).expect("serializable");
    assert_eq!(
        value,
        json!({
            "session_id": game.id,
            "friendly_name": "Friendly",
            "host_id": "alice",
        })
    );
}

#[test]
fn test_session_view_in_progress() {
    let registry = SessionRegistry::new();
    let game = registry.create_session("alice", "Friendly").expect("valid");
    registry.join_session(&game.id, "bob").expect("joinable");
    let game = registry.make_move(&game.id, "alice", 4).expect("legal");

    let view = SessionView::from(&game);
    let value = serde_json::to_value(&view).expect("serializable");
    assert_eq!(value["status"], "in_progress");
    assert_eq!(value["next_turn"], "bob");
    assert_eq!(value["winner"], Value::Null);
    assert_eq!(value["board"][4], "X");
    assert_eq!(value["board"].as_array().map(Vec::len), Some(9));
}

#[test]
fn test_session_view_finished_with_winner() {
    let registry = SessionRegistry::new();
    let game = registry.create_session("alice", "Friendly").expect("valid");
    registry.join_session(&game.id, "bob").expect("joinable");
    for (player, cell) in [("alice", 0), ("bob", 3), ("alice", 1), ("bob", 4), ("alice", 2)] {
        registry.make_move(&game.id, player, cell).expect("legal");
    }

    let game = registry.get_session(&game.id).expect("present");
    let view = SessionView::from(&game);
    let value = serde_json::to_value(&view).expect("serializable");
    assert_eq!(value["status"], "finished");
    assert_eq!(value["next_turn"], Value::Null);
    assert_eq!(value["winner"], "alice");
    assert_eq!(value["board"][3], "O");
}
