//! WebSocket transport for the game registry.
//!
//! Maps each connection to a self-declared display-name identity, dispatches
//! client commands to the [`SessionRegistry`], and broadcasts results:
//! create/join notify the caller, then refresh the lobby for everyone, then
//! push state to the session's group; moves push state to the group only;
//! cancellation notifies the caller and refreshes the lobby; errors go to
//! the caller alone.

use crate::hub::Hub;
use crate::registry::{MAX_NAME_LEN, RegistryError, SessionRegistry};
use crate::session::GameSession;
use crate::wire::{LobbyEntry, SessionView};
use axum::Router;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Shared state handed to every connection handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The session registry.
    pub registry: SessionRegistry,
    /// Connection hub for broadcast.
    pub hub: Hub,
}

impl AppState {
    /// Creates transport state around a registry.
    pub fn new(registry: SessionRegistry) -> Self {
        Self {
            registry,
            hub: Hub::new(),
        }
    }
}

/// Commands a client may send over the socket.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientCommand {
    /// Create a new game with the given display name.
    CreateGame {
        /// Friendly name for the game.
        name: String,
    },
    /// Join an open game.
    JoinGame {
        /// Target session id.
        session_id: String,
    },
    /// Place a mark.
    MakeMove {
        /// Target session id.
        session_id: String,
        /// Cell index, 0-8 row-major.
        cell: usize,
    },
    /// Cancel a game that is still waiting for an opponent.
    CancelGame {
        /// Target session id.
        session_id: String,
    },
    /// Fetch the current state of a game (also rejoins its broadcast group).
    GetGame {
        /// Target session id.
        session_id: String,
    },
    /// Fetch the lobby listing.
    ListLobby,
}

/// Messages the server pushes to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Acknowledges a successful create to the acting caller.
    GameCreated {
        /// Id of the new session.
        session_id: String,
        /// Friendly name of the new session.
        friendly_name: String,
    },
    /// Acknowledges a successful join to the acting caller.
    GameJoined {
        /// Id of the joined session.
        session_id: String,
        /// Friendly name of the joined session.
        friendly_name: String,
    },
    /// Current lobby listing, ordered.
    Lobby {
        /// Joinable games.
        games: Vec<LobbyEntry>,
    },
    /// Current state of one session.
    GameState(SessionView),
    /// Acknowledges a successful cancellation to the acting caller.
    GameCancelled {
        /// Id of the removed session.
        session_id: String,
    },
    /// A rejected command; sent to the acting caller only.
    Error {
        /// Human-readable reason.
        message: String,
    },
}

fn encode(message: &ServerMessage) -> Option<String> {
    match serde_json::to_string(message) {
        Ok(payload) => Some(payload),
        Err(e) => {
            warn!(error = %e, "Failed to encode server message");
            None
        }
    }
}

/// Query parameters accepted at connect time.
#[derive(Debug, Deserialize)]
pub struct ConnectParams {
    /// Self-declared display name; required.
    pub name: Option<String>,
}

/// Builds the transport router.
pub fn router(state: AppState) -> Router {
    Router::new().route("/ws", get(ws_handler)).with_state(state)
}

/// Binds a listener and serves the transport until shutdown.
#[instrument(skip(registry))]
pub async fn serve(host: &str, port: u16, registry: SessionRegistry) -> anyhow::Result<()> {
    let app = router(AppState::new(registry));
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!(host, port, "Server ready, accepting WebSocket connections at /ws");
    axum::serve(listener, app).await?;
    Ok(())
}

#[instrument(skip(ws, state, params))]
async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<ConnectParams>,
    State(state): State<AppState>,
) -> Response {
    // Identity is the trimmed, length-bounded display name; reject before
    // upgrading when it is missing or blank.
    let name = params.name.as_deref().unwrap_or("").trim().to_string();
    if name.is_empty() {
        warn!("Connection rejected: missing display name");
        return (StatusCode::BAD_REQUEST, "display name is required").into_response();
    }
    let player_id: String = name.chars().take(MAX_NAME_LEN).collect();

    info!(player_id, "Accepting WebSocket connection");
    ws.on_upgrade(move |socket| handle_socket(socket, state, player_id))
}

async fn handle_socket(socket: WebSocket, state: AppState, player_id: String) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
    state.hub.register(&conn_id, tx);

    // Forward queued outbound messages to the socket.
    let forward = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if sink.send(message).await.is_err() {
                break;
            }
        }
    });

    // Every connection starts with the current lobby.
    send_lobby(&state, &conn_id);

    while let Some(Ok(message)) = stream.next().await {
        match message {
            Message::Text(text) => match serde_json::from_str::<ClientCommand>(&text) {
                Ok(command) => dispatch(&state, &conn_id, &player_id, command),
                Err(e) => {
                    debug!(player_id, error = %e, "Unparseable command");
                    send(&state, &conn_id, &ServerMessage::Error {
                        message: format!("unrecognized command: {e}"),
                    });
                }
            },
            Message::Close(_) => break,
            _ => {}
        }
    }

    state.hub.unregister(&conn_id);
    forward.abort();
    info!(player_id, "Connection closed");
}

#[instrument(skip(state, command))]
fn dispatch(state: &AppState, conn_id: &str, player_id: &str, command: ClientCommand) {
    let result = match command {
        ClientCommand::CreateGame { name } => {
            state.registry.create_session(player_id, &name).map(|session| {
                state.hub.join_group(&session.id, conn_id);
                send(state, conn_id, &ServerMessage::GameCreated {
                    session_id: session.id.clone(),
                    friendly_name: session.friendly_name.clone(),
                });
                broadcast_lobby(state);
                broadcast_state(state, &session);
            })
        }
        ClientCommand::JoinGame { session_id } => {
            state.registry.join_session(&session_id, player_id).map(|session| {
                state.hub.join_group(&session.id, conn_id);
                send(state, conn_id, &ServerMessage::GameJoined {
                    session_id: session.id.clone(),
                    friendly_name: session.friendly_name.clone(),
                });
                broadcast_lobby(state);
                broadcast_state(state, &session);
            })
        }
        ClientCommand::MakeMove { session_id, cell } => state
            .registry
            .make_move(&session_id, player_id, cell)
            .map(|session| broadcast_state(state, &session)),
        ClientCommand::CancelGame { session_id } => {
            state.registry.cancel_session(&session_id, player_id).map(|session| {
                send(state, conn_id, &ServerMessage::GameCancelled {
                    session_id: session.id.clone(),
                });
                state.hub.drop_group(&session.id);
                broadcast_lobby(state);
            })
        }
        ClientCommand::GetGame { session_id } => {
            state.registry.get_session(&session_id).map(|session| {
                state.hub.join_group(&session.id, conn_id);
                send(state, conn_id, &ServerMessage::GameState(SessionView::from(&session)));
            })
        }
        ClientCommand::ListLobby => {
            send_lobby(state, conn_id);
            Ok(())
        }
    };

    if let Err(error) = result {
        surface_error(state, conn_id, player_id, &error);
    }
}

fn surface_error(state: &AppState, conn_id: &str, player_id: &str, error: &RegistryError) {
    debug!(player_id, %error, "Command rejected");
    send(state, conn_id, &ServerMessage::Error {
        message: error.to_string(),
    });
}

fn send(state: &AppState, conn_id: &str, message: &ServerMessage) {
    if let Some(payload) = encode(message) {
        state.hub.send_to(conn_id, &payload);
    }
}

fn send_lobby(state: &AppState, conn_id: &str) {
    if let Some(payload) = encode(&lobby_message(state)) {
        state.hub.send_to(conn_id, &payload);
    }
}

fn broadcast_lobby(state: &AppState) {
    if let Some(payload) = encode(&lobby_message(state)) {
        state.hub.broadcast_all(&payload);
    }
}

fn broadcast_state(state: &AppState, session: &GameSession) {
    let message = ServerMessage::GameState(SessionView::from(session));
    if let Some(payload) = encode(&message) {
        state.hub.broadcast_group(&session.id, &payload);
    }
}

fn lobby_message(state: &AppState) -> ServerMessage {
    let games = state
        .registry
        .list_joinable()
        .iter()
        .map(LobbyEntry::from)
        .collect();
    ServerMessage::Lobby { games }
}
