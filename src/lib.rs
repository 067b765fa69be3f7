//! ttt_arena library - concurrent tic-tac-toe session server
//!
//! # Architecture
//!
//! - **Game**: pure board and rule evaluation (win, draw, legal moves)
//! - **Session**: one match and its lifecycle state
//! - **Registry**: the concurrency-safe store owning all live sessions
//! - **Lobby**: the filtered, sorted list of games open for joining
//! - **Server**: WebSocket transport broadcasting registry results
//!
//! # Example
//!
//! ```
//! use ttt_arena::SessionRegistry;
//!
//! let registry = SessionRegistry::new();
//! let game = registry.create_session("alice", "Friendly match")?;
//! let game = registry.join_session(&game.id, "bob")?;
//! let game = registry.make_move(&game.id, "alice", 4)?;
//! assert_eq!(game.state.next_turn.as_deref(), Some("bob"));
//! # Ok::<(), ttt_arena::RegistryError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod game;
mod hub;
mod lobby;
mod registry;
mod server;
mod session;
mod wire;

// Crate-level exports - CLI
pub use cli::{Cli, Command, DEFAULT_PORT, resolve_port};

// Crate-level exports - Game types
pub use game::{Board, Cell, InvalidMove, Mark, rules};

// Crate-level exports - Session entity
pub use session::{GameSession, PlayerId, SessionId, SessionState, SessionStatus};

// Crate-level exports - Registry
pub use registry::{MAX_NAME_LEN, RegistryError, SessionRegistry};

// Crate-level exports - Lobby projection
pub use lobby::{LobbyPolicy, joinable};

// Crate-level exports - Transport
pub use hub::{ConnId, ConnectionSender, Hub};
pub use server::{AppState, ClientCommand, ServerMessage, router, serve};

// Crate-level exports - Wire payloads
pub use wire::{LobbyEntry, SessionView};
