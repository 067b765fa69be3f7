//! Command-line interface for ttt_arena.

use clap::{Parser, Subcommand};

/// Port used when neither the flag nor the `PORT` variable supplies one.
pub const DEFAULT_PORT: u16 = 3000;

/// ttt_arena - realtime tic-tac-toe session server
#[derive(Parser, Debug)]
#[command(name = "ttt_arena")]
#[command(about = "Realtime tic-tac-toe session server with a lobby", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the WebSocket game server
    Serve {
        /// Port to bind to; falls back to the PORT environment variable
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Also list in-progress games in the lobby so players can rejoin
        #[arg(long)]
        show_in_progress: bool,
    },
}

/// Resolves the port to bind: an explicit flag wins, then a parseable
/// `PORT` environment value, then [`DEFAULT_PORT`].
pub fn resolve_port(flag: Option<u16>, env_port: Option<&str>) -> u16 {
    flag.or_else(|| env_port.and_then(|p| p.parse().ok()))
        .unwrap_or(DEFAULT_PORT)
}
