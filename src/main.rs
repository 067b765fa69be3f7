//! ttt_arena - realtime tic-tac-toe session server.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use ttt_arena::{Cli, Command, LobbyPolicy, SessionRegistry};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Command::Serve {
            port,
            host,
            show_in_progress,
        } => {
            let port = ttt_arena::resolve_port(port, std::env::var("PORT").ok().as_deref());
            info!(host, port, show_in_progress, "Starting ttt_arena server");
            let registry = SessionRegistry::with_policy(LobbyPolicy {
                include_in_progress: show_in_progress,
            });
            ttt_arena::serve(&host, port, registry).await
        }
    }
}
