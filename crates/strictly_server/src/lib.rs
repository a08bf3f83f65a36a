//! Strictly Connect4 server - room matchmaking and move relay
//!
//! Browser clients connect over a WebSocket, pick a name, create or join a
//! room and exchange moves. The authoritative game logic lives in
//! [`strictly_connect4`]; this crate is the transport around it.
//!
//! # Architecture
//!
//! - **Protocol**: JSON intents and broadcasts
//! - **Lobby**: single task owning the room directory and connections
//! - **WebSocket**: per-connection reader/writer bridging to the lobby
//! - **Server**: axum routes, static assets, configuration
//!
//! # Example
//!
//! ```no_run
//! use strictly_server::{GameServer, ServerConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let server = GameServer::new(ServerConfig::default())?;
//! server.run().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod error;
mod lobby;
mod protocol;
mod server;
mod ws;

// Crate-level exports - Configuration
pub use cli::Cli;
pub use config::{BoardConfig, ServerConfig};

// Crate-level exports - Errors
pub use error::{ConfigError, LobbyClosed};

// Crate-level exports - Lobby
pub use lobby::{Lobby, LobbyCommand, LobbyHandle, Outbox};

// Crate-level exports - Wire protocol
pub use protocol::{ClientMessage, ServerMessage};

// Crate-level exports - Server
pub use server::{AppState, GameServer};
