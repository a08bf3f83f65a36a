//! HTTP server setup: shared state, routes, listener.

use crate::config::ServerConfig;
use crate::lobby::LobbyHandle;
use crate::ws;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use derive_new::new;
use serde_json::json;
use strictly_connect4::RoomDirectory;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

/// State shared by every request handler.
#[derive(Debug, Clone, new)]
pub struct AppState {
    lobby: LobbyHandle,
}

impl AppState {
    /// Handle to the lobby task.
    pub fn lobby(&self) -> &LobbyHandle {
        &self.lobby
    }
}

/// Connect-4 room server.
#[derive(Debug, Clone)]
pub struct GameServer {
    config: ServerConfig,
    state: AppState,
}

impl GameServer {
    /// Validates the configuration and starts the lobby task.
    ///
    /// Must be called inside a tokio runtime.
    #[instrument(skip(config))]
    pub fn new(config: ServerConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let rooms = RoomDirectory::new(config.board_size()?);
        let lobby = LobbyHandle::spawn(rooms, *config.channel_capacity());
        info!(
            rows = config.board().rows(),
            columns = config.board().columns(),
            "Game server created"
        );
        Ok(Self {
            config,
            state: AppState::new(lobby),
        })
    }

    /// Shared handler state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Builds the router.
    ///
    /// - `GET /ws` WebSocket game connection
    /// - `GET /api/rooms` joinable rooms as JSON
    /// - `GET /health` liveness probe
    /// - everything else falls through to the static directory, if set
    pub fn router(&self) -> Router {
        let router = Router::new()
            .route("/ws", get(ws::ws_handler))
            .route("/api/rooms", get(list_rooms))
            .route("/health", get(health));

        let router = match self.config.static_dir() {
            Some(dir) => {
                info!(dir = %dir.display(), "Serving static files");
                router.fallback_service(ServeDir::new(dir))
            }
            None => router,
        };

        router
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Binds the configured address and serves until the process exits.
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = (self.config.host().as_str(), *self.config.port());
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!(
            "Server ready at http://{}:{}/",
            self.config.host(),
            self.config.port()
        );
        info!("WebSocket clients connect to /ws");

        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}

async fn list_rooms(State(state): State<AppState>) -> Response {
    match state.lobby().list_rooms().await {
        Ok(rooms) => Json(rooms).into_response(),
        Err(e) => {
            warn!(error = %e, "Room list unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
