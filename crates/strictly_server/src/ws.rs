//! WebSocket endpoint bridging browser clients to the lobby.
//!
//! Each socket gets a writer task draining its outbox and a reader loop
//! that parses [`ClientMessage`] frames and forwards them. When the socket
//! closes for any reason the lobby is told the participant disconnected.

use crate::lobby::LobbyHandle;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::server::AppState;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use strictly_connect4::ParticipantId;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Upgrades `GET /ws` to a game connection.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state.lobby().clone()))
}

async fn handle_socket(socket: WebSocket, lobby: LobbyHandle) {
    let (outbox, mut inbox) = mpsc::unbounded_channel::<ServerMessage>();
    let participant_id = match lobby.connect(outbox.clone()).await {
        Ok(id) => id,
        Err(e) => {
            warn!(error = %e, "Refusing connection");
            return;
        }
    };
    info!(%participant_id, "WebSocket connected");

    let (mut sink, mut stream) = socket.split();

    let writer = tokio::spawn(async move {
        while let Some(message) = inbox.recv().await {
            let json = match serde_json::to_string(&message) {
                Ok(j) => j,
                Err(e) => {
                    warn!("Failed to serialize server message: {e}");
                    continue;
                }
            };
            if sink.send(Message::Text(json.into())).await.is_err() {
                debug!("WebSocket send failed, stopping writer");
                break;
            }
        }
    });

    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                if forward(&lobby, &outbox, participant_id, text.as_str())
                    .await
                    .is_err()
                {
                    break;
                }
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {
                // Pings are answered by axum; binary frames are not part of the protocol.
            }
            Err(e) => {
                debug!("WebSocket error: {e}");
                break;
            }
        }
    }

    if lobby.disconnect(participant_id).await.is_err() {
        debug!("Lobby gone before disconnect");
    }
    writer.abort();
    info!(%participant_id, "WebSocket closed");
}

/// Parses one text frame and hands it to the lobby.
///
/// Malformed frames get a `badRequest` reply on the sender's own outbox.
#[instrument(skip(lobby, outbox, text))]
async fn forward(
    lobby: &LobbyHandle,
    outbox: &mpsc::UnboundedSender<ServerMessage>,
    participant_id: ParticipantId,
    text: &str,
) -> Result<(), crate::error::LobbyClosed> {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(message) => lobby.intent(participant_id, message).await,
        Err(e) => {
            debug!(error = %e, "Malformed client frame");
            if outbox.send(ServerMessage::bad_request(e.to_string())).is_err() {
                debug!("Outbox closed");
            }
            Ok(())
        }
    }
}
