//! JSON wire protocol spoken over the WebSocket.
//!
//! Every frame is a JSON object with a `type` tag:
//!
//! ```json
//! {"type": "joinRoom", "roomId": 3, "name": "Bob"}
//! {"type": "gameState", "state": {"board": [[null, ...], ...], ...}}
//! ```

use serde::{Deserialize, Serialize};
use strictly_connect4::{Color, GameError, GameSnapshot, RoomSummary, SessionId};

/// Intent sent by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    /// Announce a display name and request the room list.
    EnterLobby {
        /// Display name.
        name: String,
    },
    /// Open a new room and take its first seat.
    CreateRoom {
        /// Display name; blank or absent reuses the lobby name.
        #[serde(default)]
        name: String,
    },
    /// Take the free seat in an existing room.
    JoinRoom {
        /// Room to join.
        room_id: SessionId,
        /// Display name; blank or absent reuses the lobby name.
        #[serde(default)]
        name: String,
    },
    /// Drop a piece.
    MakeMove {
        /// Room the move is for.
        room_id: SessionId,
        /// Column index; negative values are rejected as out of range.
        column: i64,
    },
    /// Give up the seat.
    LeaveRoom {
        /// Room to leave.
        room_id: SessionId,
    },
}

/// Message pushed to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    /// Joinable rooms, sent on lobby entry and after every roster change.
    AvailableRooms {
        /// Rooms with a free seat, oldest first.
        rooms: Vec<RoomSummary>,
    },
    /// The requester's new room.
    RoomCreated {
        /// New room identifier.
        room_id: SessionId,
        /// Colour assigned to the creator.
        color: Color,
    },
    /// The requester joined a room.
    RoomJoined {
        /// Joined room.
        room_id: SessionId,
        /// Colour assigned to the joiner.
        color: Color,
        /// State after the join.
        state: GameSnapshot,
    },
    /// Room state after a join or an accepted move.
    GameState {
        /// Current state.
        state: GameSnapshot,
    },
    /// The requester's move was refused by the board.
    MoveRejected {
        /// Stable error code.
        code: String,
        /// Human-readable reason.
        reason: String,
    },
    /// The requester's intent failed.
    Error {
        /// Stable error code.
        code: String,
        /// Human-readable message.
        message: String,
    },
    /// The opponent left the room.
    OpponentLeft {
        /// Room state after the departure.
        state: GameSnapshot,
    },
    /// The opponent's connection dropped.
    OpponentDisconnected {
        /// Room state after the departure.
        state: GameSnapshot,
    },
}

impl ServerMessage {
    /// Error reply for a rejected intent.
    pub fn error(err: &GameError) -> Self {
        ServerMessage::Error {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }

    /// Move rejection reply.
    pub fn move_rejected(err: &GameError) -> Self {
        ServerMessage::MoveRejected {
            code: err.code().to_string(),
            reason: err.to_string(),
        }
    }

    /// Reply to a frame that is not a valid [`ClientMessage`].
    pub fn bad_request(message: impl Into<String>) -> Self {
        ServerMessage::Error {
            code: "badRequest".to_string(),
            message: message.into(),
        }
    }
}
