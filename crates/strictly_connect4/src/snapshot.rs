//! Serializable views of sessions for broadcast.

use crate::{Color, Participant, SessionId, SessionStatus};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Complete copy of one session at one instant.
///
/// The grid is row-major with row 0 at the top; `null` marks an empty cell.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// Room the snapshot belongs to.
    room_id: SessionId,
    /// Cell colours, `rows × columns`.
    board: Vec<Vec<Option<Color>>>,
    /// Colour that moves next.
    current_turn_color: Color,
    /// Seated participants in seat order.
    participants: Vec<Participant>,
    /// Lifecycle status.
    status: SessionStatus,
    /// Winning colour; absent while playing and on a draw.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    winner: Option<Color>,
    /// Pieces placed so far.
    moves: usize,
}

impl GameSnapshot {
    pub(crate) fn new(
        room_id: SessionId,
        board: Vec<Vec<Option<Color>>>,
        current_turn_color: Color,
        participants: Vec<Participant>,
        status: SessionStatus,
        winner: Option<Color>,
        moves: usize,
    ) -> Self {
        Self {
            room_id,
            board,
            current_turn_color,
            participants,
            status,
            winner,
            moves,
        }
    }

    /// True for a finished game with no winner.
    pub fn is_draw(&self) -> bool {
        self.status == SessionStatus::GameOver && self.winner.is_none()
    }
}

/// Lobby listing entry for a joinable room.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    /// Room identifier.
    id: SessionId,
    /// Display name of the seated participant.
    creator: String,
    /// Lifecycle status.
    status: SessionStatus,
}

impl RoomSummary {
    pub(crate) fn new(id: SessionId, creator: String, status: SessionStatus) -> Self {
        Self { id, creator, status }
    }
}
