//! Error taxonomy for rejected intents.

use crate::{ParticipantId, SessionId};

/// A rejected request.
///
/// Every variant is recoverable by the requester: the session and board are
/// left untouched when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GameError {
    /// No session registered under the identifier.
    #[display("Room {} not found", _0)]
    SessionNotFound(#[error(not(source))] SessionId),

    /// The roster already holds two participants.
    #[display("Room {} is full", _0)]
    SessionFull(#[error(not(source))] SessionId),

    /// The session is waiting for an opponent or already finished.
    #[display("Room {} is not accepting moves", _0)]
    GameNotInProgress(#[error(not(source))] SessionId),

    /// The requester already holds a seat in the session.
    #[display("Participant {} is already in room", _0)]
    AlreadySeated(#[error(not(source))] ParticipantId),

    /// The requester is not seated in the session.
    #[display("Participant {} is not in this room", _0)]
    UnknownParticipant(#[error(not(source))] ParticipantId),

    /// It is the other participant's turn.
    #[display("It's not {}'s turn", _0)]
    NotYourTurn(#[error(not(source))] ParticipantId),

    /// Column index outside `0..columns`.
    #[display("Column {} is out of range (0-{})", column, columns.saturating_sub(1))]
    ColumnOutOfRange {
        /// Requested column.
        column: i64,
        /// Board width.
        columns: usize,
    },

    /// The column's top cell is already occupied.
    #[display("Column {} is full", _0)]
    ColumnFull(#[error(not(source))] usize),
}

impl GameError {
    /// Stable camelCase code for the wire.
    pub fn code(&self) -> &'static str {
        match self {
            GameError::SessionNotFound(_) => "sessionNotFound",
            GameError::SessionFull(_) => "sessionFull",
            GameError::AlreadySeated(_) => "alreadySeated",
            GameError::GameNotInProgress(_) => "gameNotInProgress",
            GameError::UnknownParticipant(_) => "unknownParticipant",
            GameError::NotYourTurn(_) => "notYourTurn",
            GameError::ColumnOutOfRange { .. } => "columnOutOfRange",
            GameError::ColumnFull(_) => "columnFull",
        }
    }

    /// Move rejections that are dropped without any reply.
    ///
    /// Board-level rejections (bad or full column) are reported to the
    /// requester; session-level ones are not.
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            GameError::GameNotInProgress(_)
                | GameError::UnknownParticipant(_)
                | GameError::NotYourTurn(_)
        )
    }
}
