//! Per-room game session state machine.
//!
//! ```text
//! WAITING --join--> PLAYING --win/draw--> GAME_OVER
//!    ^                 |                      |
//!    +------leave------+----------leave-------+
//! ```
//!
//! A session reaches PLAYING only through [`GameSession::join`]. When a
//! participant leaves and one remains, the session goes back to WAITING on
//! a fresh board; no winner is declared for an abandoned game.

use crate::{
    Board, BoardSize, Color, GameError, GameSnapshot, Outcome, ParticipantId, SessionId,
    SessionStatus,
};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument, warn};

/// Seats per session.
pub const MAX_PARTICIPANTS: usize = 2;

/// A client seated in a session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Participant {
    /// Transport-assigned identifier.
    id: ParticipantId,
    /// Display name.
    name: String,
    /// Colour assigned at join time.
    color: Color,
}

impl Participant {
    /// Creates a participant.
    pub fn new(id: ParticipantId, name: impl Into<String>, color: Color) -> Self {
        Self {
            id,
            name: name.into(),
            color,
        }
    }
}

/// Result of a successful join.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct JoinOutcome {
    /// Colour given to the joiner.
    color: Color,
    /// State after the join, for broadcast.
    snapshot: GameSnapshot,
}

/// Result of an accepted move.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct MoveOutcome {
    /// Landing row (0 = top).
    row: usize,
    /// Column played.
    column: usize,
    /// Colour that moved.
    color: Color,
    /// Set when this move ended the game.
    outcome: Option<Outcome>,
    /// State after the move, for broadcast.
    snapshot: GameSnapshot,
}

/// One room's game.
#[derive(Debug, Clone)]
pub struct GameSession {
    id: SessionId,
    board: Board,
    roster: Vec<Participant>,
    turn: Color,
    status: SessionStatus,
    outcome: Option<Outcome>,
    moves: usize,
}

impl GameSession {
    /// Creates a session in WAITING with the creator seated as `PlayerA`.
    #[instrument(skip(creator_name))]
    pub fn new(
        id: SessionId,
        size: BoardSize,
        creator_id: ParticipantId,
        creator_name: impl Into<String>,
    ) -> Self {
        let creator = Participant::new(creator_id, creator_name, Color::PlayerA);
        info!(session_id = %id, creator = %creator.name, "Creating game session");
        Self {
            id,
            board: Board::new(size),
            roster: vec![creator],
            turn: Color::PlayerA,
            status: SessionStatus::Waiting,
            outcome: None,
            moves: 0,
        }
    }

    /// Session identifier.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Seated participants in seat order.
    pub fn roster(&self) -> &[Participant] {
        &self.roster
    }

    /// Colour that moves next.
    pub fn current_turn(&self) -> Color {
        self.turn
    }

    /// Lifecycle status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// How the game ended, once GAME_OVER.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Pieces placed in the current game.
    pub fn moves(&self) -> usize {
        self.moves
    }

    /// True while a seat is free.
    pub fn is_joinable(&self) -> bool {
        self.roster.len() < MAX_PARTICIPANTS
    }

    /// True when nobody is seated.
    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    /// Name shown in the lobby: the longest-seated participant.
    pub fn creator_name(&self) -> Option<&str> {
        self.roster.first().map(|p| p.name.as_str())
    }

    /// Looks up a seated participant.
    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.roster.iter().find(|p| p.id == id)
    }

    /// Seats a second participant and starts play.
    #[instrument(skip(self, name), fields(session_id = %self.id))]
    pub fn join(
        &mut self,
        participant_id: ParticipantId,
        name: impl Into<String>,
    ) -> Result<JoinOutcome, GameError> {
        if self.participant(participant_id).is_some() {
            warn!(%participant_id, "Participant already seated");
            return Err(GameError::AlreadySeated(participant_id));
        }
        if !self.is_joinable() {
            warn!(%participant_id, "Session already has 2 participants");
            return Err(GameError::SessionFull(self.id));
        }

        let color = Color::iter()
            .find(|c| self.roster.iter().all(|p| p.color != *c))
            .ok_or(GameError::SessionFull(self.id))?;

        let participant = Participant::new(participant_id, name, color);
        info!(%participant_id, name = %participant.name, %color, "Participant joined");
        self.roster.push(participant);
        self.roster.sort_by_key(|p| p.color == Color::PlayerB);
        self.status = SessionStatus::Playing;

        Ok(JoinOutcome {
            color,
            snapshot: self.snapshot(),
        })
    }

    /// Validates and applies a move.
    ///
    /// Checks run in order: session playing, participant seated, their
    /// turn, column in range, column not full. Nothing changes unless all
    /// pass.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn apply_move(
        &mut self,
        participant_id: ParticipantId,
        column: i64,
    ) -> Result<MoveOutcome, GameError> {
        if self.status != SessionStatus::Playing {
            debug!(status = %self.status, "Move outside of play");
            return Err(GameError::GameNotInProgress(self.id));
        }

        let color = self
            .participant(participant_id)
            .map(|p| p.color)
            .ok_or_else(|| {
                warn!(%participant_id, "Unknown participant attempted move");
                GameError::UnknownParticipant(participant_id)
            })?;

        if color != self.turn {
            warn!(%participant_id, expected = %self.turn, actual = %color, "Move out of turn");
            return Err(GameError::NotYourTurn(participant_id));
        }

        let col = usize::try_from(column).map_err(|_| GameError::ColumnOutOfRange {
            column,
            columns: self.board.column_count(),
        })?;
        let row = self.board.drop_piece(col, color).map_err(|e| {
            warn!(column, error = %e, "Rejected drop");
            e
        })?;
        self.moves += 1;

        let outcome = if let Some(winner) = self.board.check_win(row, col) {
            Some(Outcome::Winner(winner))
        } else if self.board.is_full() {
            Some(Outcome::Draw)
        } else {
            self.turn = self.turn.opponent();
            None
        };

        if let Some(outcome) = outcome {
            self.status = SessionStatus::GameOver;
            self.outcome = Some(outcome);
            info!(%outcome, moves = self.moves, "Game over");
        }
        debug!(row, column = col, %color, "Move applied\n{}", self.board.display());

        Ok(MoveOutcome {
            row,
            column: col,
            color,
            outcome,
            snapshot: self.snapshot(),
        })
    }

    /// Unseats a participant and returns them.
    ///
    /// If someone remains, the session resets to WAITING on an empty board.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn leave(&mut self, participant_id: ParticipantId) -> Result<Participant, GameError> {
        let pos = self
            .roster
            .iter()
            .position(|p| p.id == participant_id)
            .ok_or(GameError::UnknownParticipant(participant_id))?;
        let departed = self.roster.remove(pos);
        info!(%participant_id, remaining = self.roster.len(), "Participant left");

        if !self.roster.is_empty() {
            self.reset();
        }
        Ok(departed)
    }

    fn reset(&mut self) {
        self.board = Board::new(self.board.size());
        self.turn = Color::PlayerA;
        self.status = SessionStatus::Waiting;
        self.outcome = None;
        self.moves = 0;
        debug!("Session reset to waiting");
    }

    /// Copies the current state for broadcast.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::new(
            self.id,
            self.board.rows(),
            self.turn,
            self.roster.clone(),
            self.status,
            self.outcome.and_then(|o| o.winner()),
            self.moves,
        )
    }
}
