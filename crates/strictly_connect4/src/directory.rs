//! Process-wide registry of game sessions.

use crate::{
    BoardSize, GameError, GameSession, GameSnapshot, JoinOutcome, MoveOutcome, Participant,
    ParticipantId, RoomSummary, SessionId,
};
use derive_getters::Getters;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// Why a participant left a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepartureReason {
    /// Explicit leave request.
    Left,
    /// Connection lost.
    Disconnected,
}

/// Effect of a participant leaving a session.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Departure {
    /// Session that was left.
    session_id: SessionId,
    /// Who left.
    departed: Participant,
    /// Who is still seated, to be notified.
    remaining: Vec<Participant>,
    /// Leave or disconnect.
    reason: DepartureReason,
    /// State after the departure; `None` once the room is torn down.
    snapshot: Option<GameSnapshot>,
}

impl Departure {
    /// True when the departure emptied and removed the room.
    pub fn room_closed(&self) -> bool {
        self.snapshot.is_none()
    }
}

/// Registry mapping room identifiers to sessions.
///
/// Identifiers are sequential from 1 and never reused while the directory
/// lives. Iteration follows identifier order, which is creation order.
///
/// The directory is not synchronised; its owner must serialise every
/// mutation.
#[derive(Debug, Clone)]
pub struct RoomDirectory {
    board_size: BoardSize,
    next_id: u64,
    sessions: BTreeMap<SessionId, GameSession>,
}

impl RoomDirectory {
    /// Creates an empty directory whose sessions use `board_size`.
    #[instrument]
    pub fn new(board_size: BoardSize) -> Self {
        info!(
            rows = board_size.rows(),
            columns = board_size.columns(),
            "Creating room directory"
        );
        Self {
            board_size,
            next_id: 1,
            sessions: BTreeMap::new(),
        }
    }

    /// Board dimensions for new sessions.
    pub fn board_size(&self) -> BoardSize {
        self.board_size
    }

    /// Number of registered sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// True when no session is registered.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Allocates and registers a session with the creator as `PlayerA`.
    #[instrument(skip(self, creator_name))]
    pub fn create(
        &mut self,
        creator_id: ParticipantId,
        creator_name: impl Into<String>,
    ) -> SessionId {
        let id = SessionId(self.next_id);
        self.next_id += 1;
        let session = GameSession::new(id, self.board_size, creator_id, creator_name);
        self.sessions.insert(id, session);
        info!(session_id = %id, total = self.sessions.len(), "Registered session");
        id
    }

    /// Looks up a session.
    pub fn get(&self, id: SessionId) -> Option<&GameSession> {
        self.sessions.get(&id)
    }

    /// Looks up a session for mutation.
    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut GameSession> {
        self.sessions.get_mut(&id)
    }

    /// Deregisters a session. Removing an absent id is a no-op.
    #[instrument(skip(self))]
    pub fn remove(&mut self, id: SessionId) -> Option<GameSession> {
        let removed = self.sessions.remove(&id);
        if removed.is_some() {
            info!(session_id = %id, "Removed session");
        } else {
            debug!(session_id = %id, "Remove of absent session ignored");
        }
        removed
    }

    /// Joinable sessions in creation order, built fresh on every call.
    pub fn list(&self) -> Vec<RoomSummary> {
        self.sessions
            .values()
            .filter(|s| s.is_joinable())
            .filter_map(|s| {
                s.creator_name()
                    .map(|name| RoomSummary::new(s.id(), name.to_string(), s.status()))
            })
            .collect()
    }

    /// Seats `participant_id` in an existing session.
    #[instrument(skip(self, name))]
    pub fn join(
        &mut self,
        id: SessionId,
        participant_id: ParticipantId,
        name: impl Into<String>,
    ) -> Result<JoinOutcome, GameError> {
        self.session_mut(id)?.join(participant_id, name)
    }

    /// Applies a move in a session.
    #[instrument(skip(self))]
    pub fn apply_move(
        &mut self,
        id: SessionId,
        participant_id: ParticipantId,
        column: i64,
    ) -> Result<MoveOutcome, GameError> {
        self.session_mut(id)?.apply_move(participant_id, column)
    }

    /// Unseats a participant on request, tearing down an emptied session.
    #[instrument(skip(self))]
    pub fn leave(
        &mut self,
        id: SessionId,
        participant_id: ParticipantId,
    ) -> Result<Departure, GameError> {
        self.depart(id, participant_id, DepartureReason::Left)
    }

    /// Unseats a participant whose connection dropped.
    #[instrument(skip(self))]
    pub fn disconnect(
        &mut self,
        id: SessionId,
        participant_id: ParticipantId,
    ) -> Result<Departure, GameError> {
        self.depart(id, participant_id, DepartureReason::Disconnected)
    }

    fn depart(
        &mut self,
        id: SessionId,
        participant_id: ParticipantId,
        reason: DepartureReason,
    ) -> Result<Departure, GameError> {
        let session = self.session_mut(id)?;
        let departed = session.leave(participant_id)?;
        let remaining = session.roster().to_vec();

        let snapshot = if session.is_empty() {
            self.remove(id);
            None
        } else {
            Some(session.snapshot())
        };

        Ok(Departure {
            session_id: id,
            departed,
            remaining,
            reason,
            snapshot,
        })
    }

    fn session_mut(&mut self, id: SessionId) -> Result<&mut GameSession, GameError> {
        self.sessions
            .get_mut(&id)
            .ok_or(GameError::SessionNotFound(id))
    }
}

impl Default for RoomDirectory {
    fn default() -> Self {
        Self::new(BoardSize::default())
    }
}
