//! Lobby actor: the single writer over the room directory.
//!
//! One task owns the [`RoomDirectory`] and the table of live connections and
//! handles [`LobbyCommand`]s one at a time, so no two intents ever touch a
//! session concurrently. Connection tasks talk to it through a
//! [`LobbyHandle`].
//!
//! Outbound messages go through per-connection unbounded channels. A send
//! to a connection that has gone away is logged and otherwise ignored; it
//! never undoes a committed change.

use crate::error::LobbyClosed;
use crate::protocol::{ClientMessage, ServerMessage};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use strictly_connect4::{
    Color, Departure, DepartureReason, GameError, Participant, ParticipantId, RoomDirectory,
    RoomSummary, SessionId,
};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

/// Sending half of a connection's outbound queue.
pub type Outbox = mpsc::UnboundedSender<ServerMessage>;

/// Work item for the lobby task.
#[derive(Debug)]
pub enum LobbyCommand {
    /// A connection opened.
    Connect {
        /// Identifier assigned to the connection.
        participant_id: ParticipantId,
        /// Where to deliver its messages.
        outbox: Outbox,
    },
    /// A connection sent an intent.
    Intent {
        /// Sender.
        participant_id: ParticipantId,
        /// Parsed intent.
        message: ClientMessage,
    },
    /// A connection closed.
    Disconnect {
        /// Closed connection.
        participant_id: ParticipantId,
    },
    /// Read-only room listing for the REST endpoint.
    ListRooms {
        /// Reply channel.
        reply: oneshot::Sender<Vec<RoomSummary>>,
    },
}

#[derive(Debug)]
struct Connection {
    outbox: Outbox,
    name: Option<String>,
    room: Option<SessionId>,
}

/// Lobby state: rooms plus connected clients.
#[derive(Debug)]
pub struct Lobby {
    rooms: RoomDirectory,
    connections: HashMap<ParticipantId, Connection>,
}

impl Lobby {
    /// Creates a lobby over an existing directory.
    #[instrument(skip(rooms))]
    pub fn new(rooms: RoomDirectory) -> Self {
        info!("Creating lobby");
        Self {
            rooms,
            connections: HashMap::new(),
        }
    }

    /// The room directory.
    pub fn rooms(&self) -> &RoomDirectory {
        &self.rooms
    }

    /// Number of live connections.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Room the connection is seated in.
    pub fn room_of(&self, participant_id: ParticipantId) -> Option<SessionId> {
        self.connections.get(&participant_id).and_then(|c| c.room)
    }

    /// Processes commands until every [`LobbyHandle`] is dropped.
    pub async fn run(mut self, mut commands: mpsc::Receiver<LobbyCommand>) {
        info!("Lobby running");
        while let Some(command) = commands.recv().await {
            self.handle(command);
        }
        info!(rooms = self.rooms.len(), "Lobby stopped");
    }

    /// Handles one command to completion.
    pub fn handle(&mut self, command: LobbyCommand) {
        match command {
            LobbyCommand::Connect {
                participant_id,
                outbox,
            } => self.connect(participant_id, outbox),
            LobbyCommand::Intent {
                participant_id,
                message,
            } => self.dispatch(participant_id, message),
            LobbyCommand::Disconnect { participant_id } => self.disconnect(participant_id),
            LobbyCommand::ListRooms { reply } => {
                if reply.send(self.rooms.list()).is_err() {
                    debug!("Room list requester went away");
                }
            }
        }
    }

    #[instrument(skip(self, outbox))]
    fn connect(&mut self, participant_id: ParticipantId, outbox: Outbox) {
        info!(total = self.connections.len() + 1, "Client connected");
        self.connections.insert(
            participant_id,
            Connection {
                outbox,
                name: None,
                room: None,
            },
        );
    }

    #[instrument(skip(self, message))]
    fn dispatch(&mut self, participant_id: ParticipantId, message: ClientMessage) {
        if !self.connections.contains_key(&participant_id) {
            warn!("Intent from unregistered connection dropped");
            return;
        }
        debug!(?message, "Dispatching intent");

        match message {
            ClientMessage::EnterLobby { name } => self.enter_lobby(participant_id, name),
            ClientMessage::CreateRoom { name } => self.create_room(participant_id, name),
            ClientMessage::JoinRoom { room_id, name } => {
                self.join_room(participant_id, room_id, name)
            }
            ClientMessage::MakeMove { room_id, column } => {
                self.make_move(participant_id, room_id, column)
            }
            ClientMessage::LeaveRoom { room_id } => self.leave_room(participant_id, room_id),
        }
    }

    fn enter_lobby(&mut self, participant_id: ParticipantId, name: String) {
        let name = self.resolve_name(participant_id, &name);
        info!(%participant_id, %name, "Entered lobby");
        self.send(
            participant_id,
            ServerMessage::AvailableRooms {
                rooms: self.rooms.list(),
            },
        );
    }

    /// Picks the name to seat a participant under and remembers it.
    ///
    /// A non-blank name in the frame wins; otherwise the name given on
    /// lobby entry is reused, falling back to `Player <id>`.
    fn resolve_name(&mut self, participant_id: ParticipantId, name: &str) -> String {
        let name = name.trim();
        let Some(conn) = self.connections.get_mut(&participant_id) else {
            return name.to_string();
        };
        if !name.is_empty() {
            conn.name = Some(name.to_string());
        }
        conn.name
            .get_or_insert_with(|| format!("Player {participant_id}"))
            .clone()
    }

    fn create_room(&mut self, participant_id: ParticipantId, name: String) {
        self.vacate_seat(participant_id);

        let name = self.resolve_name(participant_id, &name);
        let room_id = self.rooms.create(participant_id, name);
        if let Some(conn) = self.connections.get_mut(&participant_id) {
            conn.room = Some(room_id);
        }

        self.send(
            participant_id,
            ServerMessage::RoomCreated {
                room_id,
                color: Color::PlayerA,
            },
        );
        self.broadcast_rooms();
    }

    fn join_room(&mut self, participant_id: ParticipantId, room_id: SessionId, name: String) {
        // Validate the target before giving up any current seat.
        let precheck = match self.rooms.get(room_id) {
            None => Err(GameError::SessionNotFound(room_id)),
            Some(session) if session.participant(participant_id).is_some() => {
                Err(GameError::AlreadySeated(participant_id))
            }
            Some(session) if !session.is_joinable() => Err(GameError::SessionFull(room_id)),
            Some(_) => Ok(()),
        };
        if let Err(err) = precheck {
            warn!(%participant_id, %room_id, error = %err, "Join rejected");
            self.send(participant_id, ServerMessage::error(&err));
            return;
        }

        self.vacate_seat(participant_id);

        let name = self.resolve_name(participant_id, &name);
        match self.rooms.join(room_id, participant_id, name) {
            Ok(joined) => {
                if let Some(conn) = self.connections.get_mut(&participant_id) {
                    conn.room = Some(room_id);
                }
                let state = joined.snapshot().clone();
                self.broadcast(
                    state.participants(),
                    &ServerMessage::GameState {
                        state: state.clone(),
                    },
                );
                self.send(
                    participant_id,
                    ServerMessage::RoomJoined {
                        room_id,
                        color: *joined.color(),
                        state,
                    },
                );
                self.broadcast_rooms();
            }
            Err(err) => {
                warn!(%participant_id, %room_id, error = %err, "Join rejected");
                self.send(participant_id, ServerMessage::error(&err));
            }
        }
    }

    fn make_move(&mut self, participant_id: ParticipantId, room_id: SessionId, column: i64) {
        match self.rooms.apply_move(room_id, participant_id, column) {
            Ok(moved) => {
                let state = moved.snapshot();
                self.broadcast(
                    state.participants(),
                    &ServerMessage::GameState {
                        state: state.clone(),
                    },
                );
            }
            Err(err) if err.is_silent() => {
                debug!(%participant_id, %room_id, error = %err, "Move dropped");
            }
            Err(err @ GameError::SessionNotFound(_)) => {
                warn!(%participant_id, %room_id, error = %err, "Move for unknown room");
                self.send(participant_id, ServerMessage::error(&err));
            }
            Err(err) => {
                self.send(participant_id, ServerMessage::move_rejected(&err));
            }
        }
    }

    fn leave_room(&mut self, participant_id: ParticipantId, room_id: SessionId) {
        match self.rooms.leave(room_id, participant_id) {
            Ok(departure) => {
                self.clear_room(participant_id, room_id);
                self.notify_departure(&departure);
                self.broadcast_rooms();
            }
            Err(err) => {
                warn!(%participant_id, %room_id, error = %err, "Leave rejected");
                self.send(participant_id, ServerMessage::error(&err));
            }
        }
    }

    #[instrument(skip(self))]
    fn disconnect(&mut self, participant_id: ParticipantId) {
        let Some(conn) = self.connections.remove(&participant_id) else {
            debug!("Disconnect for unknown connection ignored");
            return;
        };
        info!(remaining = self.connections.len(), "Client disconnected");

        if let Some(room_id) = conn.room {
            match self.rooms.disconnect(room_id, participant_id) {
                Ok(departure) => {
                    self.notify_departure(&departure);
                    self.broadcast_rooms();
                }
                Err(err) => warn!(%room_id, error = %err, "Seat already gone"),
            }
        }
    }

    /// Leaves the connection's current room, if any, with the usual
    /// notifications.
    fn vacate_seat(&mut self, participant_id: ParticipantId) {
        if let Some(room_id) = self.room_of(participant_id) {
            debug!(%participant_id, %room_id, "Leaving current room first");
            self.leave_room(participant_id, room_id);
        }
    }

    fn clear_room(&mut self, participant_id: ParticipantId, room_id: SessionId) {
        if let Some(conn) = self.connections.get_mut(&participant_id)
            && conn.room == Some(room_id)
        {
            conn.room = None;
        }
    }

    fn notify_departure(&self, departure: &Departure) {
        let Some(state) = departure.snapshot().clone() else {
            return;
        };
        let message = match departure.reason() {
            DepartureReason::Left => ServerMessage::OpponentLeft { state },
            DepartureReason::Disconnected => ServerMessage::OpponentDisconnected { state },
        };
        self.broadcast(departure.remaining(), &message);
    }

    fn send(&self, participant_id: ParticipantId, message: ServerMessage) {
        let Some(conn) = self.connections.get(&participant_id) else {
            debug!(%participant_id, "No connection for outgoing message");
            return;
        };
        if conn.outbox.send(message).is_err() {
            debug!(%participant_id, "Outbox closed, message dropped");
        }
    }

    fn broadcast(&self, participants: &[Participant], message: &ServerMessage) {
        for participant in participants {
            self.send(*participant.id(), message.clone());
        }
    }

    fn broadcast_rooms(&self) {
        let rooms = self.rooms.list();
        debug!(joinable = rooms.len(), "Broadcasting room list");
        for participant_id in self.connections.keys() {
            self.send(
                *participant_id,
                ServerMessage::AvailableRooms {
                    rooms: rooms.clone(),
                },
            );
        }
    }
}

/// Cloneable front door to a running lobby task.
#[derive(Debug, Clone)]
pub struct LobbyHandle {
    commands: mpsc::Sender<LobbyCommand>,
    next_id: Arc<AtomicU64>,
}

impl LobbyHandle {
    /// Spawns the lobby task on the current tokio runtime.
    #[instrument(skip(rooms))]
    pub fn spawn(rooms: RoomDirectory, capacity: usize) -> Self {
        let (commands, receiver) = mpsc::channel(capacity);
        tokio::spawn(Lobby::new(rooms).run(receiver));
        Self {
            commands,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Registers a new connection and returns its identifier.
    pub async fn connect(&self, outbox: Outbox) -> Result<ParticipantId, LobbyClosed> {
        let participant_id = ParticipantId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.submit(LobbyCommand::Connect {
            participant_id,
            outbox,
        })
        .await?;
        Ok(participant_id)
    }

    /// Forwards an intent.
    pub async fn intent(
        &self,
        participant_id: ParticipantId,
        message: ClientMessage,
    ) -> Result<(), LobbyClosed> {
        self.submit(LobbyCommand::Intent {
            participant_id,
            message,
        })
        .await
    }

    /// Reports a closed connection.
    pub async fn disconnect(&self, participant_id: ParticipantId) -> Result<(), LobbyClosed> {
        self.submit(LobbyCommand::Disconnect { participant_id }).await
    }

    /// Fetches the joinable rooms.
    pub async fn list_rooms(&self) -> Result<Vec<RoomSummary>, LobbyClosed> {
        let (reply, response) = oneshot::channel();
        self.submit(LobbyCommand::ListRooms { reply }).await?;
        response.await.map_err(|_| LobbyClosed)
    }

    async fn submit(&self, command: LobbyCommand) -> Result<(), LobbyClosed> {
        self.commands.send(command).await.map_err(|_| {
            warn!("Lobby task is gone");
            LobbyClosed
        })
    }
}
