//! Strictly Connect4 - authoritative Connect-4 game core
//!
//! Pure, synchronous game logic with no I/O. A transport layer drives it
//! with client intents and broadcasts the snapshots it returns.
//!
//! # Architecture
//!
//! - **Board**: fixed-size grid, gravity drops, win and draw detection
//! - **Session**: per-room state machine (WAITING → PLAYING → GAME_OVER)
//! - **Directory**: registry of sessions with lobby listing and teardown
//!
//! # Example
//!
//! ```
//! use strictly_connect4::{BoardSize, ParticipantId, RoomDirectory, SessionStatus};
//!
//! let mut rooms = RoomDirectory::new(BoardSize::STANDARD);
//! let id = rooms.create(ParticipantId(1), "alice");
//! rooms.join(id, ParticipantId(2), "bob").unwrap();
//!
//! let result = rooms.apply_move(id, ParticipantId(1), 3).unwrap();
//! assert_eq!(*result.row(), 5);
//! assert_eq!(*result.snapshot().status(), SessionStatus::Playing);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod directory;
mod error;
pub mod rules;
mod session;
mod snapshot;
mod types;

pub use board::{Board, BoardSize, CONNECT, MAX_DIMENSION, MIN_DIMENSION};
pub use directory::{Departure, DepartureReason, RoomDirectory};
pub use error::GameError;
pub use session::{GameSession, JoinOutcome, MAX_PARTICIPANTS, MoveOutcome, Participant};
pub use snapshot::{GameSnapshot, RoomSummary};
pub use types::{Cell, Color, Outcome, ParticipantId, SessionId, SessionStatus};
