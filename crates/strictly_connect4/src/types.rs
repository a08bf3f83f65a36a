//! Core domain types for Connect-4.

use serde::{Deserialize, Serialize};

/// Piece colour, fixed per participant at join time.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum Color {
    /// First joiner, moves first.
    #[serde(rename = "player1")]
    #[display("player1")]
    PlayerA,
    /// Second joiner.
    #[serde(rename = "player2")]
    #[display("player2")]
    PlayerB,
}

impl Color {
    /// Returns the other colour.
    pub fn opponent(self) -> Self {
        match self {
            Color::PlayerA => Color::PlayerB,
            Color::PlayerB => Color::PlayerA,
        }
    }

    /// Single-character symbol used in text renderings.
    pub fn symbol(self) -> char {
        match self {
            Color::PlayerA => 'X',
            Color::PlayerB => 'O',
        }
    }
}

/// A single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// No piece.
    #[default]
    Empty,
    /// Occupied by a piece of the given colour.
    Occupied(Color),
}

impl Cell {
    /// Returns the occupying colour, if any.
    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(color) => Some(color),
        }
    }

    /// True when no piece sits in the cell.
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Transport-assigned identifier of a connected participant.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct ParticipantId(pub u64);

/// Identifier of a session within the room directory.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct SessionId(pub u64);

/// Lifecycle status of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "camelCase")]
pub enum SessionStatus {
    /// One participant seated, board empty.
    #[display("waiting")]
    Waiting,
    /// Two participants, turns alternate.
    #[display("playing")]
    Playing,
    /// Terminal: win or draw recorded.
    #[display("gameOver")]
    GameOver,
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    /// Four in a line for the given colour.
    Winner(Color),
    /// Board filled with no line.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Color> {
        match self {
            Outcome::Winner(color) => Some(*color),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(color) => write!(f, "{} wins", color),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}
