//! Draw detection.

use super::win::scan_winner;
use crate::Board;
use tracing::instrument;

/// A full board with no line of four.
#[instrument(skip(board))]
pub fn is_draw(board: &Board) -> bool {
    board.is_full() && scan_winner(board).is_none()
}
