//! Full-board win scan.

use crate::board::CONNECT;
use crate::{Board, Cell, Color};
use tracing::instrument;

/// Scans every four-cell window on the board.
///
/// Returns the colour of the first complete line found, scanning rows top
/// to bottom, or `None`.
#[instrument(skip(board))]
pub fn scan_winner(board: &Board) -> Option<Color> {
    const STEPS: [(usize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

    for row in 0..board.row_count() {
        for col in 0..board.column_count() {
            let Some(Cell::Occupied(color)) = board.get(row, col) else {
                continue;
            };
            for (dr, dc) in STEPS {
                let complete = (1..CONNECT).all(|k| {
                    let Some(c) = col.checked_add_signed(dc * k as isize) else {
                        return false;
                    };
                    board.get(row + dr * k, c) == Some(Cell::Occupied(color))
                });
                if complete {
                    return Some(color);
                }
            }
        }
    }

    None
}
