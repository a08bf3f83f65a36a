//! Whole-board rule evaluation.
//!
//! [`Board::check_win`](crate::Board::check_win) is the hot path during
//! play; the functions here scan every window and are used where the last
//! move is not known, such as validating an arbitrary position.

pub mod draw;
pub mod win;

pub use draw::is_draw;
pub use win::scan_winner;
