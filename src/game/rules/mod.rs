//! Pure rule evaluation for tic-tac-toe boards.
//!
//! These functions are deterministic and side-effect-free; they are safe to
//! call without synchronization.

mod draw;
mod win;

pub use draw::{is_draw, is_full};
pub use win::check_winner;
