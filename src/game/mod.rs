//! Board types and rule evaluation.

mod board;
pub mod rules;

pub use board::{Board, Cell, InvalidMove, Mark};
