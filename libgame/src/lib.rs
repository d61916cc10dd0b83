//! Bounded, square Life-like cellular automaton.
//!
//! A [`Board`] owns its cells, a neighbour topology resolved once from the grid geometry, and the
//! [`Rule`] deciding which neighbour counts keep a cell alive or bring it to life.

pub use board::{Board, Cells, GenerationObserver, MAX_SIZE};
pub use cell::Cell;
pub use error::{ConfigError, OutOfBounds};
pub use pos::Position;
pub use rule::{Condition, Rule};

pub mod board;
pub mod cell;
pub mod error;
pub mod pos;
pub mod rule;
