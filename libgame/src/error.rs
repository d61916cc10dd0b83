use thiserror::Error;

use crate::pos::Position;

/// Problems with how a board or rule was set up. These are only produced while constructing
/// things, a board that exists is always valid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Board size must be positive.")]
    InvalidSize,

    #[error("Board size {0} is too large, the limit is {max}.", max = crate::board::MAX_SIZE)]
    TooLarge(usize),

    #[error("Invalid neighbour range {low}..={high}.")]
    InvalidRange { low: usize, high: usize },

    #[error("Neighbour count {0} is outside 0..=8.")]
    CountOutOfRange(usize),

    #[error("Invalid rule notation: {0:?}.")]
    InvalidNotation(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Position {position} is outside the {size}x{size} board.")]
pub struct OutOfBounds {
    pub position: Position,
    pub size: usize,
}
