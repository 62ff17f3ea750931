//! Error types returned by the move engine and the CLI configuration

use crate::WIDTH;

/// A move that cannot be applied to a position
///
/// Always recoverable: the state the move was attempted on is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IllegalMove {
    #[error("the game is already over")]
    GameOver,

    #[error("column {column} out of range, columns must be between 0 and {max}", max = WIDTH - 1)]
    ColumnOutOfRange { column: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },
}

/// Errors raised while validating command line configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("search depth {0} out of range, must be between 1 and {max}", max = crate::MAX_MOVES)]
    Depth(usize),

    #[error("a match needs at least one game")]
    NoGames,

    #[error("{0} opening plies would fill the board")]
    OpeningPlies(usize),
}
