//! Error types shared by the game model, the strategies and the engine.
//!
//! Running out of legal moves is *not* an error: it is the regular end of the
//! game and is signalled by an empty move list or `None` from
//! [`crate::strategy::Strategy::decide`].

use thiserror::Error;

use crate::game::{Move, Player};

/// Why a move is not in the legal move set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalReason {
    /// The coordinates are outside of the board.
    OutOfBounds,
    /// The cell was claimed earlier in the game.
    Claimed,
    /// The cell shares neither the row nor the column of the previous move.
    NotInBand,
}

/// A move that is not in [`crate::game::available_moves`] was applied.
///
/// This indicates a bug in the caller or in a strategy and has to abort the
/// game step.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("illegal move {next_move}: {reason:?}")]
pub struct IllegalMoveError {
    /// The rejected move.
    pub next_move: Move,
    /// The violated rule.
    pub reason: IllegalReason,
}

/// An unknown strategy identifier was requested.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error(
    "unknown strategy '{name}', expected one of: random, greedy, safe_choice, MCTS, minimax"
)]
pub struct ConfigurationError {
    /// The identifier as it was received.
    pub name: String,
}

/// Main error type of the crate.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    #[allow(missing_docs)]
    IllegalMove(#[from] IllegalMoveError),

    #[error(transparent)]
    #[allow(missing_docs)]
    Configuration(#[from] ConfigurationError),

    /// Board text could not be parsed or is not square.
    #[error("invalid board: {0}")]
    InvalidBoard(String),

    /// Engine option is unknown or its value is malformed.
    #[error("invalid option '{option}': {message}")]
    InvalidOption {
        #[allow(missing_docs)]
        option: String,
        #[allow(missing_docs)]
        message: String,
    },

    /// A strategy passed although legal moves were available.
    #[error("player {player} returned no move while legal moves remain")]
    MissingMove {
        #[allow(missing_docs)]
        player: Player,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let error = Error::from(IllegalMoveError {
            next_move: Move::new(0, 3),
            reason: IllegalReason::NotInBand,
        });
        assert_eq!(error.to_string(), "illegal move 0 3: NotInBand");

        let error = Error::from(ConfigurationError {
            name: "alphazero".to_string(),
        });
        assert!(error.to_string().starts_with("unknown strategy 'alphazero'"));
    }
}
