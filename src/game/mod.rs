//! Rules of the row-column game.
//!
//! Two players take turns claiming cells of a square board of numbers. The
//! value of a claimed cell is added to the score of the player who claimed it.
//! The first pick is unrestricted; every later pick has to share the row or
//! the column of the opponent's previous pick. The game ends when the player to
//! move has no legal cell and the higher score wins.

mod board;
mod core;
mod state;

pub use self::board::{Board, Cell};
pub use self::core::{Move, Player, Score, Scores, Value};
pub use self::state::{available_moves, check_move, highest_value, GameState};
