//! Self-play: runs a complete game between two strategies without any user
//! interface.
//!
//! The harness owns the authoritative [`GameState`]. Strategies only see
//! copies of the board and every returned move is validated before it is
//! applied, so a misbehaving strategy surfaces as an [`Error`] instead of a
//! corrupted game.

use std::fmt;

use tracing::{debug, info};

use crate::error::Error;
use crate::game::{Board, GameState, Move, Player, Scores, Value};
use crate::strategy::Strategy;

/// Final result of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The player with the strictly higher score.
    Winner(Player),
    /// Both scores are equal.
    Tie,
}

impl Outcome {
    #[must_use]
    #[allow(missing_docs)]
    pub fn from_scores(scores: Scores) -> Self {
        let first = scores[Player::First];
        let second = scores[Player::Second];
        match first.cmp(&second) {
            std::cmp::Ordering::Greater => Self::Winner(Player::First),
            std::cmp::Ordering::Less => Self::Winner(Player::Second),
            std::cmp::Ordering::Equal => Self::Tie,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Winner(player) => write!(f, "{player}"),
            Self::Tie => write!(f, "tie"),
        }
    }
}

/// A single claimed cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ply {
    #[allow(missing_docs)]
    pub player: Player,
    #[allow(missing_docs)]
    pub next_move: Move,
    /// Value added to the player's score.
    pub value: Value,
}

impl fmt::Display for Ply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.player, self.next_move, self.value)
    }
}

/// Everything that happened in a finished game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameRecord {
    /// Claimed cells in the order they were played.
    pub plies: Vec<Ply>,
    /// Final scores.
    pub scores: Scores,
    #[allow(missing_docs)]
    pub outcome: Outcome,
}

/// Plays a new game on `board` until the player to move has no legal move.
///
/// # Errors
///
/// Fails with [`Error::IllegalMove`] if a strategy returns a move outside of
/// the legal set and with [`Error::MissingMove`] if it returns `None` while
/// legal moves remain.
pub fn play_game(
    board: Board,
    first: &mut dyn Strategy,
    second: &mut dyn Strategy,
) -> Result<GameRecord, Error> {
    let mut state = GameState::new(board);
    let mut plies = Vec::new();
    let outcome = play_out(&mut state, [first, second], |ply| plies.push(*ply))?;
    Ok(GameRecord {
        plies,
        scores: state.scores(),
        outcome,
    })
}

/// Continues the game in `state` to the end. `strategies` are indexed by
/// [`Player::index`] and `on_ply` observes every applied move.
///
/// # Errors
///
/// Same as [`play_game`]. The state keeps every move applied before the
/// failure.
pub fn play_out(
    state: &mut GameState,
    mut strategies: [&mut dyn Strategy; 2],
    mut on_ply: impl FnMut(&Ply),
) -> Result<Outcome, Error> {
    while !state.is_terminal() {
        let player = state.to_move();
        let strategy = &mut strategies[player.index()];
        let next_move = strategy
            .decide(state.board(), state.last_move(), state.scores())
            .ok_or(Error::MissingMove { player })?;
        let value = state.play(next_move)?;
        let ply = Ply {
            player,
            next_move,
            value,
        };
        debug!(%ply, "applied move");
        on_ply(&ply);
    }
    let outcome = Outcome::from_scores(state.scores());
    info!(scores = %state.scores(), %outcome, "game finished");
    Ok(outcome)
}
