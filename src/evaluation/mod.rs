//! This module implements "static" evaluation, i.e. predicting how good a
//! position is for one of the players without looking further ahead with
//! [`crate::search`].
//!
//! The evaluation is a weighted sum of three terms, all from the perspective
//! of a fixed player (the one who started the search):
//!
//! 1. Score difference.
//! 2. Mobility: the number of legal moves of the side to move, counted for
//!    that side and against the other.
//! 3. Potential: the sum of the unclaimed values in the row and the column of
//!    the last pick, i.e. what is up for grabs right now.

use crate::game::{GameState, Player};

/// Relative weights of the evaluation terms.
#[derive(Clone, Debug, PartialEq)]
pub struct Weights {
    /// Weight of the score difference.
    pub score: f64,
    /// Weight of the mobility difference.
    pub mobility: f64,
    /// Weight of the row and column potential around the last move.
    pub potential: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            score: 1.0,
            mobility: 0.25,
            potential: 0.05,
        }
    }
}

/// Evaluates `state` for `perspective`. Positive values favor `perspective`.
#[must_use]
pub fn evaluate(state: &GameState, perspective: Player, weights: &Weights) -> f64 {
    evaluate_with_mobility(state, state.available_moves().len(), perspective, weights)
}

/// Same as [`evaluate`] when the number of legal moves at `state` is already
/// known.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn evaluate_with_mobility(
    state: &GameState,
    mobility: usize,
    perspective: Player,
    weights: &Weights,
) -> f64 {
    let score = state.scores().advantage(perspective) as f64;
    let mobility = if state.to_move() == perspective {
        mobility as f64
    } else {
        -(mobility as f64)
    };
    weights.score * score + weights.mobility * mobility + weights.potential * potential(state) as f64
}

/// Unclaimed value left in the row and the column of the last move.
fn potential(state: &GameState) -> u64 {
    state.last_move().map_or(0, |last| {
        let board = state.board();
        board
            .row_values(last.row)
            .chain(board.column_values(last.column))
            .map(u64::from)
            .sum()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Board, Move, Scores};

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn fresh_board() {
        let state = GameState::new("1,2\n3,4".parse().unwrap());
        // No score, four moves for First, no last move.
        assert!(approx_eq(
            evaluate(&state, Player::First, &Weights::default()),
            1.0
        ));
        assert!(approx_eq(
            evaluate(&state, Player::Second, &Weights::default()),
            -1.0
        ));
    }

    #[test]
    fn all_terms() {
        let board: Board = "-,5,7\n3,6,9\n4,4,2".parse().unwrap();
        let state = GameState::from_position(board, Some(Move::new(0, 0)), Scores::new(1, 0));
        // Second to move with moves (0,1), (0,2), (1,0), (2,0); potential is
        // 5 + 7 + 3 + 4.
        assert_eq!(state.to_move(), Player::Second);
        let value = evaluate(&state, Player::First, &Weights::default());
        assert!(approx_eq(value, 1.0 - 0.25 * 4.0 + 0.05 * 19.0));
        let value = evaluate(&state, Player::Second, &Weights::default());
        assert!(approx_eq(value, -1.0 + 0.25 * 4.0 + 0.05 * 19.0));
    }

    #[test]
    fn custom_weights() {
        let board: Board = "-,5\n3,6".parse().unwrap();
        let state = GameState::from_position(board, Some(Move::new(0, 0)), Scores::new(8, 2));
        let weights = Weights {
            score: 2.0,
            mobility: 0.0,
            potential: 0.0,
        };
        assert!(approx_eq(evaluate(&state, Player::First, &weights), 12.0));
    }
}
