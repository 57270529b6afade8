//! Strategy that always takes the most valuable legal cell.

use tracing::debug;

use crate::game::{available_moves, highest_value, Board, Move, Scores};
use crate::strategy::Strategy;

/// Picks the legal move with the highest immediate value.
///
/// Ties go to the top-most, then left-most cell.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyStrategy;

impl Strategy for GreedyStrategy {
    fn decide(&mut self, board: &Board, last_move: Option<Move>, _scores: Scores) -> Option<Move> {
        let choice = highest_value(board, &available_moves(board, last_move));
        debug!(?choice, "greedy strategy decided");
        choice
    }
}
