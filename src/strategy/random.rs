//! Baseline strategy: any legal cell with equal probability.

use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use crate::game::{available_moves, Board, Move, Scores};
use crate::strategy::Strategy;

/// Picks a uniformly random legal move. There is no lookahead; the only state
/// is the random number generator.
#[derive(Debug)]
pub struct RandomStrategy {
    rng: ChaCha20Rng,
}

impl RandomStrategy {
    #[must_use]
    #[allow(missing_docs)]
    pub const fn new(rng: ChaCha20Rng) -> Self {
        Self { rng }
    }
}

impl Strategy for RandomStrategy {
    fn decide(&mut self, board: &Board, last_move: Option<Move>, _scores: Scores) -> Option<Move> {
        let choice = available_moves(board, last_move)
            .choose(&mut self.rng)
            .copied();
        debug!(?choice, "random strategy decided");
        choice
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn legal_or_none() {
        let mut strategy = RandomStrategy::new(ChaCha20Rng::seed_from_u64(1));
        let board: Board = "1,2,3\n4,5,6\n7,8,9".parse().unwrap();
        let last_move = Some(Move::new(1, 1));
        for _ in 0..50 {
            let choice = strategy
                .decide(&board, last_move, Scores::default())
                .unwrap();
            assert!(available_moves(&board, last_move).contains(&choice));
        }

        let board: Board = "-,-\n-,-".parse().unwrap();
        assert_eq!(strategy.decide(&board, None, Scores::default()), None);
    }
}
