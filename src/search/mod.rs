//! Lookahead strategies: [Monte Carlo Tree Search] and [alpha-beta] minimax.
//!
//! Both explore future positions by applying moves to private copies of the
//! [`GameState`](crate::game::GameState) with the same transition the real
//! game uses, and discard everything they built once the decision is made.
//!
//! [Monte Carlo Tree Search]: https://en.wikipedia.org/wiki/Monte_Carlo_tree_search
//! [alpha-beta]: https://en.wikipedia.org/wiki/Alpha%E2%80%93beta_pruning

use std::time::{Duration, Instant};

mod mcts;
mod minimax;
mod tree;

pub use mcts::{MctsConfig, MctsStats, MctsStrategy};
pub use minimax::{dynamic_depth, AlphaBetaConfig, AlphaBetaStats, AlphaBetaStrategy};

/// Search depth in plies.
pub type Depth = u8;

/// Stops an anytime search once it ran out of iterations or time. The budget
/// is only checked between iterations, so the last iteration may overshoot the
/// time limit.
#[derive(Debug)]
pub(crate) struct Limiter {
    timer: Instant,
    iterations: usize,
    time: Duration,
}

impl Limiter {
    pub(crate) fn new(iterations: usize, time: Duration) -> Self {
        Self {
            timer: Instant::now(),
            iterations,
            time,
        }
    }

    /// Returns `true` if another iteration fits into the budget.
    pub(crate) fn allows(&self, completed: usize) -> bool {
        completed < self.iterations && self.timer.elapsed() < self.time
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.timer.elapsed()
    }
}
