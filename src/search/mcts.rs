//! Monte Carlo Tree Search with UCB1 selection.
//!
//! Every iteration performs the four classic steps:
//!
//! 1. Selection: starting from the root, follow the child with the highest
//!    UCB1 value while the node is fully expanded and not terminal.
//! 2. Expansion: add a child for the highest-valued untried move.
//! 3. Simulation: play the game out from the new node, half of the plies at
//!    random and half greedily.
//! 4. Backpropagation: add the normalized score difference to every node on
//!    the path to the root.
//!
//! The move visited most often at the root is played.

use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, trace};

use crate::game::{highest_value, Board, GameState, Move, Scores};
use crate::search::tree::{NodeIndex, Tree};
use crate::search::Limiter;
use crate::strategy::Strategy;

/// Parameters of the MCTS search.
#[derive(Clone, Debug, PartialEq)]
pub struct MctsConfig {
    /// Wall-clock budget per decision.
    pub time_limit: Duration,
    /// Maximum number of iterations per decision.
    pub max_iterations: usize,
    /// Exploration constant `C` of UCB1.
    pub exploration: f64,
    /// Probability of a uniformly random move on each rollout ply. The
    /// remaining plies take the highest value.
    pub random_rollout_probability: f64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(5),
            max_iterations: 10_000,
            exploration: std::f64::consts::SQRT_2,
            random_rollout_probability: 0.5,
        }
    }
}

impl MctsConfig {
    /// Builder pattern: set the time budget.
    #[must_use]
    pub const fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    /// Builder pattern: set the iteration budget.
    #[must_use]
    pub const fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Builder pattern: set the UCB1 exploration constant.
    #[must_use]
    pub const fn with_exploration(mut self, exploration: f64) -> Self {
        self.exploration = exploration;
        self
    }

    /// Builder pattern: set the share of random rollout moves.
    #[must_use]
    pub const fn with_random_rollout_probability(mut self, probability: f64) -> Self {
        self.random_rollout_probability = probability;
        self
    }
}

/// Outcome of a single MCTS decision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MctsStats {
    /// The chosen move, `None` if there is no legal move.
    pub best_move: Option<Move>,
    /// Number of completed iterations.
    pub iterations: usize,
    /// Number of nodes in the tree, including the root.
    pub nodes: usize,
    /// Visits of the chosen root child.
    pub visits: u32,
}

/// Anytime MCTS player bounded by time and iterations.
#[derive(Debug)]
pub struct MctsStrategy {
    config: MctsConfig,
    rng: ChaCha20Rng,
}

impl MctsStrategy {
    #[must_use]
    #[allow(missing_docs)]
    pub const fn new(config: MctsConfig, rng: ChaCha20Rng) -> Self {
        Self { config, rng }
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Runs the search from `root` and reports the chosen move together with
    /// the search statistics.
    pub fn search(&mut self, root: &GameState) -> MctsStats {
        let mut tree = Tree::new(root.clone(), &mut self.rng);
        match tree.get(Tree::ROOT).untried() {
            [] => {
                return MctsStats {
                    best_move: None,
                    iterations: 0,
                    nodes: 1,
                    visits: 0,
                }
            },
            [only] => {
                return MctsStats {
                    best_move: Some(*only),
                    iterations: 0,
                    nodes: 1,
                    visits: 0,
                }
            },
            _ => {},
        }

        // Rollout results are normalized by the value that was still on the
        // board when the search started.
        #[allow(clippy::cast_precision_loss)]
        let normalizer = root.board().free_sum().max(1) as f64;
        let limiter = Limiter::new(self.config.max_iterations, self.config.time_limit);
        let mut iterations = 0;
        // The root needs at least one child to pick from.
        while iterations == 0 || limiter.allows(iterations) {
            let leaf = self.select_and_expand(&mut tree);
            let result = self.rollout(&tree.get(leaf).state, normalizer);
            tree.backpropagate(leaf, result);
            iterations += 1;
            trace!(iteration = iterations, leaf, result, "mcts iteration");
        }

        let best = tree.most_visited_child();
        let stats = MctsStats {
            best_move: best.and_then(|node| node.action()),
            iterations,
            nodes: tree.len(),
            visits: best.map_or(0, |node| node.visits),
        };
        debug!(
            best_move = ?stats.best_move,
            iterations = stats.iterations,
            nodes = stats.nodes,
            visits = stats.visits,
            elapsed_ms = limiter.elapsed().as_millis(),
            "mcts search finished"
        );
        stats
    }

    fn select_and_expand(&mut self, tree: &mut Tree) -> NodeIndex {
        let mut current = Tree::ROOT;
        while !tree.get(current).is_terminal() && tree.get(current).is_fully_expanded() {
            match tree.select_child(current, self.config.exploration) {
                Some(child) => current = child,
                None => break,
            }
        }
        if tree.get(current).is_terminal() {
            return current;
        }
        tree.expand(current, &mut self.rng).unwrap_or(current)
    }

    /// Plays the game out from `state` and returns the final score difference
    /// of the player to move at `state`, divided by `normalizer`.
    #[allow(clippy::cast_precision_loss)]
    fn rollout(&mut self, state: &GameState, normalizer: f64) -> f64 {
        let perspective = state.to_move();
        let mut state = state.clone();
        loop {
            let moves = state.available_moves();
            let next_move = if self.rng.r#gen::<f64>() < self.config.random_rollout_probability {
                moves.choose(&mut self.rng).copied()
            } else {
                highest_value(state.board(), &moves)
            };
            let Some(next_move) = next_move else {
                break;
            };
            let _ = state.make_move(next_move);
        }
        state.scores().advantage(perspective) as f64 / normalizer
    }
}

impl Strategy for MctsStrategy {
    fn decide(&mut self, board: &Board, last_move: Option<Move>, scores: Scores) -> Option<Move> {
        let state = GameState::from_position(board.clone(), last_move, scores);
        self.search(&state).best_move
    }
}
