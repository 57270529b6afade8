//! Implementation of [Minimax] algorithm with [Alpha-Beta pruning], move
//! ordering and a search depth derived from the board size.
//!
//! Values are always from the perspective of the player to move at the root:
//! MAX nodes are the root player's turns, MIN nodes the opponent's.
//!
//! [Minimax]: https://en.wikipedia.org/wiki/Minimax
//! [Alpha-Beta pruning]: https://en.wikipedia.org/wiki/Alpha%E2%80%93beta_pruning

use std::cell::OnceCell;
use std::cmp::Reverse;

use tracing::{debug, trace};

use crate::evaluation::{evaluate_with_mobility, Weights};
use crate::game::{highest_value, Board, GameState, Move, Player, Scores};
use crate::search::Depth;
use crate::strategy::Strategy;

/// Parameters of the alpha-beta search.
#[derive(Clone, Debug, PartialEq)]
pub struct AlphaBetaConfig {
    /// Rough number of nodes the search may visit per decision; see
    /// [`dynamic_depth`].
    pub node_budget: u64,
    /// The search never goes deeper than this on boards larger than 3×3.
    pub depth_cap: Depth,
    /// Static evaluation weights.
    pub weights: Weights,
}

impl Default for AlphaBetaConfig {
    fn default() -> Self {
        Self {
            node_budget: 60_000,
            depth_cap: 12,
            weights: Weights::default(),
        }
    }
}

impl AlphaBetaConfig {
    /// Builder pattern: set the node budget.
    #[must_use]
    pub fn with_node_budget(mut self, node_budget: u64) -> Self {
        self.node_budget = node_budget;
        self
    }

    /// Builder pattern: set the depth cap.
    #[must_use]
    pub fn with_depth_cap(mut self, depth_cap: Depth) -> Self {
        self.depth_cap = depth_cap;
        self
    }

    /// Builder pattern: set the evaluation weights.
    #[must_use]
    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }
}

/// Picks the search depth for a board of dimension `size` with `remaining`
/// unclaimed cells.
///
/// After the first pick a player chooses among at most `2·size − 1` cells, so
/// with an effective branching factor `b = clamp(2·size − 1, 2, 10)` the depth
/// is the largest `d` with `b^d ≤ node_budget`. The result never exceeds the
/// remaining plies or `depth_cap`, except that boards up to 3×3 are always
/// searched to the end and 4×4 boards get one extra ply. It is at least 1.
#[must_use]
pub fn dynamic_depth(size: usize, remaining: usize, node_budget: u64, depth_cap: Depth) -> Depth {
    let branching = (2 * size).saturating_sub(1).clamp(2, 10) as u64;
    let budget = node_budget.max(2);
    let mut depth: usize = 0;
    let mut nodes: u64 = 1;
    while let Some(next) = nodes.checked_mul(branching).filter(|next| *next <= budget) {
        nodes = next;
        depth += 1;
    }
    depth = depth.min(remaining).min(usize::from(depth_cap));
    if size <= 3 {
        depth = remaining;
    } else if size == 4 {
        depth = (depth + 1).min(remaining);
    }
    Depth::try_from(depth.max(1)).unwrap_or(Depth::MAX)
}

/// Search tree node. Legal moves and children are generated at most once.
#[derive(Debug)]
struct Node {
    state: GameState,
    moves: OnceCell<Vec<Move>>,
    children: Vec<Node>,
}

impl Node {
    const fn new(state: GameState) -> Self {
        Self {
            state,
            moves: OnceCell::new(),
            children: Vec::new(),
        }
    }

    fn moves(&self) -> &[Move] {
        self.moves.get_or_init(|| self.state.available_moves())
    }

    fn is_terminal(&self) -> bool {
        self.moves().is_empty()
    }

    fn children(&mut self) -> &mut [Self] {
        if self.children.is_empty() {
            self.children = self
                .moves()
                .iter()
                .map(|next_move| {
                    let mut state = self.state.clone();
                    let _ = state.make_move(*next_move);
                    Self::new(state)
                })
                .collect();
        }
        &mut self.children
    }
}

/// Outcome of a single alpha-beta decision.
#[derive(Clone, Debug, PartialEq)]
pub struct AlphaBetaStats {
    /// The chosen move, `None` if there is no legal move.
    pub best_move: Option<Move>,
    /// Search depth in plies, including the root move.
    pub depth: Depth,
    /// Number of visited nodes below the root.
    pub nodes: u64,
    /// Value of the chosen move for the player to move.
    pub value: f64,
}

struct Search<'a> {
    perspective: Player,
    weights: &'a Weights,
    nodes: u64,
}

impl Search<'_> {
    fn alpha_beta(
        &mut self,
        node: &mut Node,
        depth: Depth,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
    ) -> f64 {
        self.nodes += 1;
        if depth == 0 || node.is_terminal() {
            return evaluate_with_mobility(
                &node.state,
                node.moves().len(),
                self.perspective,
                self.weights,
            );
        }

        let perspective = self.perspective;
        let children = node.children();
        if maximizing {
            // Try the children that improve the root player's score first.
            children.sort_by_key(|child| Reverse(child.state.scores()[perspective]));
            let mut value = f64::NEG_INFINITY;
            for child in children.iter_mut() {
                value = value.max(self.alpha_beta(child, depth - 1, alpha, beta, false));
                alpha = alpha.max(value);
                if beta <= alpha {
                    break;
                }
            }
            value
        } else {
            children.sort_by_key(|child| child.state.scores()[perspective]);
            let mut value = f64::INFINITY;
            for child in children.iter_mut() {
                value = value.min(self.alpha_beta(child, depth - 1, alpha, beta, true));
                beta = beta.min(value);
                if beta <= alpha {
                    break;
                }
            }
            value
        }
    }
}

/// Depth-limited alpha-beta player.
#[derive(Debug)]
pub struct AlphaBetaStrategy {
    config: AlphaBetaConfig,
}

impl AlphaBetaStrategy {
    #[must_use]
    #[allow(missing_docs)]
    pub const fn new(config: AlphaBetaConfig) -> Self {
        Self { config }
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn config(&self) -> &AlphaBetaConfig {
        &self.config
    }

    /// Searches `root` and reports the chosen move with the search statistics.
    ///
    /// Root moves are tried in order of decreasing immediate value, each with a
    /// full window, and only a strictly better value replaces the current best.
    #[must_use]
    pub fn search(&self, root: &GameState) -> AlphaBetaStats {
        let board = root.board();
        let mut root_node = Node::new(root.clone());
        if root_node.is_terminal() {
            return AlphaBetaStats {
                best_move: None,
                depth: 0,
                nodes: 0,
                value: 0.0,
            };
        }

        let depth = dynamic_depth(
            board.size(),
            board.free_count(),
            self.config.node_budget,
            self.config.depth_cap,
        );
        let mut search = Search {
            perspective: root.to_move(),
            weights: &self.config.weights,
            nodes: 0,
        };

        let mut best: Option<(Move, f64)> = None;
        let children = root_node.children();
        children.sort_by_key(|child| {
            Reverse(child.state.last_move().and_then(|square| board.value(square)))
        });
        for child in children.iter_mut() {
            let value =
                search.alpha_beta(child, depth - 1, f64::NEG_INFINITY, f64::INFINITY, false);
            let Some(next_move) = child.state.last_move() else {
                continue;
            };
            trace!(%next_move, value, "alpha-beta root move");
            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((next_move, value));
            }
        }

        let (best_move, value) = match best {
            Some((best_move, value)) => (Some(best_move), value),
            None => (highest_value(board, root_node.moves()), f64::NEG_INFINITY),
        };
        let stats = AlphaBetaStats {
            best_move,
            depth,
            nodes: search.nodes,
            value,
        };
        debug!(
            best_move = ?stats.best_move,
            depth = stats.depth,
            nodes = stats.nodes,
            value = stats.value,
            "alpha-beta search finished"
        );
        stats
    }
}

impl Strategy for AlphaBetaStrategy {
    fn decide(&mut self, board: &Board, last_move: Option<Move>, scores: Scores) -> Option<Move> {
        let state = GameState::from_position(board.clone(), last_move, scores);
        self.search(&state).best_move
    }
}
