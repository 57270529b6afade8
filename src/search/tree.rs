//! Arena-allocated MCTS tree.
//!
//! Nodes live in a single `Vec` and refer to each other by index, which gives
//! every node a parent back reference without shared ownership.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::game::{GameState, Move};

pub(super) type NodeIndex = usize;

// This is a special value that is used to indicate that the node has no parent.
const TOMBSTONE_PARENT: NodeIndex = usize::MAX;

#[derive(Debug)]
pub(super) struct Node {
    pub(super) state: GameState,
    parent: NodeIndex,
    pub(super) children: Vec<NodeIndex>,
    /// Legal moves without a child yet. The highest value is at the end and is
    /// expanded first; equal values are in random order.
    untried: Vec<Move>,
    pub(super) visits: u32,
    /// Sum of rollout results from the perspective of the player who made the
    /// move leading to this node.
    total: f64,
}

impl Node {
    fn new(state: GameState, parent: NodeIndex, rng: &mut impl Rng) -> Self {
        let mut untried = state.available_moves();
        untried.shuffle(rng);
        let board = state.board();
        untried.sort_by_key(|square| board.value(*square));
        Self {
            state,
            parent,
            children: Vec::new(),
            untried,
            visits: 0,
            total: 0.0,
        }
    }

    /// The move that led from the parent to this node.
    pub(super) fn action(&self) -> Option<Move> {
        self.state.last_move()
    }

    pub(super) fn untried(&self) -> &[Move] {
        &self.untried
    }

    #[must_use]
    pub(super) fn is_terminal(&self) -> bool {
        self.untried.is_empty() && self.children.is_empty()
    }

    #[must_use]
    pub(super) fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }

    /// Upper confidence bound of a visited node.
    fn ucb1(&self, log_parent_visits: f64, exploration: f64) -> f64 {
        let visits = f64::from(self.visits);
        self.total / visits + exploration * (log_parent_visits / visits).sqrt()
    }
}

#[derive(Debug)]
pub(super) struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub(super) const ROOT: NodeIndex = 0;

    pub(super) fn new(root: GameState, rng: &mut impl Rng) -> Self {
        Self {
            nodes: vec![Node::new(root, TOMBSTONE_PARENT, rng)],
        }
    }

    pub(super) fn get(&self, index: NodeIndex) -> &Node {
        &self.nodes[index]
    }

    pub(super) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Creates a child for the best untried move of `index` and returns it, or
    /// `None` if every move was tried already.
    pub(super) fn expand(&mut self, index: NodeIndex, rng: &mut impl Rng) -> Option<NodeIndex> {
        let next_move = self.nodes[index].untried.pop()?;
        let mut state = self.nodes[index].state.clone();
        let _ = state.make_move(next_move);
        let child = self.nodes.len();
        self.nodes.push(Node::new(state, index, rng));
        self.nodes[index].children.push(child);
        Some(child)
    }

    /// Picks the child with the highest UCB1 value. An unvisited child is
    /// returned immediately and ties keep the earlier child.
    pub(super) fn select_child(&self, index: NodeIndex, exploration: f64) -> Option<NodeIndex> {
        let node = self.get(index);
        let log_visits = f64::from(node.visits).ln();
        let mut best: Option<(NodeIndex, f64)> = None;
        for &child in &node.children {
            let child_node = self.get(child);
            if child_node.visits == 0 {
                return Some(child);
            }
            let score = child_node.ucb1(log_visits, exploration);
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((child, score));
            }
        }
        best.map(|(child, _)| child)
    }

    /// Adds the rollout `result` of `leaf` to every node up to the root. The
    /// result is from the perspective of the player to move at `leaf`, so it is
    /// stored negated at the leaf and the sign flips on every level.
    pub(super) fn backpropagate(&mut self, leaf: NodeIndex, result: f64) {
        let mut current = leaf;
        let mut value = -result;
        while current != TOMBSTONE_PARENT {
            let node = &mut self.nodes[current];
            node.visits += 1;
            node.total += value;
            value = -value;
            current = node.parent;
        }
    }

    /// Root child with the most visits; ties go to the child expanded first.
    pub(super) fn most_visited_child(&self) -> Option<&Node> {
        let mut best: Option<&Node> = None;
        for &child in &self.get(Self::ROOT).children {
            let node = self.get(child);
            if best.map_or(true, |best| node.visits > best.visits) {
                best = Some(node);
            }
        }
        best
    }
}
