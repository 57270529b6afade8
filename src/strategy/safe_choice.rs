//! One-ply "safe choice" heuristic.
//!
//! Every legal cell is scored by its own value, the best value the opponent can
//! take right after it and two parity features describing how the maxima of
//! its row and column are split between the players:
//!
//! `α·value − β·opponent_best + γ·positive_parities + δ·row_parity +
//! ε·column_parity`
//!
//! A parity feature is `+1` when, after removing the candidate from its row
//! (column), the number of cells tied for the remaining maximum is even, and
//! `-1` otherwise.

use std::cmp::Ordering;

use rand::Rng;
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use crate::game::{available_moves, Board, Move, Scores, Value};
use crate::strategy::Strategy;

/// Weights of the composite score.
#[derive(Clone, Debug, PartialEq)]
pub struct SafeChoiceConfig {
    /// Weight of the candidate's own value (α).
    pub value_weight: f64,
    /// Weight of the opponent's best immediate reply (β).
    pub reply_weight: f64,
    /// Weight of the number of positive parity features (γ).
    pub parity_count_weight: f64,
    /// Weight of the row parity (δ).
    pub row_parity_weight: f64,
    /// Weight of the column parity (ε).
    pub column_parity_weight: f64,
    /// Upper bound of a uniform random term added to every composite score.
    /// Zero keeps the strategy deterministic.
    pub jitter: f64,
}

impl Default for SafeChoiceConfig {
    fn default() -> Self {
        Self {
            value_weight: 1.0,
            reply_weight: 1.0,
            parity_count_weight: 0.15,
            row_parity_weight: 0.05,
            column_parity_weight: 0.05,
            jitter: 0.0,
        }
    }
}

impl SafeChoiceConfig {
    /// Builder pattern: set the jitter amplitude.
    #[must_use]
    pub const fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter;
        self
    }
}

/// Largest and second largest distinct values of a line with their
/// multiplicities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct TopTwo {
    first: Option<(Value, usize)>,
    second: Option<(Value, usize)>,
}

impl TopTwo {
    fn from_values(values: impl Iterator<Item = Value>) -> Self {
        let mut summary = Self::default();
        for value in values {
            summary.first = match summary.first {
                None => Some((value, 1)),
                Some((top, count)) if value == top => Some((top, count + 1)),
                Some((top, count)) if value > top => {
                    summary.second = Some((top, count));
                    Some((value, 1))
                },
                first => {
                    summary.second = match summary.second {
                        Some((runner_up, count)) if value == runner_up => {
                            Some((runner_up, count + 1))
                        },
                        Some((runner_up, _)) if value < runner_up => summary.second,
                        _ => Some((value, 1)),
                    };
                    first
                },
            };
        }
        summary
    }

    /// Parity of the line once `value` is removed from it.
    fn parity_without(&self, value: Value) -> i8 {
        let Some((top, count)) = self.first else {
            return 1;
        };
        let remaining = if value == top {
            if count > 1 {
                count - 1
            } else {
                self.second.map_or(0, |(_, count)| count)
            }
        } else {
            count
        };
        if remaining % 2 == 0 {
            1
        } else {
            -1
        }
    }
}

/// Ordering key of a candidate: composite score first, then the number of
/// positive parities, row parity, column parity and finally the top-left most
/// cell.
#[derive(Clone, Copy, Debug)]
struct Key {
    composite: f64,
    positive: u8,
    row_parity: i8,
    column_parity: i8,
    square: Move,
}

impl Key {
    fn cmp(&self, other: &Self) -> Ordering {
        self.composite
            .total_cmp(&other.composite)
            .then(self.positive.cmp(&other.positive))
            .then(self.row_parity.cmp(&other.row_parity))
            .then(self.column_parity.cmp(&other.column_parity))
            .then(other.square.row.cmp(&self.square.row))
            .then(other.square.column.cmp(&self.square.column))
    }
}

/// Greedy move selection corrected by the opponent's best reply and the row
/// and column parity features.
#[derive(Debug)]
pub struct SafeChoiceStrategy {
    config: SafeChoiceConfig,
    rng: ChaCha20Rng,
}

impl SafeChoiceStrategy {
    #[must_use]
    #[allow(missing_docs)]
    pub const fn new(config: SafeChoiceConfig, rng: ChaCha20Rng) -> Self {
        Self { config, rng }
    }

    fn key(
        &mut self,
        board: &Board,
        square: Move,
        value: Value,
        rows: &mut [Option<TopTwo>],
        columns: &mut [Option<TopTwo>],
    ) -> Key {
        let row_parity = rows[square.row]
            .get_or_insert_with(|| TopTwo::from_values(board.row_values(square.row)))
            .parity_without(value);
        let column_parity = columns[square.column]
            .get_or_insert_with(|| TopTwo::from_values(board.column_values(square.column)))
            .parity_without(value);
        let positive = u8::from(row_parity == 1) + u8::from(column_parity == 1);
        let reply = f64::from(opponent_best_after(board, square));

        let config = &self.config;
        let mut composite = config.value_weight * f64::from(value) - config.reply_weight * reply
            + config.parity_count_weight * f64::from(positive)
            + config.row_parity_weight * f64::from(row_parity)
            + config.column_parity_weight * f64::from(column_parity);
        if config.jitter > 0.0 {
            composite += self.rng.r#gen::<f64>() * config.jitter;
        }

        Key {
            composite,
            positive,
            row_parity,
            column_parity,
            square,
        }
    }
}

/// Best value the opponent can claim right after `square` is taken: the free
/// cells of its row and column except the cell itself, or zero if there are
/// none.
fn opponent_best_after(board: &Board, square: Move) -> Value {
    board
        .free_cells()
        .filter(|(other, _)| *other != square && other.shares_line(&square))
        .map(|(_, value)| value)
        .max()
        .unwrap_or(0)
}

impl Strategy for SafeChoiceStrategy {
    fn decide(&mut self, board: &Board, last_move: Option<Move>, _scores: Scores) -> Option<Move> {
        // Row and column summaries are shared between candidates within one
        // decision.
        let mut rows: Vec<Option<TopTwo>> = vec![None; board.size()];
        let mut columns: Vec<Option<TopTwo>> = vec![None; board.size()];

        let mut best: Option<Key> = None;
        for square in available_moves(board, last_move) {
            let Some(value) = board.value(square) else {
                continue;
            };
            let key = self.key(board, square, value, &mut rows, &mut columns);
            if best.map_or(true, |best| key.cmp(&best) == Ordering::Greater) {
                best = Some(key);
            }
        }
        debug!(
            choice = ?best.map(|key| key.square),
            composite = best.map(|key| key.composite),
            "safe choice strategy decided"
        );
        best.map(|key| key.square)
    }
}
