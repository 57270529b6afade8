//! Move selection strategies.
//!
//! Every strategy answers the same question: given the board, the previous
//! pick and the scores, which cell should the player to move claim next? The
//! set of strategies is closed; [`StrategyKind`] maps their names to
//! constructors and [`AnyStrategy`] dispatches to the concrete implementation.

use std::fmt;
use std::str::FromStr;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::error::ConfigurationError;
use crate::game::{Board, Move, Scores};
use crate::search::{AlphaBetaConfig, AlphaBetaStrategy, MctsConfig, MctsStrategy};

mod greedy;
mod random;
mod safe_choice;

pub use greedy::GreedyStrategy;
pub use random::RandomStrategy;
pub use safe_choice::{SafeChoiceConfig, SafeChoiceStrategy};

/// Chooses the next move for the player to move.
pub trait Strategy {
    /// Returns a move from [`crate::game::available_moves`] or `None` if and
    /// only if there is no legal move left.
    ///
    /// `board` is never modified; strategies build their own private search
    /// state and discard it before returning.
    fn decide(&mut self, board: &Board, last_move: Option<Move>, scores: Scores) -> Option<Move>;
}

/// Names of the available strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// Uniformly random legal move.
    Random,
    /// Highest immediate value.
    Greedy,
    /// Immediate value against the opponent's best reply and parity features.
    SafeChoice,
    /// Monte Carlo Tree Search.
    Mcts,
    /// Alpha-beta minimax.
    Minimax,
}

impl StrategyKind {
    /// All strategies in the order they are usually listed.
    pub const ALL: [Self; 5] = [
        Self::Random,
        Self::Greedy,
        Self::SafeChoice,
        Self::Mcts,
        Self::Minimax,
    ];

    /// Canonical identifier.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Greedy => "greedy",
            Self::SafeChoice => "safe_choice",
            Self::Mcts => "MCTS",
            Self::Minimax => "minimax",
        }
    }
}

impl FromStr for StrategyKind {
    type Err = ConfigurationError;

    /// Matches the canonical names ignoring case, `_` and `-`, so that both
    /// `safe_choice` and `SafeChoice` are accepted.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "random" => Ok(Self::Random),
            "greedy" => Ok(Self::Greedy),
            "safechoice" => Ok(Self::SafeChoice),
            "mcts" => Ok(Self::Mcts),
            "minimax" => Ok(Self::Minimax),
            _ => Err(ConfigurationError {
                name: name.to_string(),
            }),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Tunables of all strategies.
#[derive(Clone, Debug, Default)]
pub struct StrategyConfig {
    /// Seed for the strategy random number generator. Strategies are seeded
    /// from OS entropy when it is not set.
    pub seed: Option<u64>,
    #[allow(missing_docs)]
    pub safe_choice: SafeChoiceConfig,
    #[allow(missing_docs)]
    pub mcts: MctsConfig,
    #[allow(missing_docs)]
    pub alpha_beta: AlphaBetaConfig,
}

impl StrategyConfig {
    /// Builder pattern: set the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder pattern: set the MCTS configuration.
    #[must_use]
    pub fn with_mcts(mut self, mcts: MctsConfig) -> Self {
        self.mcts = mcts;
        self
    }

    /// Builder pattern: set the alpha-beta configuration.
    #[must_use]
    pub fn with_alpha_beta(mut self, alpha_beta: AlphaBetaConfig) -> Self {
        self.alpha_beta = alpha_beta;
        self
    }

    pub(crate) fn rng(&self) -> ChaCha20Rng {
        self.seed
            .map_or_else(ChaCha20Rng::from_entropy, ChaCha20Rng::seed_from_u64)
    }
}

/// One of the five strategies.
#[allow(missing_docs)]
#[derive(Debug)]
pub enum AnyStrategy {
    Random(RandomStrategy),
    Greedy(GreedyStrategy),
    SafeChoice(SafeChoiceStrategy),
    Mcts(MctsStrategy),
    Minimax(AlphaBetaStrategy),
}

impl AnyStrategy {
    /// Builds the strategy of the given kind.
    #[must_use]
    pub fn new(kind: StrategyKind, config: &StrategyConfig) -> Self {
        match kind {
            StrategyKind::Random => Self::Random(RandomStrategy::new(config.rng())),
            StrategyKind::Greedy => Self::Greedy(GreedyStrategy),
            StrategyKind::SafeChoice => Self::SafeChoice(SafeChoiceStrategy::new(
                config.safe_choice.clone(),
                config.rng(),
            )),
            StrategyKind::Mcts => Self::Mcts(MctsStrategy::new(config.mcts.clone(), config.rng())),
            StrategyKind::Minimax => {
                Self::Minimax(AlphaBetaStrategy::new(config.alpha_beta.clone()))
            },
        }
    }

    /// Parses the strategy name and builds it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] for unknown names.
    pub fn from_name(name: &str, config: &StrategyConfig) -> Result<Self, ConfigurationError> {
        Ok(Self::new(name.parse()?, config))
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn kind(&self) -> StrategyKind {
        match self {
            Self::Random(_) => StrategyKind::Random,
            Self::Greedy(_) => StrategyKind::Greedy,
            Self::SafeChoice(_) => StrategyKind::SafeChoice,
            Self::Mcts(_) => StrategyKind::Mcts,
            Self::Minimax(_) => StrategyKind::Minimax,
        }
    }
}

impl Strategy for AnyStrategy {
    fn decide(&mut self, board: &Board, last_move: Option<Move>, scores: Scores) -> Option<Move> {
        match self {
            Self::Random(strategy) => strategy.decide(board, last_move, scores),
            Self::Greedy(strategy) => strategy.decide(board, last_move, scores),
            Self::SafeChoice(strategy) => strategy.decide(board, last_move, scores),
            Self::Mcts(strategy) => strategy.decide(board, last_move, scores),
            Self::Minimax(strategy) => strategy.decide(board, last_move, scores),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names() {
        for kind in StrategyKind::ALL {
            assert_eq!(kind.name().parse::<StrategyKind>(), Ok(kind));
        }
        assert_eq!("SafeChoice".parse(), Ok(StrategyKind::SafeChoice));
        assert_eq!("mcts".parse(), Ok(StrategyKind::Mcts));
        assert_eq!("Minimax".parse(), Ok(StrategyKind::Minimax));
        assert_eq!(
            "expectimax".parse::<StrategyKind>(),
            Err(ConfigurationError {
                name: "expectimax".to_string()
            })
        );
    }

    #[test]
    fn build_every_kind() {
        let config = StrategyConfig::default().with_seed(7);
        for kind in StrategyKind::ALL {
            assert_eq!(AnyStrategy::new(kind, &config).kind(), kind);
        }
        assert!(AnyStrategy::from_name("alphazero", &config).is_err());
    }
}
