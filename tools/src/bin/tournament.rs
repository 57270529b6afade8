//! Plays every pair of strategies against each other on random boards and
//! prints win and tie rates per pairing.
//!
//! Every board is played twice with swapped seats so that neither strategy
//! profits from moving first.

use std::fmt;
use std::time::Duration;

use anyhow::bail;
use clap::Parser;
use itertools::Itertools;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use rowcol::game::{Board, Player};
use rowcol::search::{AlphaBetaConfig, MctsConfig};
use rowcol::simulation::{play_game, Outcome};
use rowcol::strategy::{AnyStrategy, StrategyConfig, StrategyKind};
use tracing::info;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Board sizes to play on.
    #[arg(long, value_delimiter = ',', default_values_t = [3, 5, 7])]
    sizes: Vec<usize>,
    /// Number of random boards per size. Each board is played twice.
    #[arg(long, default_value_t = 10)]
    boards: usize,
    /// Strategies to pair up. Defaults to all of them.
    #[arg(long, value_delimiter = ',')]
    strategies: Vec<StrategyKind>,
    /// Seed for board generation and strategy RNGs.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// MCTS time budget per move in milliseconds.
    #[arg(long, default_value_t = 1000)]
    mcts_time: u64,
    /// MCTS iteration budget per move.
    #[arg(long, default_value_t = 2000)]
    mcts_iterations: usize,
    /// Alpha-beta node budget used to pick the search depth.
    #[arg(long, default_value_t = 60_000)]
    alpha_beta_budget: u64,
    /// Tracing filter, e.g. `info` or `rowcol=debug`.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Args {
    fn strategy_config(&self, seed: u64) -> StrategyConfig {
        StrategyConfig::default()
            .with_seed(seed)
            .with_mcts(
                MctsConfig::default()
                    .with_time_limit(Duration::from_millis(self.mcts_time))
                    .with_max_iterations(self.mcts_iterations),
            )
            .with_alpha_beta(AlphaBetaConfig::default().with_node_budget(self.alpha_beta_budget))
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Tally {
    first_wins: usize,
    second_wins: usize,
    ties: usize,
}

impl Tally {
    fn games(&self) -> usize {
        self.first_wins + self.second_wins + self.ties
    }

    fn merge(self, other: Self) -> Self {
        Self {
            first_wins: self.first_wins + other.first_wins,
            second_wins: self.second_wins + other.second_wins,
            ties: self.ties + other.ties,
        }
    }

    /// Books a game in which the pairing's first strategy played `seat`.
    fn record(&mut self, outcome: Outcome, seat: Player) {
        match outcome {
            Outcome::Tie => self.ties += 1,
            Outcome::Winner(winner) if winner == seat => self.first_wins += 1,
            Outcome::Winner(_) => self.second_wins += 1,
        }
    }
}

impl fmt::Display for Tally {
    #[allow(clippy::cast_precision_loss)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let games = self.games().max(1) as f64;
        write!(
            f,
            "{:>4} / {:>4} / {:>4}  ({:5.1}% / {:5.1}% / {:5.1}%)",
            self.first_wins,
            self.second_wins,
            self.ties,
            100.0 * self.first_wins as f64 / games,
            100.0 * self.second_wins as f64 / games,
            100.0 * self.ties as f64 / games,
        )
    }
}

/// Plays `board` twice with `first` and `second` swapping seats.
fn play_both_seats(
    args: &Args,
    board: &Board,
    seed: u64,
    first: StrategyKind,
    second: StrategyKind,
) -> anyhow::Result<Tally> {
    let config = args.strategy_config(seed);
    let mut tally = Tally::default();
    for seat in [Player::First, Player::Second] {
        let mut ours = AnyStrategy::new(first, &config);
        let mut theirs = AnyStrategy::new(second, &config);
        let record = match seat {
            Player::First => play_game(board.clone(), &mut ours, &mut theirs)?,
            Player::Second => play_game(board.clone(), &mut theirs, &mut ours)?,
        };
        tally.record(record.outcome, seat);
    }
    Ok(tally)
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::new(level))
        .init();
}

fn main() -> anyhow::Result<()> {
    let mut args = Args::parse();
    init_tracing(&args.log_level);
    if args.strategies.is_empty() {
        args.strategies = StrategyKind::ALL.to_vec();
    }
    if args.strategies.len() < 2 {
        bail!("need at least two strategies to play a tournament");
    }

    let mut rng = ChaCha20Rng::seed_from_u64(args.seed);
    let boards = args
        .sizes
        .iter()
        .flat_map(|&size| (0..args.boards).map(move |_| size))
        .map(|size| Board::random(size, &mut rng))
        .collect_vec();
    info!(boards = boards.len(), sizes = ?args.sizes, "generated boards");

    println!("{:<24} {:>6}  first / second / ties", "pairing", "games");
    for (first, second) in args.strategies.iter().copied().tuple_combinations() {
        let tally = boards
            .par_iter()
            .enumerate()
            .map(|(index, board)| {
                play_both_seats(&args, board, args.seed + index as u64, first, second)
            })
            .try_reduce(Tally::default, |a, b| Ok(a.merge(b)))?;
        info!(%first, %second, games = tally.games(), "pairing finished");
        println!(
            "{:<24} {:>6}  {tally}",
            format!("{first} vs {second}"),
            tally.games()
        );
    }
    Ok(())
}
