use pretty_assertions::assert_eq;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rowcol::error::{IllegalMoveError, IllegalReason};
use rowcol::game::{available_moves, Board, GameState, Move, Player, Scores};
use rowcol::simulation::{play_game, Outcome};
use rowcol::strategy::{AnyStrategy, GreedyStrategy, Strategy, StrategyConfig, StrategyKind};

fn sample_board() -> Board {
    Board::from_rows(vec![
        vec![1, 5, 7, 2],
        vec![3, 6, 9, 8],
        vec![4, 4, 2, 1],
        vec![9, 6, 3, 6],
    ])
    .unwrap()
}

#[test]
fn greedy_opening() {
    let mut state = GameState::new(sample_board());
    let mut greedy = GreedyStrategy;

    let first = greedy
        .decide(state.board(), state.last_move(), state.scores())
        .unwrap();
    assert_eq!(first, Move::new(1, 2));
    assert_eq!(state.play(first), Ok(9));

    let second = greedy
        .decide(state.board(), state.last_move(), state.scores())
        .unwrap();
    assert_eq!(second, Move::new(1, 3));
    assert_eq!(state.play(second), Ok(8));

    assert_eq!(state.scores(), Scores::new(9, 8));
    assert_eq!(state.to_move(), Player::First);
}

#[test]
fn greedy_self_play_is_consistent() {
    let board = sample_board();
    let total = board.free_sum();
    let record = play_game(board, &mut GreedyStrategy, &mut GreedyStrategy).unwrap();
    assert_eq!(record.plies[0].next_move, Move::new(1, 2));
    assert_eq!(record.plies[1].next_move, Move::new(1, 3));
    // Players alternate and every claimed value lands in the mover's score.
    for (index, ply) in record.plies.iter().enumerate() {
        let expected = if index % 2 == 0 {
            Player::First
        } else {
            Player::Second
        };
        assert_eq!(ply.player, expected);
    }
    let claimed: u64 = record.plies.iter().map(|ply| u64::from(ply.value)).sum();
    assert_eq!(record.scores.total(), claimed);
    assert!(claimed <= total);
    assert_eq!(record.outcome, Outcome::from_scores(record.scores));
}

/// Plays random legal games on random boards and checks the move generator
/// against the rules at every step.
#[test]
fn move_generation_follows_the_rules() {
    let mut rng = ChaCha20Rng::seed_from_u64(2024);
    for size in 1..=7 {
        for _ in 0..10 {
            let mut state = GameState::new(Board::random(size, &mut rng));
            loop {
                let moves = state.available_moves();
                for square in &moves {
                    assert!(state.board().is_free(*square));
                    if let Some(last) = state.last_move() {
                        assert!(square.row == last.row || square.column == last.column);
                    }
                }
                // Row-major order without duplicates.
                assert!(moves
                    .windows(2)
                    .all(|pair| (pair[0].row, pair[0].column) < (pair[1].row, pair[1].column)));
                // Everything else is rejected.
                for row in 0..=size {
                    for column in 0..=size {
                        let square = Move::new(row, column);
                        assert_eq!(state.apply(square).is_ok(), moves.contains(&square));
                    }
                }
                assert_eq!(state.is_terminal(), moves.is_empty());
                let Some(next_move) = moves.choose(&mut rng) else {
                    break;
                };
                let before = state.scores();
                let mover = state.to_move();
                let value = state.play(*next_move).unwrap();
                assert_eq!(state.scores()[mover], before[mover] + u64::from(value));
                assert_eq!(state.scores()[!mover], before[!mover]);
                assert_eq!(state.to_move(), !mover);
            }
        }
    }
}

#[test]
fn illegal_moves_are_explained() {
    let state = GameState::new(sample_board()).apply(Move::new(0, 0)).unwrap();
    assert_eq!(
        state.apply(Move::new(2, 3)),
        Err(IllegalMoveError {
            next_move: Move::new(2, 3),
            reason: IllegalReason::NotInBand,
        })
    );
    assert_eq!(
        state.apply(Move::new(0, 0)).unwrap_err().reason,
        IllegalReason::Claimed
    );
    assert_eq!(
        state.apply(Move::new(0, 9)).unwrap_err().reason,
        IllegalReason::OutOfBounds
    );
}

#[test]
fn exhausted_band_ends_the_game() {
    // (2, 2) is free but neither in row 0 nor in column 0.
    let board: Board = "-,-,-\n-,-,-\n-,-,5".parse().unwrap();
    let last_move = Some(Move::new(0, 0));
    assert!(available_moves(&board, last_move).is_empty());
    let config = StrategyConfig::default().with_seed(5);
    for kind in StrategyKind::ALL {
        let mut strategy = AnyStrategy::new(kind, &config);
        assert_eq!(
            strategy.decide(&board, last_move, Scores::new(10, 12)),
            None,
            "{kind}"
        );
    }
}

#[test]
fn maximal_values_do_not_overflow_scores() {
    let board: Board = "4294967295,4294967295\n4294967295,4294967295".parse().unwrap();
    let record = play_game(board, &mut GreedyStrategy, &mut GreedyStrategy).unwrap();
    assert_eq!(record.plies.len(), 4);
    assert_eq!(record.scores, Scores::new(8_589_934_590, 8_589_934_590));
    assert_eq!(record.outcome, Outcome::Tie);
}

#[test]
fn fully_claimed_board() {
    let board: Board = "-,-\n-,-".parse().unwrap();
    assert!(available_moves(&board, None).is_empty());
    assert!(GameState::new(board).is_terminal());
}

#[test]
fn deterministic_strategies_are_pure() {
    let mut rng = ChaCha20Rng::seed_from_u64(99);
    let config = StrategyConfig::default().with_seed(0);
    for _ in 0..5 {
        let size = rng.gen_range(2..=4);
        let board = Board::random(size, &mut rng);
        let copy = board.clone();
        for kind in [
            StrategyKind::Greedy,
            StrategyKind::SafeChoice,
            StrategyKind::Minimax,
        ] {
            let mut strategy = AnyStrategy::new(kind, &config);
            let first = strategy.decide(&board, None, Scores::default());
            let second = strategy.decide(&board, None, Scores::default());
            assert!(first.is_some());
            assert_eq!(first, second, "{kind}");
            assert_eq!(board, copy);
        }
    }
}
