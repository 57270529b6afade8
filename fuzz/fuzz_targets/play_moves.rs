#![no_main]
//! Interprets the input as a board size followed by move choices and checks
//! the state transition against the legal move list.

use itertools::Itertools;
use libfuzzer_sys::fuzz_target;
use rowcol::game::{Board, GameState, Move};

fuzz_target!(|data: &[u8]| {
    let Some((&size, choices)) = data.split_first() else {
        return;
    };
    let size = usize::from(size % 8);
    let values = choices.iter().take(size * size).map(|byte| u32::from(*byte) % 10);
    let rows = values
        .chunks(size.max(1))
        .into_iter()
        .map(Iterator::collect::<Vec<_>>)
        .collect_vec();
    let Ok(board) = Board::from_rows(rows) else {
        return;
    };
    let mut state = GameState::new(board);
    for &choice in choices.iter().skip(size * size) {
        let moves = state.available_moves();
        if moves.is_empty() {
            assert!(state.is_terminal());
            break;
        }
        let total = state.scores().total();
        let next_move = moves[usize::from(choice) % moves.len()];
        let value = state.play(next_move).expect("listed moves are legal");
        assert_eq!(state.scores().total(), total + u64::from(value));
        assert_eq!(state.last_move(), Some(next_move));
        assert!(state.apply(next_move).is_err());
        assert!(state.apply(Move::new(size, 0)).is_err());
    }
});
