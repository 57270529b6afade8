#![no_main]
use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;
use rowcol::game::Board;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(board) = input.parse::<Board>() else {
        return;
    };
    let printed = board.to_string();
    let reparsed: Board = printed
        .parse()
        .expect("printed boards should be accepted by the parser");
    assert_eq!(board, reparsed);
});
