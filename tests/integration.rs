use assert_cmd::Command;
use predicates::boolean::PredicateBooleanExt;
use predicates::str::contains;

const BINARY_NAME: &str = "rowcol";

#[test]
fn hello_handshake() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");

    drop(
        cmd.write_stdin("hello\nisready\nquit\n")
            .assert()
            .success()
            .stdout(
                contains("id name rowcol")
                    .and(contains("option name Seed"))
                    .and(contains("hellook"))
                    .and(contains("readyok")),
            ),
    );
}

#[test]
fn greedy_best_moves() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");

    drop(
        cmd.write_stdin("board 1,5,7,2;3,6,9,8;4,4,2,1;9,6,3,6\ngo\nmove 1 2\ngo\nquit\n")
            .assert()
            .success()
            .stdout("bestmove 1 2\nbestmove 1 3\n"),
    );
}

#[test]
fn self_play() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");

    drop(
        cmd.write_stdin(
            "setoption name Seed value 1\nsetoption name MctsIterations value 100\nplayer 1 \
             minimax\nplayer 2 MCTS\nboard 2 4 6 / 3 5 7 / 5 1 3\nplay\nd\n",
        )
        .assert()
        .success()
        .stdout(
            contains("move 1 ")
                .and(contains("move 2 "))
                .and(contains("result "))
                .and(contains("over ")),
        ),
    );
}

#[test]
fn logs_stay_off_stdout() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");

    drop(
        cmd.env("RUST_LOG", "debug")
            .write_stdin("board 1,2;3,4\ngo\n")
            .assert()
            .success()
            .stdout("bestmove 1 1\n")
            .stderr(contains("greedy strategy decided")),
    );
}

#[test]
fn bad_input_is_reported() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");

    drop(
        cmd.write_stdin("board 1,2;3\nplayer 1 alphazero\nmove 0 0\n")
            .assert()
            .success()
            .stdout(
                contains("info string invalid board")
                    .and(contains("info string unknown strategy 'alphazero'"))
                    .and(contains("info string No board")),
            ),
    );
}
