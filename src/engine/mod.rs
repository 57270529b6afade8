//! The engine puts all pieces together: it owns the authoritative game, the
//! strategy assigned to each seat and the options they were built with, and
//! talks to the outside world through a line-oriented text protocol modelled
//! on the [Universal Chess Interface].
//!
//! [`Engine::protocol_loop`] is the "main loop" of the engine which reads
//! commands from the input stream and writes responses to the output stream.
//! Problems with a single command are reported as `info string` lines and the
//! loop carries on.
//!
//! [Universal Chess Interface]: https://www.chessprogramming.org/UCI

use std::io::{BufRead, Write};
use std::time::Duration;

use crate::engine::protocol::{Command, EngineOption};
use crate::error::Error;
use crate::game::{Board, GameState, Move, Player};
use crate::simulation::{play_out, Outcome, Ply};
use crate::strategy::{AnyStrategy, Strategy, StrategyConfig, StrategyKind};

mod protocol;

/// The Engine connects everything together and handles commands sent by the
/// client, including I/O.
#[derive(Debug)]
pub struct Engine {
    /// Board the next `newgame` starts from.
    board: Option<Board>,
    game: Option<GameState>,
    seats: [StrategyKind; 2],
    strategies: [AnyStrategy; 2],
    config: StrategyConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(StrategyConfig::default())
    }
}

impl Engine {
    /// Creates an engine without a board where both seats play greedily.
    #[must_use]
    pub fn new(config: StrategyConfig) -> Self {
        let seats = [StrategyKind::Greedy; 2];
        Self {
            board: None,
            game: None,
            strategies: build_strategies(seats, &config),
            seats,
            config,
        }
    }

    /// Continuously reads the input stream and executes the commands until
    /// `quit` is sent or the input ends.
    ///
    /// Supported commands:
    ///
    /// - `hello`: identify the engine and list the options
    /// - `isready`: respond with `readyok`
    /// - `setoption name <option> value <integer>`
    /// - `board <rows>`: set the board (rows separated by `;` or `/`) and start
    ///   a new game on it
    /// - `player <1|2> <strategy>`: assign a strategy to a seat
    /// - `newgame`: restart the game on the last board
    /// - `go`: print `bestmove <row> <column>` or `bestmove none` for the
    ///   player to move without applying it
    /// - `move <row> <column>`: apply a move for the player to move
    /// - `play`: let the seats play the game to the end
    /// - `d`: print the game state
    /// - `quit`
    ///
    /// # Errors
    ///
    /// Only I/O failures end the loop with an error.
    pub fn protocol_loop(
        &mut self,
        input: &mut impl BufRead,
        output: &mut impl Write,
    ) -> anyhow::Result<()> {
        loop {
            let mut line = String::new();
            // EOF reached.
            if input.read_line(&mut line)? == 0 {
                break;
            }

            match Command::parse(&line) {
                Command::Hello => self.handle_hello(output)?,
                Command::IsReady => writeln!(output, "readyok")?,
                Command::SetOption { option, value } => {
                    self.handle_setoption(option, value, output)?;
                },
                Command::SetBoard { rows } => self.handle_board(&rows, output)?,
                Command::SetPlayer { player, strategy } => {
                    self.handle_player(player, &strategy, output)?;
                },
                Command::NewGame => self.handle_newgame(output)?,
                Command::Go => self.handle_go(output)?,
                Command::Move(next_move) => self.handle_move(next_move, output)?,
                Command::Play => self.handle_play(output)?,
                Command::Display => self.handle_display(output)?,
                Command::Quit => break,
                Command::Unknown(command) if command.is_empty() => {},
                Command::Unknown(command) => {
                    writeln!(output, "info string Unsupported command: {command}")?;
                },
            }
            output.flush()?;
        }
        Ok(())
    }

    /// The game in progress, if a board was set.
    #[must_use]
    pub const fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    /// Responds to the `hello` handshake by identifying the engine and listing
    /// the supported options.
    fn handle_hello(&self, output: &mut impl Write) -> anyhow::Result<()> {
        writeln!(
            output,
            "id name {} {}",
            env!("CARGO_PKG_NAME"),
            crate::engine_version()
        )?;
        writeln!(output, "id author {}", env!("CARGO_PKG_AUTHORS"))?;
        for option in EngineOption::ALL {
            writeln!(
                output,
                "option name {} type spin default {}",
                option.name(),
                self.option_value(option)
            )?;
        }
        writeln!(
            output,
            "strategies {}",
            StrategyKind::ALL.map(StrategyKind::name).join(" ")
        )?;
        writeln!(output, "hellook")?;
        Ok(())
    }

    fn option_value(&self, option: EngineOption) -> String {
        match option {
            EngineOption::Seed => self
                .config
                .seed
                .map_or_else(|| "none".to_string(), |seed| seed.to_string()),
            EngineOption::MctsTime => self.config.mcts.time_limit.as_millis().to_string(),
            EngineOption::MctsIterations => self.config.mcts.max_iterations.to_string(),
            EngineOption::AlphaBetaBudget => self.config.alpha_beta.node_budget.to_string(),
            EngineOption::AlphaBetaDepth => self.config.alpha_beta.depth_cap.to_string(),
        }
    }

    /// Updates the configuration and rebuilds both strategies with it.
    fn handle_setoption(
        &mut self,
        option: EngineOption,
        value: u64,
        output: &mut impl Write,
    ) -> anyhow::Result<()> {
        match self.apply_option(option, value) {
            Ok(()) => self.strategies = build_strategies(self.seats, &self.config),
            Err(e) => writeln!(output, "info string {e}")?,
        }
        Ok(())
    }

    fn apply_option(&mut self, option: EngineOption, value: u64) -> Result<(), Error> {
        let invalid = |message: &str| Error::InvalidOption {
            option: option.name().to_string(),
            message: message.to_string(),
        };
        if value == 0 && option != EngineOption::Seed {
            return Err(invalid("must be positive"));
        }
        match option {
            EngineOption::Seed => self.config.seed = Some(value),
            EngineOption::MctsTime => self.config.mcts.time_limit = Duration::from_millis(value),
            EngineOption::MctsIterations => {
                self.config.mcts.max_iterations =
                    usize::try_from(value).map_err(|_| invalid("too many iterations"))?;
            },
            EngineOption::AlphaBetaBudget => self.config.alpha_beta.node_budget = value,
            EngineOption::AlphaBetaDepth => {
                self.config.alpha_beta.depth_cap =
                    u8::try_from(value).map_err(|_| invalid("depth must be at most 255"))?;
            },
        }
        Ok(())
    }

    fn handle_board(&mut self, rows: &str, output: &mut impl Write) -> anyhow::Result<()> {
        match rows.parse::<Board>() {
            Ok(board) => {
                self.game = Some(GameState::new(board.clone()));
                self.board = Some(board);
            },
            Err(e) => writeln!(output, "info string {e}")?,
        }
        Ok(())
    }

    fn handle_player(
        &mut self,
        player: Player,
        strategy: &str,
        output: &mut impl Write,
    ) -> anyhow::Result<()> {
        match strategy.parse::<StrategyKind>() {
            Ok(kind) => {
                self.seats[player.index()] = kind;
                self.strategies[player.index()] = build_strategy(kind, player, &self.config);
            },
            Err(e) => writeln!(output, "info string {e}")?,
        }
        Ok(())
    }

    fn handle_newgame(&mut self, output: &mut impl Write) -> anyhow::Result<()> {
        match &self.board {
            Some(board) => self.game = Some(GameState::new(board.clone())),
            None => writeln!(output, "info string No board: send `board <rows>` first")?,
        }
        Ok(())
    }

    /// Asks the strategy of the player to move for a move without playing it.
    fn handle_go(&mut self, output: &mut impl Write) -> anyhow::Result<()> {
        let Some(game) = &self.game else {
            writeln!(output, "info string No board: send `board <rows>` first")?;
            return Ok(());
        };
        let strategy = &mut self.strategies[game.to_move().index()];
        match strategy.decide(game.board(), game.last_move(), game.scores()) {
            Some(next_move) => writeln!(output, "bestmove {next_move}")?,
            None => writeln!(output, "bestmove none")?,
        }
        Ok(())
    }

    fn handle_move(&mut self, next_move: Move, output: &mut impl Write) -> anyhow::Result<()> {
        let Some(game) = &mut self.game else {
            writeln!(output, "info string No board: send `board <rows>` first")?;
            return Ok(());
        };
        if let Err(e) = game.play(next_move) {
            writeln!(output, "info string {e}")?;
        }
        Ok(())
    }

    /// Plays the current game to the end, printing every move and the result.
    fn handle_play(&mut self, output: &mut impl Write) -> anyhow::Result<()> {
        let Some(game) = &mut self.game else {
            writeln!(output, "info string No board: send `board <rows>` first")?;
            return Ok(());
        };
        let [first, second] = &mut self.strategies;
        let first: &mut dyn Strategy = first;
        let second: &mut dyn Strategy = second;
        let mut plies: Vec<Ply> = Vec::new();
        let outcome = play_out(game, [first, second], |ply| plies.push(*ply));
        for ply in &plies {
            writeln!(output, "move {ply}")?;
        }
        match outcome {
            Ok(outcome) => {
                let scores = game.scores();
                writeln!(output, "result {scores} {outcome}")?;
            },
            Err(e) => writeln!(output, "info string {e}")?,
        }
        Ok(())
    }

    fn handle_display(&self, output: &mut impl Write) -> anyhow::Result<()> {
        let Some(game) = &self.game else {
            writeln!(output, "info string No board: send `board <rows>` first")?;
            return Ok(());
        };
        write!(output, "{}", game.board())?;
        match game.last_move() {
            Some(last_move) => writeln!(output, "last {last_move}")?,
            None => writeln!(output, "last none")?,
        }
        writeln!(output, "scores {}", game.scores())?;
        if game.is_terminal() {
            writeln!(
                output,
                "over {}",
                Outcome::from_scores(game.scores())
            )?;
        } else {
            writeln!(
                output,
                "tomove {} {}",
                game.to_move(),
                self.seats[game.to_move().index()]
            )?;
        }
        Ok(())
    }
}

/// Seeds differ between the seats so that two identical randomized strategies
/// do not mirror each other.
fn build_strategy(kind: StrategyKind, player: Player, config: &StrategyConfig) -> AnyStrategy {
    let mut config = config.clone();
    config.seed = config
        .seed
        .map(|seed| seed.wrapping_add(player.index() as u64));
    AnyStrategy::new(kind, &config)
}

fn build_strategies(seats: [StrategyKind; 2], config: &StrategyConfig) -> [AnyStrategy; 2] {
    [
        build_strategy(seats[0], Player::First, config),
        build_strategy(seats[1], Player::Second, config),
    ]
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use pretty_assertions::assert_eq;

    use super::*;

    fn run(engine: &mut Engine, commands: &str) -> String {
        let mut input = Cursor::new(commands.as_bytes());
        let mut output = Vec::new();
        engine.protocol_loop(&mut input, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn handshake() {
        let output = run(&mut Engine::default(), "hello\nisready\n");
        assert!(output.starts_with("id name rowcol"));
        assert!(output.contains("option name MctsTime type spin default 5000\n"));
        assert!(output.contains("strategies random greedy safe_choice MCTS minimax\n"));
        assert!(output.ends_with("hellook\nreadyok\n"));
    }

    #[test]
    fn greedy_game() {
        let output = run(
            &mut Engine::default(),
            "board 1,5,7,2;3,6,9,8;4,4,2,1;9,6,3,6\ngo\nmove 1 2\ngo\nquit\ngo\n",
        );
        assert_eq!(output, "bestmove 1 2\nbestmove 1 3\n");
    }

    #[test]
    fn play_to_the_end() {
        let mut engine = Engine::default();
        let output = run(&mut engine, "board 1,2/3,4\nplay\n");
        assert_eq!(
            output,
            "move 1 1 1 4\nmove 2 1 0 3\nmove 1 0 0 1\nmove 2 0 1 2\nresult 5 5 tie\n"
        );
        assert!(engine.game().unwrap().is_terminal());
        assert_eq!(run(&mut engine, "go\n"), "bestmove none\n");
        // `newgame` restarts from the same board.
        assert_eq!(run(&mut engine, "newgame\ngo\n"), "bestmove 1 1\n");
    }

    #[test]
    fn display() {
        let output = run(&mut Engine::default(), "board 1,2/3,4\nmove 0 1\nd\n");
        assert_eq!(output, "1, -\n3, 4\nlast 0 1\nscores 2 0\ntomove 2 greedy\n");
    }

    #[test]
    fn prepared_board_continues_with_the_right_seat() {
        let mut engine = Engine::default();
        let output = run(&mut engine, "player 2 safe_choice\nboard -,2;3,4\nd\n");
        assert_eq!(output, "-, 2\n3, 4\nlast none\nscores 0 0\ntomove 2 safe_choice\n");
        // `newgame` restores the prepared board and its seat.
        let output = run(&mut engine, "go\nmove 1 1\nnewgame\nd\n");
        assert_eq!(output.lines().last(), Some("tomove 2 safe_choice"));
    }

    #[test]
    fn seats_and_options() {
        let mut engine = Engine::default();
        let output = run(
            &mut engine,
            "setoption name Seed value 7\nsetoption name MctsIterations value 50\nplayer 1 \
             MCTS\nplayer 2 safe_choice\nboard 2,4,6;3,5,7;5,1,3\nplay\n",
        );
        assert!(output.lines().last().unwrap().starts_with("result "));
        assert_eq!(engine.seats, [StrategyKind::Mcts, StrategyKind::SafeChoice]);
        assert_eq!(engine.config.mcts.max_iterations, 50);
        assert_eq!(engine.config.seed, Some(7));
    }

    #[test]
    fn zero_budgets_are_rejected() {
        let mut engine = Engine::default();
        let output = run(
            &mut engine,
            "setoption name MctsTime value 0\nsetoption name MctsIterations value \
             0\nsetoption name AlphaBetaBudget value 0\nsetoption name Seed value 0\n",
        );
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            [
                "info string invalid option 'MctsTime': must be positive",
                "info string invalid option 'MctsIterations': must be positive",
                "info string invalid option 'AlphaBetaBudget': must be positive",
            ]
        );
        assert_eq!(engine.config.mcts.time_limit, Duration::from_secs(5));
        assert_eq!(engine.config.seed, Some(0));

        let output = run(&mut engine, "player 1 MCTS\nboard 1,2;3,4\ngo\nplay\n");
        assert!(output.starts_with("bestmove "));
        assert!(!output.contains("bestmove none"));
        assert!(output.lines().last().unwrap().starts_with("result "));
    }

    #[test]
    fn reports_problems() {
        let output = run(
            &mut Engine::default(),
            "go\nboard 1,2;3\nboard 1,2;3,4\nmove 5 5\nplayer 1 expectimax\nsetoption name \
             AlphaBetaDepth value 0\nfoo\n\n",
        );
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines.iter().all(|line| line.starts_with("info string ")));
        assert!(lines[0].contains("No board"));
        assert!(lines[1].contains("invalid board"));
        assert!(lines[2].contains("illegal move 5 5"));
        assert!(lines[3].contains("unknown strategy 'expectimax'"));
        assert!(lines[4].contains("AlphaBetaDepth"));
        assert_eq!(lines[5], "info string Unsupported command: foo");
    }
}
