use crate::game::{Move, Player};

#[derive(Debug, PartialEq, Eq)]
pub(super) enum Command {
    Hello,
    IsReady,
    SetOption { option: EngineOption, value: u64 },
    SetBoard { rows: String },
    SetPlayer { player: Player, strategy: String },
    NewGame,
    Go,
    Move(Move),
    Play,
    Display,
    Quit,
    Unknown(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum EngineOption {
    /// Seed of the strategy random number generators.
    Seed,
    /// MCTS time budget per move in milliseconds.
    MctsTime,
    MctsIterations,
    AlphaBetaBudget,
    AlphaBetaDepth,
}

impl EngineOption {
    pub(super) const ALL: [Self; 5] = [
        Self::Seed,
        Self::MctsTime,
        Self::MctsIterations,
        Self::AlphaBetaBudget,
        Self::AlphaBetaDepth,
    ];

    pub(super) const fn name(self) -> &'static str {
        match self {
            Self::Seed => "Seed",
            Self::MctsTime => "MctsTime",
            Self::MctsIterations => "MctsIterations",
            Self::AlphaBetaBudget => "AlphaBetaBudget",
            Self::AlphaBetaDepth => "AlphaBetaDepth",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|option| option.name().eq_ignore_ascii_case(name))
    }
}

fn parse_setoption(parts: &[&str], input: &str) -> Command {
    if parts.len() > 3 && parts[1] == "name" {
        let name_end = parts
            .iter()
            .position(|&x| x == "value")
            .unwrap_or(parts.len());
        let Some(option) = EngineOption::from_name(&parts[2..name_end].join(" ")) else {
            return Command::Unknown(input.to_string());
        };
        match parts.get(name_end + 1).and_then(|value| value.parse().ok()) {
            Some(value) => Command::SetOption { option, value },
            None => Command::Unknown(input.to_string()),
        }
    } else {
        Command::Unknown(input.to_string())
    }
}

fn parse_player(parts: &[&str], input: &str) -> Command {
    match parts {
        [_, player, strategy] => match Player::try_from(*player) {
            Ok(player) => Command::SetPlayer {
                player,
                strategy: (*strategy).to_string(),
            },
            Err(_) => Command::Unknown(input.to_string()),
        },
        _ => Command::Unknown(input.to_string()),
    }
}

fn parse_move(parts: &[&str], input: &str) -> Command {
    match parts {
        [_, row, column] => match (row.parse(), column.parse()) {
            (Ok(row), Ok(column)) => Command::Move(Move::new(row, column)),
            _ => Command::Unknown(input.to_string()),
        },
        _ => Command::Unknown(input.to_string()),
    }
}

impl Command {
    pub(super) fn parse(input: &str) -> Self {
        let input = input.trim();
        let parts: Vec<&str> = input.split_whitespace().collect();

        if parts.is_empty() {
            return Self::Unknown(input.to_string());
        }

        match parts[0] {
            "hello" => Self::Hello,
            "isready" => Self::IsReady,
            "setoption" => parse_setoption(&parts, input),
            // Everything after the keyword is the board, rows separated by `;`
            // or `/`.
            "board" if parts.len() > 1 => Self::SetBoard {
                rows: input["board".len()..].trim().to_string(),
            },
            "player" => parse_player(&parts, input),
            "newgame" => Self::NewGame,
            "go" => Self::Go,
            "move" => parse_move(&parts, input),
            "play" => Self::Play,
            "d" => Self::Display,
            "quit" => Self::Quit,
            _ => Self::Unknown(input.to_string()),
        }
    }
}
