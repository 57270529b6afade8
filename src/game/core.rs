//! Primitives shared by the board, the game state and every strategy.

use std::fmt;
use std::ops::{Index, IndexMut, Not};

use anyhow::bail;

/// Numeric value of a cell. Values are non-negative and never change after the
/// board is created.
pub type Value = u32;

/// Cumulative score. Wider than [`Value`] because a score adds up to N² cell
/// values.
pub type Score = u64;

/// The game is played between two players: First (having the advantage of the
/// first pick) and Second.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    First,
    Second,
}

impl Player {
    /// Position of the player's score in [`Scores`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }
}

impl Not for Player {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

impl TryFrom<&str> for Player {
    type Error = anyhow::Error;

    fn try_from(player: &str) -> anyhow::Result<Self> {
        match player {
            "1" => Ok(Self::First),
            "2" => Ok(Self::Second),
            _ => bail!("player should be '1' or '2', got '{player}'"),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match &self {
                Self::First => '1',
                Self::Second => '2',
            }
        )
    }
}

/// Coordinates of the cell claimed by a move. Both row and column are
/// zero-based.
///
/// ```
/// use rowcol::game::Move;
///
/// let next_move = Move::new(1, 2);
/// assert_eq!(next_move.to_string(), "1 2");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Move {
    /// Board row.
    pub row: usize,
    /// Board column.
    pub column: usize,
}

impl Move {
    #[must_use]
    #[allow(missing_docs)]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Returns `true` if both moves are on the same row or the same column.
    #[must_use]
    pub const fn shares_line(&self, other: &Self) -> bool {
        self.row == other.row || self.column == other.column
    }
}

impl From<(usize, usize)> for Move {
    fn from((row, column): (usize, usize)) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Move {
    /// Serializes the move as `<row> <column>`, the format used by the engine
    /// protocol.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.row, self.column)
    }
}

/// Cumulative scores of both players, indexed by [`Player`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Scores([Score; 2]);

impl Scores {
    #[must_use]
    #[allow(missing_docs)]
    pub const fn new(first: Score, second: Score) -> Self {
        Self([first, second])
    }

    /// Score of `player` minus the score of the opponent.
    #[must_use]
    /// Saturates at the `i64` bounds.
    pub fn advantage(&self, player: Player) -> i64 {
        let difference = i128::from(self[player]) - i128::from(self[!player]);
        i64::try_from(difference).unwrap_or(if difference > 0 { i64::MAX } else { i64::MIN })
    }

    /// Sum of both scores.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0[0].saturating_add(self.0[1])
    }
}

impl From<(Score, Score)> for Scores {
    fn from((first, second): (Score, Score)) -> Self {
        Self::new(first, second)
    }
}

impl Index<Player> for Scores {
    type Output = Score;

    fn index(&self, player: Player) -> &Self::Output {
        &self.0[player.index()]
    }
}

impl IndexMut<Player> for Scores {
    fn index_mut(&mut self, player: Player) -> &mut Self::Output {
        &mut self.0[player.index()]
    }
}

impl fmt::Display for Scores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0[0], self.0[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn players_alternate() {
        assert_eq!(!Player::First, Player::Second);
        assert_eq!(!!Player::First, Player::First);
        assert_eq!(Player::try_from("2").unwrap(), Player::Second);
        assert!(Player::try_from("3").is_err());
        assert_eq!(Player::Second.to_string(), "2");
    }

    #[test]
    fn moves_share_lines() {
        let origin = Move::new(1, 2);
        assert!(origin.shares_line(&Move::new(1, 0)));
        assert!(origin.shares_line(&Move::new(3, 2)));
        assert!(!origin.shares_line(&Move::new(0, 0)));
    }

    #[test]
    fn scores() {
        let mut scores = Scores::from((9, 8));
        assert_eq!(scores[Player::First], 9);
        assert_eq!(scores.advantage(Player::Second), -1);
        scores[Player::Second] += 5;
        assert_eq!(scores, Scores::new(9, 13));
        assert_eq!(scores.total(), 22);
        assert_eq!(scores.to_string(), "9 13");

        let extreme = Scores::new(Score::MAX, 0);
        assert_eq!(extreme.advantage(Player::First), i64::MAX);
        assert_eq!(extreme.advantage(Player::Second), i64::MIN);
        assert_eq!(Scores::new(Score::MAX, 1).total(), Score::MAX);
    }
}
