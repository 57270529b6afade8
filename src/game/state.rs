//! Game state transitions and legal move generation.
//!
//! Every strategy, including MCTS rollouts and alpha-beta lookahead, goes
//! through [`available_moves`] and [`GameState::make_move`], so simulated play
//! follows exactly the same rules as the real game.

use crate::error::{IllegalMoveError, IllegalReason};
use crate::game::board::Board;
use crate::game::core::{Move, Player, Score, Scores, Value};

/// The move with the highest value among `moves`. Ties go to the earliest
/// move, which for row-major move lists is the top-most, then left-most cell.
#[must_use]
pub fn highest_value(board: &Board, moves: &[Move]) -> Option<Move> {
    moves
        .iter()
        .rev()
        .max_by_key(|square| board.value(**square))
        .copied()
}

/// Lists the cells the player to move may claim, in row-major order.
///
/// Without a previous move every unclaimed cell is legal. Otherwise only the
/// unclaimed cells sharing the row or the column of the previous move are; the
/// intersection is listed once.
#[must_use]
pub fn available_moves(board: &Board, last_move: Option<Move>) -> Vec<Move> {
    match last_move {
        None => board.free_cells().map(|(square, _)| square).collect(),
        Some(last) => board
            .free_cells()
            .map(|(square, _)| square)
            .filter(|square| square.shares_line(&last))
            .collect(),
    }
}

/// Checks whether `next_move` belongs to [`available_moves`] without building
/// the list.
///
/// # Errors
///
/// Returns the violated rule if the move is illegal.
pub fn check_move(
    board: &Board,
    last_move: Option<Move>,
    next_move: Move,
) -> Result<(), IllegalMoveError> {
    let reason = if !board.contains(next_move) {
        IllegalReason::OutOfBounds
    } else if !board.is_free(next_move) {
        IllegalReason::Claimed
    } else if last_move.is_some_and(|last| !next_move.shares_line(&last)) {
        IllegalReason::NotInBand
    } else {
        return Ok(());
    };
    Err(IllegalMoveError { next_move, reason })
}

/// Snapshot of a game: the board, the previous pick, whose turn it is and the
/// scores so far.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GameState {
    board: Board,
    last_move: Option<Move>,
    to_move: Player,
    scores: Scores,
}

impl GameState {
    /// Starts a new game with zero scores and no previous move. First is to
    /// move on a fresh board; cells claimed in advance count as played plies
    /// the same way [`GameState::from_position`] counts them.
    #[must_use]
    pub fn new(board: Board) -> Self {
        Self::from_position(board, None, Scores::default())
    }

    /// Reconstructs the state from what strategies receive from the caller.
    ///
    /// Players alternate and every ply claims exactly one cell, so the player
    /// to move follows from the parity of claimed cells.
    #[must_use]
    pub fn from_position(board: Board, last_move: Option<Move>, scores: Scores) -> Self {
        let to_move = if board.claimed_count() % 2 == 0 {
            Player::First
        } else {
            Player::Second
        };
        Self {
            board,
            last_move,
            to_move,
            scores,
        }
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn to_move(&self) -> Player {
        self.to_move
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn scores(&self) -> Scores {
        self.scores
    }

    /// Legal moves of the player to move.
    #[must_use]
    pub fn available_moves(&self) -> Vec<Move> {
        available_moves(&self.board, self.last_move)
    }

    /// The game is over when the player to move has no legal cell.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        match self.last_move {
            None => self.board.free_cells().next().is_none(),
            Some(last) => !self
                .board
                .free_cells()
                .any(|(square, _)| square.shares_line(&last)),
        }
    }

    /// Returns the state after the player to move claims `next_move`.
    ///
    /// # Errors
    ///
    /// Fails if the move is not in [`GameState::available_moves`].
    pub fn apply(&self, next_move: Move) -> Result<Self, IllegalMoveError> {
        let mut next = self.clone();
        let _ = next.play(next_move)?;
        Ok(next)
    }

    /// Claims `next_move` for the player to move in place and returns the
    /// value added to their score.
    ///
    /// # Errors
    ///
    /// Fails if the move is not in [`GameState::available_moves`]; the state is
    /// left untouched in that case.
    pub fn play(&mut self, next_move: Move) -> Result<Value, IllegalMoveError> {
        check_move(&self.board, self.last_move, next_move)?;
        Ok(self.make_move(next_move))
    }

    /// The transition itself: adds the value to the mover's score, marks the
    /// cell claimed, records the move and passes the turn.
    ///
    /// The move must come from [`GameState::available_moves`].
    pub(crate) fn make_move(&mut self, next_move: Move) -> Value {
        debug_assert!(check_move(&self.board, self.last_move, next_move).is_ok());
        let value = self.board.claim(next_move).unwrap_or_default();
        self.scores[self.to_move] += Score::from(value);
        self.last_move = Some(next_move);
        self.to_move = !self.to_move;
        value
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn board() -> Board {
        "1,5,7,2\n3,6,9,8\n4,4,2,1\n9,6,3,6".parse().unwrap()
    }

    #[test]
    fn first_move_is_unrestricted() {
        assert_eq!(available_moves(&board(), None).len(), 16);
    }

    #[test]
    fn band_moves() {
        let mut state = GameState::new(board());
        assert_eq!(state.play(Move::new(1, 2)), Ok(9));
        assert_eq!(
            state.available_moves(),
            vec![
                Move::new(0, 2),
                Move::new(1, 0),
                Move::new(1, 1),
                Move::new(1, 3),
                Move::new(2, 2),
                Move::new(3, 2),
            ]
        );
        assert_eq!(state.to_move(), Player::Second);
        assert_eq!(state.scores(), Scores::new(9, 0));
    }

    #[test]
    fn highest_value_prefers_earliest_move() {
        let board = board();
        let moves = available_moves(&board, None);
        // Both (1, 2) and (3, 0) hold a 9.
        assert_eq!(highest_value(&board, &moves), Some(Move::new(1, 2)));
        assert_eq!(
            highest_value(&board, &[Move::new(3, 0), Move::new(1, 2)]),
            Some(Move::new(3, 0))
        );
        assert_eq!(highest_value(&board, &[]), None);
    }

    #[test]
    fn rejects_illegal_moves() {
        let state = GameState::new(board()).apply(Move::new(0, 0)).unwrap();
        for (next_move, reason) in [
            (Move::new(0, 4), IllegalReason::OutOfBounds),
            (Move::new(0, 0), IllegalReason::Claimed),
            (Move::new(1, 1), IllegalReason::NotInBand),
        ] {
            assert_eq!(
                state.apply(next_move),
                Err(IllegalMoveError { next_move, reason })
            );
        }
        // Rejection leaves the state untouched.
        let mut copy = state.clone();
        assert!(copy.play(Move::new(2, 2)).is_err());
        assert_eq!(copy, state);
    }

    #[test]
    fn terminal_when_band_is_exhausted() {
        let board: Board = "1,-\n-,2".parse().unwrap();
        let state = GameState::from_position(board, Some(Move::new(0, 1)), Scores::new(3, 4));
        assert_eq!(state.to_move(), Player::First);
        assert!(!state.is_terminal());
        let state = state.apply(Move::new(0, 0)).unwrap();
        // (1, 1) is free but shares neither row nor column with (0, 0).
        assert!(state.is_terminal());
        assert!(state.available_moves().is_empty());
        assert_eq!(state.scores(), Scores::new(4, 4));
    }

    #[test]
    fn infers_player_to_move() {
        let board: Board = "1,-\n3,4".parse().unwrap();
        let state = GameState::from_position(board, Some(Move::new(0, 1)), Scores::new(2, 0));
        assert_eq!(state.to_move(), Player::Second);
    }

    #[test]
    fn scores_hold_sums_of_maximal_values() {
        let max = Value::MAX;
        let mut state = GameState::new(Board::from_rows(vec![vec![max; 2]; 2]).unwrap());
        for (row, column) in [(0, 0), (0, 1), (1, 1), (1, 0)] {
            assert_eq!(state.play(Move::new(row, column)), Ok(max));
        }
        let expected = 2 * Score::from(max);
        assert_eq!(state.scores(), Scores::new(expected, expected));
        assert_eq!(state.scores().total(), 2 * expected);
    }

    #[test]
    fn new_game_agrees_with_inferred_player() {
        let board: Board = "-,2\n3,4".parse().unwrap();
        let state = GameState::new(board.clone());
        assert_eq!(state.to_move(), Player::Second);
        assert_eq!(state, GameState::from_position(board, None, Scores::default()));
        assert_eq!(GameState::new(self::board()).to_move(), Player::First);
    }

    #[test]
    fn empty_board_is_terminal() {
        let state = GameState::new(Board::from_rows(vec![]).unwrap());
        assert!(state.is_terminal());
        assert!(state.available_moves().is_empty());
    }
}
