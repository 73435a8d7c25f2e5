//! Contract-based validation for move application.
//!
//! Contracts define correctness through preconditions and postconditions:
//! `{P(board, move)} apply {Q(before, after)}`.

use super::action::{Move, MoveError};
use super::rules::evaluate;
use super::{Board, Position, Square};
use tracing::{instrument, warn};

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, action: &A, after: &S) -> bool;
}

/// Precondition: the raw index names a cell.
pub struct IndexInRange;

impl IndexInRange {
    /// Converts the index, rejecting anything past 8.
    #[instrument]
    pub fn check(index: usize) -> Result<Position, MoveError> {
        Position::from_index(index).ok_or(MoveError::OutOfRange(index))
    }
}

/// Precondition: the game on the board has not finished.
pub struct GameNotOver;

impl GameNotOver {
    /// Fails with [`MoveError::GameOver`] on a won or full board.
    #[instrument(skip(board))]
    pub fn check(board: &Board) -> Result<(), MoveError> {
        if evaluate(board).is_terminal() {
            Err(MoveError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the square at the move's position must be empty.
pub struct SquareIsEmpty;

impl SquareIsEmpty {
    /// Fails with [`MoveError::SquareOccupied`] if the target is taken.
    #[instrument(skip(board))]
    pub fn check(mov: &Move, board: &Board) -> Result<(), MoveError> {
        if !board.is_empty(mov.position) {
            Err(MoveError::SquareOccupied(mov.position))
        } else {
            Ok(())
        }
    }
}

/// Composite precondition: the game is live and the square is free.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(board))]
    pub fn check(mov: &Move, board: &Board) -> Result<(), MoveError> {
        GameNotOver::check(board)?;
        SquareIsEmpty::check(mov, board)?;
        Ok(())
    }
}

/// Contract for placing a mark.
///
/// Postcondition: exactly the moved square changed, from empty to the
/// moved mark.
pub struct MoveContract;

impl Contract<Board, Move> for MoveContract {
    fn pre(board: &Board, action: &Move) -> Result<(), MoveError> {
        LegalMove::check(action, board)
    }

    fn post(before: &Board, action: &Move, after: &Board) -> bool {
        let holds = Position::ALL.iter().all(|&pos| {
            if pos == action.position {
                before.get(pos) == Square::Empty && after.get(pos) == Square::Occupied(action.mark)
            } else {
                before.get(pos) == after.get(pos)
            }
        });
        if !holds {
            warn!(before = %before, after = %after, %action, "Move postcondition violated");
        }
        holds
    }
}
