//! Move application and turn order.
//!
//! These are the pure GameState operations: they take a board by
//! reference and hand back a new one, leaving turn tracking and outcome
//! recomputation to the caller.

use super::action::{Move, MoveError};
use super::contracts::{Contract, IndexInRange, MoveContract};
use super::{Board, Mark};
use tracing::{debug, instrument};

/// Places `mark` at `index` (0-8) and returns the resulting board.
///
/// # Errors
///
/// - [`MoveError::OutOfRange`] if `index > 8`
/// - [`MoveError::GameOver`] if the board is already won or full
/// - [`MoveError::SquareOccupied`] if the target square holds a mark
#[instrument(skip(board), fields(board = %board))]
pub fn apply_move(board: &Board, index: usize, mark: Mark) -> Result<Board, MoveError> {
    let position = IndexInRange::check(index)?;
    let action = Move::new(mark, position);
    MoveContract::pre(board, &action)?;

    let after = board.with_mark(position, mark);
    debug_assert!(MoveContract::post(board, &action, &after));
    debug!(%action, after = %after, "Move applied");
    Ok(after)
}

/// Returns the mark that moves after `mark`.
pub fn next_turn(mark: Mark) -> Mark {
    mark.opponent()
}
