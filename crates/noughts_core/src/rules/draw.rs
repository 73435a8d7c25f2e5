//! Full-board detection.

use super::super::Board;
use tracing::instrument;

/// Returns true when no empty square remains.
///
/// Only a tie if [`check_winner`](super::check_winner) also finds nothing.
#[instrument(level = "trace", skip(board), fields(board = %board))]
pub fn is_full(board: &Board) -> bool {
    board.empty_positions().next().is_none()
}
