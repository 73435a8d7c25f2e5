//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating game state
//! according to tic-tac-toe rules. Rules are separated from board
//! storage so the session, the contracts, and the search all share
//! one definition of a finished game.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LINES, check_winner, winning_line};

use super::outcome::GameOutcome;
use super::types::{Board, Square};
use tracing::instrument;

/// Classifies a board as in progress, won, or tied.
///
/// A win takes precedence over a full board.
#[instrument(level = "trace", skip(board), fields(board = %board))]
pub fn evaluate(board: &Board) -> GameOutcome {
    classify(board)
}

/// [`evaluate`] without a span, for the search's inner loop.
pub(crate) fn classify(board: &Board) -> GameOutcome {
    let line = win::LINES.into_iter().find(|&[a, b, c]| {
        let sq = board.get(a);
        sq != Square::Empty && sq == board.get(b) && sq == board.get(c)
    });
    match line.and_then(|[a, _, _]| board.get(a).mark()) {
        Some(winner) => GameOutcome::Win(winner),
        None if board.empty_positions().next().is_none() => GameOutcome::Tie,
        None => GameOutcome::InProgress,
    }
}
