//! Decision engine: exhaustive minimax over the 3x3 board.
//!
//! Scores are from the engine's point of view. A win scores `10 - depth`,
//! a loss `depth - 10` and a tie `0`, so among equally good lines the
//! engine prefers the quickest win and the slowest loss. Ties score zero
//! at any depth.
//!
//! Every branch works on its own copy of the board; nothing is placed
//! and then undone on a shared instance, so searches on separate boards
//! may run concurrently.

use super::action::NoMoveAvailable;
use super::outcome::GameOutcome;
use super::rules::{classify, evaluate};
use super::{Board, Mark, Position};
use tracing::{debug, instrument, trace};

/// Score of an immediate win at depth zero.
pub const WIN_SCORE: i32 = 10;

/// Returns the optimal position for `mark` to play on `board`.
///
/// Empty squares are tried in scan order (0 to 8); the first square with
/// the strictly highest score wins, so ties go to the lowest index.
///
/// # Errors
///
/// Returns [`NoMoveAvailable`] if the board is full or already decided.
#[instrument(skip(board), fields(board = %board))]
pub fn best_move(board: &Board, mark: Mark) -> Result<Position, NoMoveAvailable> {
    let mut best: Option<(Position, i32)> = None;
    for (position, score) in ranked_moves(board, mark) {
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((position, score));
        }
    }

    let (position, score) = best.ok_or(NoMoveAvailable)?;
    debug!(%position, score, "Best move selected");
    Ok(position)
}

/// Scores every empty square for `mark`, in scan order.
///
/// Returns an empty list when the board is already terminal.
#[instrument(skip(board), fields(board = %board))]
pub fn ranked_moves(board: &Board, mark: Mark) -> Vec<(Position, i32)> {
    if evaluate(board).is_terminal() {
        return Vec::new();
    }

    let opponent = mark.opponent();
    board
        .empty_positions()
        .map(|position| {
            let child = board.with_mark(position, mark);
            let score = score(&child, 0, false, mark, opponent);
            trace!(%position, score, "Root move scored");
            (position, score)
        })
        .collect()
}

/// Minimax value of `board` for `engine_mark`.
///
/// `maximizing` is true when `engine_mark` is the next to move. `depth`
/// counts plies played since the root move was placed.
pub fn score(
    board: &Board,
    depth: i32,
    maximizing: bool,
    engine_mark: Mark,
    opponent_mark: Mark,
) -> i32 {
    match classify(board) {
        GameOutcome::Win(winner) if winner == engine_mark => return WIN_SCORE - depth,
        GameOutcome::Win(_) => return depth - WIN_SCORE,
        GameOutcome::Tie => return 0,
        GameOutcome::InProgress => {}
    }

    let to_play = if maximizing { engine_mark } else { opponent_mark };
    let scores = board.empty_positions().map(|position| {
        score(
            &board.with_mark(position, to_play),
            depth + 1,
            !maximizing,
            engine_mark,
            opponent_mark,
        )
    });

    // An in-progress board always has an empty square.
    if maximizing {
        scores.max().unwrap_or(0)
    } else {
        scores.min().unwrap_or(0)
    }
}

/// A policy for choosing the computer's move.
pub trait Strategy: Send + Sync {
    /// Chooses a position for `mark` on `board`.
    fn choose(&self, board: &Board, mark: Mark) -> Result<Position, NoMoveAvailable>;

    /// Short name for logs and the CLI.
    fn name(&self) -> &'static str;
}

/// Optimal play via [`best_move`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Minimax;

impl Strategy for Minimax {
    fn choose(&self, board: &Board, mark: Mark) -> Result<Position, NoMoveAvailable> {
        best_move(board, mark)
    }

    fn name(&self) -> &'static str {
        "minimax"
    }
}

/// Picks the first empty square in scan order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FirstAvailable;

impl Strategy for FirstAvailable {
    #[instrument(skip(self, board), fields(board = %board))]
    fn choose(&self, board: &Board, _mark: Mark) -> Result<Position, NoMoveAvailable> {
        if evaluate(board).is_terminal() {
            return Err(NoMoveAvailable);
        }
        board.empty_positions().next().ok_or(NoMoveAvailable)
    }

    fn name(&self) -> &'static str {
        "first"
    }
}
