//! Board analysis for the `solve` command.

use noughts_core::{Board, GameOutcome, Mark, Position, evaluate, ranked_moves};
use serde::Serialize;
use tracing::{debug, instrument};

/// Score of one candidate move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoredMove {
    /// Square played.
    pub position: Position,
    /// Cell number, 1-9.
    pub cell: usize,
    /// Minimax score for the side to move.
    pub score: i32,
}

/// Analysis of a single board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolveReport {
    /// Board in compact form.
    pub board: String,
    /// Side the analysis is for.
    pub to_move: Mark,
    /// Current outcome of the board.
    pub outcome: GameOutcome,
    /// Every empty square with its score, in scan order.
    pub moves: Vec<ScoredMove>,
    /// Chosen move, if the game is still open.
    pub best: Option<Position>,
}

/// Side to move when none is given: X while the counts are level.
pub fn infer_to_move(board: &Board) -> Mark {
    if board.count(Mark::X) <= board.count(Mark::O) {
        Mark::X
    } else {
        Mark::O
    }
}

/// First move with the strictly highest score, matching [`noughts_core::best_move`].
fn pick_best(moves: &[ScoredMove]) -> Option<Position> {
    moves
        .iter()
        .fold(None::<&ScoredMove>, |best, candidate| match best {
            Some(current) if current.score >= candidate.score => Some(current),
            _ => Some(candidate),
        })
        .map(|scored| scored.position)
}

/// Analyses `board` for `mark`, inferring the side to move when `None`.
#[instrument(skip(board), fields(board = %board))]
pub fn solve(board: &Board, mark: Option<Mark>) -> SolveReport {
    let to_move = mark.unwrap_or_else(|| infer_to_move(board));
    let moves = ranked_moves(board, to_move)
        .into_iter()
        .map(|(position, score)| ScoredMove {
            position,
            cell: position.to_index() + 1,
            score,
        })
        .collect::<Vec<_>>();
    let best = pick_best(&moves);
    debug!(%to_move, ?best, "Board solved");

    SolveReport {
        board: board.compact(),
        to_move,
        outcome: evaluate(board),
        moves,
        best,
    }
}

impl SolveReport {
    /// Human-readable summary.
    pub fn to_text(&self) -> String {
        let mut out = format!("Board: {}\nTo move: {}\nOutcome: {}\n", self.board, self.to_move, self.outcome);
        for scored in &self.moves {
            out.push_str(&format!(
                "  {} ({}): {:+}\n",
                scored.cell, scored.position, scored.score
            ));
        }
        match self.best {
            Some(position) => {
                out.push_str(&format!("Best move: {} ({})\n", position.to_index() + 1, position))
            }
            None => out.push_str("Best move: none\n"),
        }
        out
    }
}
