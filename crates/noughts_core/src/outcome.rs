//! Derived game outcome.

use super::types::Mark;
use serde::{Deserialize, Serialize};

/// Outcome of a board, recomputed from the squares after every move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// No winner yet and at least one empty square.
    InProgress,
    /// A mark holds three in a line.
    Win(Mark),
    /// Board is full with no winner.
    Tie,
}

impl GameOutcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            GameOutcome::Win(mark) => Some(*mark),
            GameOutcome::InProgress | GameOutcome::Tie => None,
        }
    }

    /// Returns true once no further moves are legal.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }

    /// Returns true if the game was a tie.
    pub fn is_tie(&self) -> bool {
        matches!(self, GameOutcome::Tie)
    }
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOutcome::InProgress => write!(f, "In progress"),
            GameOutcome::Win(mark) => write!(f, "{} Wins!", mark),
            GameOutcome::Tie => write!(f, "It's a Tie!"),
        }
    }
}
