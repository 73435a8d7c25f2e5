//! Monotonic board invariant: squares never change once set.

use super::super::{Board, Position, Session, Square};
use super::Invariant;

/// Invariant: each snapshot extends the previous one by exactly one mark.
///
/// The first snapshot is the empty board, and a square that is occupied
/// in one snapshot holds the same mark in every later one.
pub struct MonotonicBoardInvariant;

impl Invariant<Session> for MonotonicBoardInvariant {
    fn holds(session: &Session) -> bool {
        let history = session.history();
        if history.first() != Some(&Board::new()) {
            return false;
        }

        history.windows(2).all(|pair| {
            let (before, after) = (&pair[0], &pair[1]);
            let mut added = 0;
            for pos in Position::ALL {
                match (before.get(pos), after.get(pos)) {
                    (a, b) if a == b => {}
                    (Square::Empty, Square::Occupied(_)) => added += 1,
                    _ => return false,
                }
            }
            added == 1
        })
    }

    fn description() -> &'static str {
        "Board squares are monotonic (never overwritten)"
    }
}
