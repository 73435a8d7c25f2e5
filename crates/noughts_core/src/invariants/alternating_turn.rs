//! Alternating turn invariant: marks alternate X, O, X, O, ...

use super::super::{Mark, Session};
use super::Invariant;

/// Invariant: ply `n` places X when `n` is even and O when it is odd.
pub struct AlternatingTurnInvariant;

impl Invariant<Session> for AlternatingTurnInvariant {
    fn holds(session: &Session) -> bool {
        session
            .history()
            .windows(2)
            .enumerate()
            .all(|(ply, pair)| {
                let expected = if ply % 2 == 0 { Mark::X } else { Mark::O };
                pair[1].count(expected) == pair[0].count(expected) + 1
            })
    }

    fn description() -> &'static str {
        "Marks alternate turns (X, O, X, O, ...)"
    }
}
