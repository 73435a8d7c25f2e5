//! History consistency invariant: snapshot index matches occupied squares.

use super::super::Session;
use super::Invariant;

/// Invariant: snapshot `n` has exactly `n` occupied squares, and the
/// current step points inside the history.
pub struct HistoryConsistentInvariant;

impl Invariant<Session> for HistoryConsistentInvariant {
    fn holds(session: &Session) -> bool {
        let history = session.history();
        session.step() < history.len()
            && history
                .iter()
                .enumerate()
                .all(|(ply, board)| board.occupied_count() == ply)
    }

    fn description() -> &'static str {
        "Snapshot index matches number of occupied squares"
    }
}
